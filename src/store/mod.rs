mod activity;
mod department;
mod filter;
mod organization;
mod role;
mod schema;
mod session;
mod sqlite;
mod tx;
mod user;

pub use activity::UserActivityStore;
pub use department::DepartmentStore;
pub use filter::Conditions;
pub use organization::OrganizationStore;
pub use role::RoleStore;
pub use session::{AuthSessionStore, OtpSessionStore};
pub use sqlite::SqliteStore;
pub use tx::Tx;
pub use user::UserStore;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Params, Row, params, params_from_iter};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{SortBy, Status};

/// A row type backed by one table.
pub trait Record: Sized {
    const TABLE: &'static str;
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Column used for `ORDER BY` under the given sort.
    fn sort_column(sort: SortBy) -> &'static str {
        match sort {
            SortBy::Alphabetical => "name",
            SortBy::DateCreated => "created_at",
            SortBy::DateUpdated => "updated_at",
        }
    }
}

pub(crate) fn find_one<T: Record, P: Params>(
    conn: &Connection,
    clause: &str,
    params: P,
) -> Result<Option<T>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {} ORDER BY id LIMIT 1",
        T::COLUMNS,
        T::TABLE,
        clause
    );
    conn.query_row(&sql, params, T::from_row)
        .optional()
        .map_err(Error::from)
}

pub(crate) fn find_by_id<T: Record>(conn: &Connection, id: i64) -> Result<Option<T>> {
    find_one(conn, "id = ?1", params![id])
}

/// Fetches every row whose `column` matches one of `keys`, in id order.
pub(crate) fn find_many_in<T: Record, K: rusqlite::ToSql>(
    conn: &Connection,
    column: &str,
    keys: &[K],
) -> Result<Vec<T>> {
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; keys.len()].join(", ");
    let sql = format!(
        "SELECT {} FROM {} WHERE {} IN ({}) ORDER BY id",
        T::COLUMNS,
        T::TABLE,
        column,
        placeholders
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(keys.iter()), T::from_row)?;
    let records = rows.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Reads back the row created by the last `INSERT` on this connection.
pub(crate) fn inserted<T: Record>(conn: &Connection) -> Result<T> {
    let id = conn.last_insert_rowid();
    find_by_id(conn, id)?.ok_or(Error::Database(rusqlite::Error::QueryReturnedNoRows))
}

pub(crate) fn delete_by_id<T: Record>(conn: &Connection, id: i64) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);
    let deleted = conn.execute(&sql, params![id])?;
    Ok(deleted > 0)
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

pub(crate) fn datetime_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    Ok(parse_datetime(&raw))
}

pub(crate) fn uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn opt_uuid_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        Uuid::parse_str(&s)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

pub(crate) fn status_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Status> {
    let raw: String = row.get(idx)?;
    Status::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown status '{raw}'").into(),
        )
    })
}
