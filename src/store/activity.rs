use rusqlite::{Connection, Row, params};
use uuid::Uuid;

use super::{
    Conditions, Record, datetime_column, find_by_id, format_datetime, inserted, opt_uuid_column,
    uuid_column,
};
use crate::error::Result;
use crate::types::{ActivityFilter, SearchFilter, SortBy, UserActivity};

impl Record for UserActivity {
    const TABLE: &'static str = "user_activities";
    const COLUMNS: &'static str =
        "id, user_id, org_uid, action, object_id, object_type, session_token, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(UserActivity {
            id: row.get(0)?,
            user_id: row.get(1)?,
            org_uid: opt_uuid_column(row, 2)?,
            action: row.get(3)?,
            object_id: row.get(4)?,
            object_type: row.get(5)?,
            session_token: uuid_column(row, 6)?,
            created_at: datetime_column(row, 7)?,
        })
    }

    fn sort_column(sort: SortBy) -> &'static str {
        match sort {
            SortBy::Alphabetical => "action",
            SortBy::DateCreated | SortBy::DateUpdated => "created_at",
        }
    }
}

/// Append-only: no update or delete.
pub struct UserActivityStore;

impl UserActivityStore {
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<UserActivity>> {
        find_by_id(conn, id)
    }

    pub fn list(
        conn: &Connection,
        search: &SearchFilter,
        filter: &ActivityFilter,
        scope: Option<Uuid>,
    ) -> Result<(Vec<UserActivity>, i64)> {
        Conditions::new()
            .org("org_uid", scope)
            .eq_opt("user_id", filter.user_id)
            .page(conn, search)
    }

    pub fn insert(conn: &Connection, activity: &UserActivity) -> Result<UserActivity> {
        conn.execute(
            "INSERT INTO user_activities (user_id, org_uid, action, object_id, object_type,
                 session_token, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                activity.user_id,
                activity.org_uid.map(|uid| uid.to_string()),
                activity.action,
                activity.object_id,
                activity.object_type,
                activity.session_token.to_string(),
                format_datetime(&activity.created_at),
            ],
        )?;
        inserted(conn)
    }
}
