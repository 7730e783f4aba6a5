use rusqlite::{Connection, Row, params};
use uuid::Uuid;

use super::{
    Conditions, Record, datetime_column, delete_by_id, find_by_id, find_many_in, find_one,
    format_datetime, inserted, opt_uuid_column, status_column,
};
use crate::error::Result;
use crate::types::{SearchFilter, SortBy, User, UserFilter};

impl Record for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = "id, first_name, last_name, email, phone, is_admin, org_uid, \
         role_id, status, is_final, is_archived, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            is_admin: row.get(5)?,
            org_uid: opt_uuid_column(row, 6)?,
            role_id: row.get(7)?,
            status: status_column(row, 8)?,
            is_final: row.get(9)?,
            is_archived: row.get(10)?,
            created_at: datetime_column(row, 11)?,
            updated_at: datetime_column(row, 12)?,
        })
    }

    fn sort_column(sort: SortBy) -> &'static str {
        match sort {
            SortBy::Alphabetical => "first_name",
            SortBy::DateCreated => "created_at",
            SortBy::DateUpdated => "updated_at",
        }
    }
}

pub struct UserStore;

impl UserStore {
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
        find_by_id(conn, id)
    }

    pub fn get_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        find_one(conn, "email = ?1", params![email])
    }

    pub fn get_by_phone(conn: &Connection, phone: &str) -> Result<Option<User>> {
        find_one(conn, "phone = ?1", params![phone])
    }

    pub fn get_many_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<User>> {
        find_many_in(conn, "id", ids)
    }

    /// Whether any global admin exists yet.
    pub fn has_admin(conn: &Connection) -> Result<bool> {
        let admins = Conditions::new().eq("is_admin", true).count::<User>(conn)?;
        Ok(admins > 0)
    }

    pub fn list(
        conn: &Connection,
        search: &SearchFilter,
        filter: &UserFilter,
        scope: Option<Uuid>,
    ) -> Result<(Vec<User>, i64)> {
        Conditions::new()
            .org("org_uid", scope)
            .eq_opt("role_id", filter.role_id)
            .lifecycle(search)
            .page(conn, search)
    }

    pub fn insert(conn: &Connection, user: &User) -> Result<User> {
        conn.execute(
            "INSERT INTO users (first_name, last_name, email, phone, is_admin, org_uid, role_id,
                 status, is_final, is_archived, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                user.first_name,
                user.last_name,
                user.email,
                user.phone,
                user.is_admin,
                user.org_uid.map(|uid| uid.to_string()),
                user.role_id,
                user.status.as_str(),
                user.is_final,
                user.is_archived,
                format_datetime(&user.created_at),
                format_datetime(&user.updated_at),
            ],
        )?;
        inserted(conn)
    }

    pub fn update(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            "UPDATE users SET first_name = ?1, last_name = ?2, email = ?3, phone = ?4,
                 role_id = ?5, status = ?6, is_final = ?7, is_archived = ?8, updated_at = ?9
             WHERE id = ?10",
            params![
                user.first_name,
                user.last_name,
                user.email,
                user.phone,
                user.role_id,
                user.status.as_str(),
                user.is_final,
                user.is_archived,
                format_datetime(&user.updated_at),
                user.id,
            ],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        delete_by_id::<User>(conn, id)
    }
}
