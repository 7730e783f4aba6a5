use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use uuid::Uuid;

use super::{
    Conditions, Record, datetime_column, delete_by_id, find_by_id, find_many_in, find_one,
    format_datetime, inserted, status_column, uuid_column,
};
use crate::error::Result;
use crate::types::{Permission, Role, RoleFilter, SearchFilter};

impl Record for Role {
    const TABLE: &'static str = "roles";
    const COLUMNS: &'static str = "id, code, org_uid, department_id, name, permissions, \
         is_management, status, is_final, is_archived, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let raw_permissions: String = row.get(5)?;
        let permissions: Vec<Permission> = serde_json::from_str(&raw_permissions)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

        Ok(Role {
            id: row.get(0)?,
            code: row.get(1)?,
            org_uid: uuid_column(row, 2)?,
            department_id: row.get(3)?,
            name: row.get(4)?,
            permissions,
            is_management: row.get(6)?,
            status: status_column(row, 7)?,
            is_final: row.get(8)?,
            is_archived: row.get(9)?,
            created_at: datetime_column(row, 10)?,
            updated_at: datetime_column(row, 11)?,
        })
    }
}

fn encode_permissions(permissions: &[Permission]) -> rusqlite::Result<String> {
    serde_json::to_string(permissions).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub struct RoleStore;

impl RoleStore {
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Role>> {
        find_by_id(conn, id)
    }

    pub fn get_by_code(conn: &Connection, code: &str) -> Result<Option<Role>> {
        find_one(conn, "code = ?1", params![code])
    }

    pub fn get_many_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<Role>> {
        find_many_in(conn, "id", ids)
    }

    /// Rows owned by one organization, used for code generation.
    pub fn count_in_org(conn: &Connection, org_uid: Uuid) -> Result<i64> {
        Conditions::new()
            .org("org_uid", Some(org_uid))
            .count::<Role>(conn)
    }

    pub fn list(
        conn: &Connection,
        search: &SearchFilter,
        filter: &RoleFilter,
        scope: Option<Uuid>,
    ) -> Result<(Vec<Role>, i64)> {
        Conditions::new()
            .org("org_uid", scope)
            .eq_opt("department_id", filter.department_id)
            .lifecycle(search)
            .page(conn, search)
    }

    pub fn insert(conn: &Connection, role: &Role) -> Result<Role> {
        conn.execute(
            "INSERT INTO roles (code, org_uid, department_id, name, permissions, is_management,
                 status, is_final, is_archived, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                role.code,
                role.org_uid.to_string(),
                role.department_id,
                role.name,
                encode_permissions(&role.permissions)?,
                role.is_management,
                role.status.as_str(),
                role.is_final,
                role.is_archived,
                format_datetime(&role.created_at),
                format_datetime(&role.updated_at),
            ],
        )?;
        inserted(conn)
    }

    pub fn update(conn: &Connection, role: &Role) -> Result<()> {
        conn.execute(
            "UPDATE roles SET department_id = ?1, name = ?2, permissions = ?3, is_management = ?4,
                 status = ?5, is_final = ?6, is_archived = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                role.department_id,
                role.name,
                encode_permissions(&role.permissions)?,
                role.is_management,
                role.status.as_str(),
                role.is_final,
                role.is_archived,
                format_datetime(&role.updated_at),
                role.id,
            ],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        delete_by_id::<Role>(conn, id)
    }
}
