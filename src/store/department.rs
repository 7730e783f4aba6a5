use rusqlite::{Connection, Row, params};
use uuid::Uuid;

use super::{
    Conditions, Record, datetime_column, delete_by_id, find_by_id, find_many_in, find_one,
    format_datetime, inserted, status_column, uuid_column,
};
use crate::error::Result;
use crate::types::{Department, SearchFilter};

impl Record for Department {
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static str =
        "id, code, org_uid, name, status, is_final, is_archived, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Department {
            id: row.get(0)?,
            code: row.get(1)?,
            org_uid: uuid_column(row, 2)?,
            name: row.get(3)?,
            status: status_column(row, 4)?,
            is_final: row.get(5)?,
            is_archived: row.get(6)?,
            created_at: datetime_column(row, 7)?,
            updated_at: datetime_column(row, 8)?,
        })
    }
}

pub struct DepartmentStore;

impl DepartmentStore {
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Department>> {
        find_by_id(conn, id)
    }

    pub fn get_by_code(conn: &Connection, code: &str) -> Result<Option<Department>> {
        find_one(conn, "code = ?1", params![code])
    }

    pub fn get_many_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<Department>> {
        find_many_in(conn, "id", ids)
    }

    /// Rows owned by one organization, used for code generation.
    pub fn count_in_org(conn: &Connection, org_uid: Uuid) -> Result<i64> {
        Conditions::new()
            .org("org_uid", Some(org_uid))
            .count::<Department>(conn)
    }

    pub fn list(
        conn: &Connection,
        search: &SearchFilter,
        scope: Option<Uuid>,
    ) -> Result<(Vec<Department>, i64)> {
        Conditions::new()
            .org("org_uid", scope)
            .lifecycle(search)
            .page(conn, search)
    }

    pub fn insert(conn: &Connection, dept: &Department) -> Result<Department> {
        conn.execute(
            "INSERT INTO departments (code, org_uid, name, status, is_final, is_archived,
                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                dept.code,
                dept.org_uid.to_string(),
                dept.name,
                dept.status.as_str(),
                dept.is_final,
                dept.is_archived,
                format_datetime(&dept.created_at),
                format_datetime(&dept.updated_at),
            ],
        )?;
        inserted(conn)
    }

    pub fn update(conn: &Connection, dept: &Department) -> Result<()> {
        conn.execute(
            "UPDATE departments SET name = ?1, status = ?2, is_final = ?3, is_archived = ?4,
                 updated_at = ?5
             WHERE id = ?6",
            params![
                dept.name,
                dept.status.as_str(),
                dept.is_final,
                dept.is_archived,
                format_datetime(&dept.updated_at),
                dept.id,
            ],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        delete_by_id::<Department>(conn, id)
    }
}
