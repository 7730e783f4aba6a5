use rusqlite::{Connection, Row, params};
use uuid::Uuid;

use super::{
    Conditions, Record, datetime_column, delete_by_id, find_by_id, find_many_in, find_one,
    format_datetime, inserted, status_column, uuid_column,
};
use crate::error::Result;
use crate::types::{Logo, Organization, OrganizationFilter, SearchFilter};

impl Record for Organization {
    const TABLE: &'static str = "organizations";
    const COLUMNS: &'static str = "id, uid, code, name, website, logo_name, logo_url, sector, \
         status, is_final, is_archived, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let logo_name: Option<String> = row.get(5)?;
        let logo_url: Option<String> = row.get(6)?;
        Ok(Organization {
            id: row.get(0)?,
            uid: uuid_column(row, 1)?,
            code: row.get(2)?,
            name: row.get(3)?,
            website: row.get(4)?,
            logo: logo_name
                .zip(logo_url)
                .map(|(name, url)| Logo { name, url }),
            sector: row.get(7)?,
            status: status_column(row, 8)?,
            is_final: row.get(9)?,
            is_archived: row.get(10)?,
            created_at: datetime_column(row, 11)?,
            updated_at: datetime_column(row, 12)?,
        })
    }
}

pub struct OrganizationStore;

impl OrganizationStore {
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Organization>> {
        find_by_id(conn, id)
    }

    pub fn get_by_uid(conn: &Connection, uid: Uuid) -> Result<Option<Organization>> {
        find_one(conn, "uid = ?1", params![uid.to_string()])
    }

    pub fn get_by_code(conn: &Connection, code: &str) -> Result<Option<Organization>> {
        find_one(conn, "code = ?1", params![code])
    }

    pub fn get_many_by_uids(conn: &Connection, uids: &[Uuid]) -> Result<Vec<Organization>> {
        let keys: Vec<String> = uids.iter().map(Uuid::to_string).collect();
        find_many_in(conn, "uid", &keys)
    }

    /// Global row count, used for code generation.
    pub fn count(conn: &Connection) -> Result<i64> {
        Conditions::new().count::<Organization>(conn)
    }

    pub fn list(
        conn: &Connection,
        search: &SearchFilter,
        filter: &OrganizationFilter,
        scope: Option<Uuid>,
    ) -> Result<(Vec<Organization>, i64)> {
        Conditions::new()
            .org("uid", scope)
            .eq_opt("sector", filter.sector.clone())
            .lifecycle(search)
            .page(conn, search)
    }

    pub fn insert(conn: &Connection, org: &Organization) -> Result<Organization> {
        conn.execute(
            "INSERT INTO organizations (uid, code, name, website, logo_name, logo_url, sector,
                 status, is_final, is_archived, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                org.uid.to_string(),
                org.code,
                org.name,
                org.website,
                org.logo.as_ref().map(|l| l.name.as_str()),
                org.logo.as_ref().map(|l| l.url.as_str()),
                org.sector,
                org.status.as_str(),
                org.is_final,
                org.is_archived,
                format_datetime(&org.created_at),
                format_datetime(&org.updated_at),
            ],
        )?;
        inserted(conn)
    }

    pub fn update(conn: &Connection, org: &Organization) -> Result<()> {
        conn.execute(
            "UPDATE organizations SET name = ?1, website = ?2, logo_name = ?3, logo_url = ?4,
                 sector = ?5, status = ?6, is_final = ?7, is_archived = ?8, updated_at = ?9
             WHERE id = ?10",
            params![
                org.name,
                org.website,
                org.logo.as_ref().map(|l| l.name.as_str()),
                org.logo.as_ref().map(|l| l.url.as_str()),
                org.sector,
                org.status.as_str(),
                org.is_final,
                org.is_archived,
                format_datetime(&org.updated_at),
                org.id,
            ],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        delete_by_id::<Organization>(conn, id)
    }
}
