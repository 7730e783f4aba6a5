use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use super::{Page, code, lifecycle, organization, require, require_if_present};
use crate::auth::TenantScope;
use crate::error::{Error, Result};
use crate::store::{DepartmentStore, Tx};
use crate::types::{CreateDepartment, Department, SearchFilter, Status, UpdateDepartment};

pub fn create(tx: &Tx<'_>, req: &CreateDepartment) -> Result<Department> {
    if req.org_uid.is_nil() {
        return Err(Error::bad_request("organization uid is required"));
    }
    require(&req.name, "department name")?;

    let org = organization::verify_active(tx, req.org_uid)?;
    let count = DepartmentStore::count_in_org(tx, org.uid)?;
    let now = Utc::now();

    DepartmentStore::insert(
        tx,
        &Department {
            id: 0,
            code: code::department_code(&org.code, count),
            org_uid: org.uid,
            name: req.name.trim().to_string(),
            status: if req.is_final {
                Status::Active
            } else {
                Status::Created
            },
            is_final: req.is_final,
            is_archived: false,
            created_at: now,
            updated_at: now,
        },
    )
}

/// Loads a department that a role is about to reference.
pub fn verify_ready(conn: &Connection, id: i64, org_uid: Uuid) -> Result<Department> {
    let dept = DepartmentStore::get_by_id(conn, id)?
        .filter(|d| d.org_uid == org_uid)
        .ok_or_else(|| Error::not_found("department not found"))?;

    if !dept.is_final {
        return Err(Error::forbidden("department is not yet final"));
    }
    if dept.is_archived {
        return Err(Error::forbidden("department is archived"));
    }

    Ok(dept)
}

pub fn list(conn: &Connection, search: &SearchFilter, scope: TenantScope) -> Result<Page<Department>> {
    DepartmentStore::list(conn, search, scope.org_uid()).map(Page::from)
}

pub fn get_by_id(conn: &Connection, id: i64, scope: TenantScope) -> Result<Department> {
    let dept = DepartmentStore::get_by_id(conn, id)?
        .ok_or_else(|| Error::not_found("department not found"))?;
    scope.ensure(Some(dept.org_uid), "department")?;
    Ok(dept)
}

pub fn get_by_code(conn: &Connection, code: &str, scope: TenantScope) -> Result<Department> {
    let dept = DepartmentStore::get_by_code(conn, code)?
        .ok_or_else(|| Error::not_found("department not found"))?;
    scope.ensure(Some(dept.org_uid), "department")?;
    Ok(dept)
}

pub fn update(
    tx: &Tx<'_>,
    id: i64,
    req: &UpdateDepartment,
    scope: TenantScope,
) -> Result<Department> {
    require_if_present(req.name.as_deref(), "department name")?;

    let mut dept = get_by_id(tx, id, scope)?;
    organization::verify_active(tx, dept.org_uid)?;

    if let Some(name) = &req.name {
        dept.name = name.trim().to_string();
    }
    dept.updated_at = Utc::now();

    DepartmentStore::update(tx, &dept)?;
    Ok(dept)
}

pub fn finalize(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<Department> {
    let mut dept = get_by_id(tx, id, scope)?;
    lifecycle::finalize(&mut dept, Utc::now())?;
    DepartmentStore::update(tx, &dept)?;
    Ok(dept)
}

pub fn archive(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<Department> {
    let mut dept = get_by_id(tx, id, scope)?;
    lifecycle::archive(&mut dept, Utc::now())?;
    DepartmentStore::update(tx, &dept)?;
    Ok(dept)
}

pub fn unarchive(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<Department> {
    let mut dept = get_by_id(tx, id, scope)?;
    lifecycle::unarchive(&mut dept, Utc::now())?;
    DepartmentStore::update(tx, &dept)?;
    Ok(dept)
}

pub fn delete(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<Department> {
    let dept = get_by_id(tx, id, scope)?;
    DepartmentStore::delete(tx, dept.id)?;
    Ok(dept)
}
