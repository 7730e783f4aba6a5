use chrono::Utc;
use rusqlite::Connection;

use super::{Page, code, department, lifecycle, organization, require, require_if_present};
use crate::auth::TenantScope;
use crate::error::{Error, Result};
use crate::store::{RoleStore, Tx};
use crate::types::{
    CreateRole, Permission, Role, RoleFilter, SearchFilter, Status, UpdateRole,
    normalize_permissions,
};

/// Management roles carry no explicit list.
fn role_permissions(is_management: bool, requested: &[String]) -> Vec<Permission> {
    if is_management {
        Vec::new()
    } else {
        normalize_permissions(requested)
    }
}

pub fn create(tx: &Tx<'_>, req: &CreateRole) -> Result<Role> {
    require(&req.name, "role name")?;
    if req.department_id == 0 {
        return Err(Error::bad_request("department id is required"));
    }

    let org = organization::verify_active(tx, req.org_uid)?;
    let dept = department::verify_ready(tx, req.department_id, org.uid)?;
    let count = RoleStore::count_in_org(tx, org.uid)?;
    let now = Utc::now();

    RoleStore::insert(
        tx,
        &Role {
            id: 0,
            code: code::role_code(&org.code, count),
            org_uid: org.uid,
            department_id: dept.id,
            name: req.name.trim().to_string(),
            permissions: role_permissions(req.is_management, &req.permissions),
            is_management: req.is_management,
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

pub fn list(
    conn: &Connection,
    search: &SearchFilter,
    filter: &RoleFilter,
    scope: TenantScope,
) -> Result<Page<Role>> {
    RoleStore::list(conn, search, filter, scope.org_uid()).map(Page::from)
}

pub fn get_by_id(conn: &Connection, id: i64, scope: TenantScope) -> Result<Role> {
    let role = RoleStore::get_by_id(conn, id)?.ok_or_else(|| Error::not_found("role not found"))?;
    scope.ensure(Some(role.org_uid), "role")?;
    Ok(role)
}

pub fn get_by_code(conn: &Connection, code: &str, scope: TenantScope) -> Result<Role> {
    let role =
        RoleStore::get_by_code(conn, code)?.ok_or_else(|| Error::not_found("role not found"))?;
    scope.ensure(Some(role.org_uid), "role")?;
    Ok(role)
}

/// Patches a role. Finalization only happens through [`finalize`].
pub fn update(tx: &Tx<'_>, id: i64, req: &UpdateRole, scope: TenantScope) -> Result<Role> {
    require_if_present(req.name.as_deref(), "role name")?;
    if req.department_id == Some(0) {
        return Err(Error::bad_request("department id is required"));
    }

    let mut role = get_by_id(tx, id, scope)?;
    organization::verify_active(tx, role.org_uid)?;
    let department_id = req.department_id.unwrap_or(role.department_id);
    let dept = department::verify_ready(tx, department_id, role.org_uid)?;

    if let Some(name) = &req.name {
        role.name = name.trim().to_string();
    }
    role.department_id = dept.id;

    if let Some(is_management) = req.is_management {
        role.is_management = is_management;
    }
    if role.is_management {
        role.permissions.clear();
    } else if let Some(permissions) = &req.permissions {
        role.permissions = role_permissions(false, permissions);
    }
    role.updated_at = Utc::now();

    RoleStore::update(tx, &role)?;
    Ok(role)
}

pub fn finalize(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<Role> {
    let mut role = get_by_id(tx, id, scope)?;
    lifecycle::finalize(&mut role, Utc::now())?;
    RoleStore::update(tx, &role)?;
    Ok(role)
}

pub fn archive(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<Role> {
    let mut role = get_by_id(tx, id, scope)?;
    lifecycle::archive(&mut role, Utc::now())?;
    RoleStore::update(tx, &role)?;
    Ok(role)
}

pub fn unarchive(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<Role> {
    let mut role = get_by_id(tx, id, scope)?;
    lifecycle::unarchive(&mut role, Utc::now())?;
    RoleStore::update(tx, &role)?;
    Ok(role)
}

pub fn delete(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<Role> {
    let role = get_by_id(tx, id, scope)?;
    RoleStore::delete(tx, role.id)?;
    Ok(role)
}
