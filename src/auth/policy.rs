use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::store::RoleStore;
use crate::types::{Auther, Permission};

/// Checks that the caller may exercise `permission`.
///
/// Admins always pass. Everyone else passes through their role: a management
/// role grants everything, otherwise the permission must be listed on it. The
/// role is loaded on every call so permission edits take effect immediately.
pub fn grant_permission(conn: &Connection, auther: &Auther, permission: Permission) -> Result<()> {
    if auther.is_admin {
        return Ok(());
    }

    let role_id = auther.role_id.ok_or(Error::PermissionDenied)?;
    let role = RoleStore::get_by_id(conn, role_id)?
        .ok_or_else(|| Error::not_found("role not found"))?;

    if role.is_management || role.permissions.contains(&permission) {
        Ok(())
    } else {
        Err(Error::PermissionDenied)
    }
}

pub fn require_admin(auther: &Auther) -> Result<()> {
    if auther.is_admin {
        Ok(())
    } else {
        Err(Error::PermissionDenied)
    }
}
