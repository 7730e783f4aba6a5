use chrono::Utc;
use rusqlite::Connection;

use super::{Page, lifecycle, organization, require, require_if_present, role};
use crate::auth::TenantScope;
use crate::error::{Error, Result};
use crate::store::{Tx, UserStore};
use crate::types::{CreateUser, SearchFilter, Status, UpdateUser, User, UserFilter};

pub fn validate_names(first_name: &str, last_name: &str, email: &str, phone: &str) -> Result<()> {
    require(first_name, "first name")?;
    require(last_name, "last name")?;
    require(email, "email")?;
    require(phone, "phone")?;
    Ok(())
}

/// Email and phone are unique across all users. `except` skips the row
/// being updated.
fn ensure_unique(conn: &Connection, email: &str, phone: &str, except: Option<i64>) -> Result<()> {
    let other = |user: &User| Some(user.id) != except;

    if UserStore::get_by_email(conn, email)?.filter(other).is_some() {
        return Err(Error::bad_request("email already registered"));
    }
    if UserStore::get_by_phone(conn, phone)?.filter(other).is_some() {
        return Err(Error::bad_request("phone already registered"));
    }
    Ok(())
}

pub fn create(tx: &Tx<'_>, req: &CreateUser) -> Result<User> {
    validate_names(&req.first_name, &req.last_name, &req.email, &req.phone)?;

    let email = req.email.trim();
    let phone = req.phone.trim();
    ensure_unique(tx, email, phone, None)?;

    match req.org_uid {
        Some(org_uid) => {
            organization::verify_active(tx, org_uid)?;
            if let Some(role_id) = req.role_id {
                role::get_by_id(tx, role_id, TenantScope::Organization(org_uid))?;
            }
        }
        None if !req.is_admin => {
            return Err(Error::bad_request("organization uid is required"));
        }
        None if req.role_id.is_some() => {
            return Err(Error::bad_request("role requires an organization"));
        }
        None => {}
    }

    let now = Utc::now();
    let user = UserStore::insert(
        tx,
        &User {
            id: 0,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            is_admin: req.is_admin,
            org_uid: req.org_uid,
            role_id: req.role_id,
            status: Status::Active,
            is_final: true,
            is_archived: false,
            created_at: now,
            updated_at: now,
        },
    )?;

    tracing::info!("Created user {} (admin: {})", user.id, user.is_admin);
    Ok(user)
}

pub fn list(
    conn: &Connection,
    search: &SearchFilter,
    filter: &UserFilter,
    scope: TenantScope,
) -> Result<Page<User>> {
    UserStore::list(conn, search, filter, scope.org_uid()).map(Page::from)
}

fn scoped(user: Option<User>, scope: TenantScope) -> Result<User> {
    let user = user.ok_or_else(|| Error::not_found("user not found"))?;
    scope.ensure(user.org_uid, "user")?;
    Ok(user)
}

pub fn get_by_id(conn: &Connection, id: i64, scope: TenantScope) -> Result<User> {
    scoped(UserStore::get_by_id(conn, id)?, scope)
}

pub fn get_by_email(conn: &Connection, email: &str, scope: TenantScope) -> Result<User> {
    scoped(UserStore::get_by_email(conn, email.trim())?, scope)
}

pub fn get_by_phone(conn: &Connection, phone: &str, scope: TenantScope) -> Result<User> {
    scoped(UserStore::get_by_phone(conn, phone.trim())?, scope)
}

pub fn update(tx: &Tx<'_>, id: i64, req: &UpdateUser, scope: TenantScope) -> Result<User> {
    require_if_present(req.first_name.as_deref(), "first name")?;
    require_if_present(req.last_name.as_deref(), "last name")?;
    require_if_present(req.email.as_deref(), "email")?;
    require_if_present(req.phone.as_deref(), "phone")?;

    let mut user = get_by_id(tx, id, scope)?;

    if let Some(first_name) = &req.first_name {
        user.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = &req.last_name {
        user.last_name = last_name.trim().to_string();
    }
    if let Some(email) = &req.email {
        user.email = email.trim().to_string();
    }
    if let Some(phone) = &req.phone {
        user.phone = phone.trim().to_string();
    }
    ensure_unique(tx, &user.email, &user.phone, Some(user.id))?;

    if let Some(role_id) = req.role_id {
        let org_uid = user
            .org_uid
            .ok_or_else(|| Error::bad_request("role requires an organization"))?;
        role::get_by_id(tx, role_id, TenantScope::Organization(org_uid))?;
        user.role_id = Some(role_id);
    }
    user.updated_at = Utc::now();

    UserStore::update(tx, &user)?;
    Ok(user)
}

pub fn finalize(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<User> {
    let mut user = get_by_id(tx, id, scope)?;
    lifecycle::finalize(&mut user, Utc::now())?;
    UserStore::update(tx, &user)?;
    Ok(user)
}

pub fn archive(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<User> {
    let mut user = get_by_id(tx, id, scope)?;
    lifecycle::archive(&mut user, Utc::now())?;
    UserStore::update(tx, &user)?;
    Ok(user)
}

pub fn unarchive(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<User> {
    let mut user = get_by_id(tx, id, scope)?;
    lifecycle::unarchive(&mut user, Utc::now())?;
    UserStore::update(tx, &user)?;
    Ok(user)
}

pub fn delete(tx: &Tx<'_>, id: i64, scope: TenantScope) -> Result<User> {
    let user = get_by_id(tx, id, scope)?;
    UserStore::delete(tx, user.id)?;
    Ok(user)
}
