use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use super::{Page, code, department, lifecycle, require, require_if_present, role, user};
use crate::auth::TenantScope;
use crate::error::{Error, Result};
use crate::store::{OrganizationStore, Tx};
use crate::types::{
    CreateDepartment, CreateOrganization, CreateRole, CreateUser, Department, Organization,
    OrganizationFilter, RegisterOrganization, Role, SearchFilter, Status, UpdateOrganization, User,
};

pub const MANAGEMENT: &str = "Management";

/// Everything created by [`register`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub organization: Organization,
    pub department: Department,
    pub role: Role,
    pub user: User,
}

pub fn validate(req: &CreateOrganization) -> Result<()> {
    require(&req.name, "organization name")?;
    require(&req.sector, "organization sector")?;
    Ok(())
}

pub fn create(tx: &Tx<'_>, req: &CreateOrganization) -> Result<Organization> {
    validate(req)?;

    let count = OrganizationStore::count(tx)?;
    let now = Utc::now();

    let org = OrganizationStore::insert(
        tx,
        &Organization {
            id: 0,
            uid: Uuid::new_v4(),
            code: code::organization_code(count),
            name: req.name.trim().to_string(),
            website: req.website.clone().filter(|w| !w.trim().is_empty()),
            logo: req.logo.clone(),
            sector: req.sector.trim().to_string(),
            status: Status::Active,
            is_final: true,
            is_archived: false,
            created_at: now,
            updated_at: now,
        },
    )?;

    tracing::info!("Created organization {} ({})", org.code, org.uid);
    Ok(org)
}

/// Creates a tenant with a management department, role, and first user.
/// Any failure leaves nothing behind once the transaction is dropped.
pub fn register(tx: &Tx<'_>, req: &RegisterOrganization) -> Result<Registration> {
    require(&req.org_name, "organization name")?;
    require(&req.sector, "organization sector")?;
    user::validate_names(&req.first_name, &req.last_name, &req.email, &req.phone)?;

    let organization = create(
        tx,
        &CreateOrganization {
            name: req.org_name.clone(),
            sector: req.sector.clone(),
            website: req.website.clone(),
            logo: req.logo.clone(),
        },
    )?;

    let department = department::create(
        tx,
        &CreateDepartment {
            org_uid: organization.uid,
            name: MANAGEMENT.to_string(),
            is_final: true,
        },
    )?;

    let role = role::create(
        tx,
        &CreateRole {
            org_uid: organization.uid,
            department_id: department.id,
            name: MANAGEMENT.to_string(),
            is_management: true,
            permissions: Vec::new(),
            is_final: true,
        },
    )?;

    let user = user::create(
        tx,
        &CreateUser {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            is_admin: false,
            org_uid: Some(organization.uid),
            role_id: Some(role.id),
        },
    )?;

    Ok(Registration {
        organization,
        department,
        role,
        user,
    })
}

/// Loads an organization that other rows are about to reference.
pub fn verify_active(conn: &Connection, uid: Uuid) -> Result<Organization> {
    let org = OrganizationStore::get_by_uid(conn, uid)?
        .ok_or_else(|| Error::not_found("organization does not exist"))?;

    if org.is_archived {
        return Err(Error::forbidden("organization is archived"));
    }

    Ok(org)
}

pub fn list(
    conn: &Connection,
    search: &SearchFilter,
    filter: &OrganizationFilter,
    scope: TenantScope,
) -> Result<Page<Organization>> {
    OrganizationStore::list(conn, search, filter, scope.org_uid()).map(Page::from)
}

pub fn get_by_uid(conn: &Connection, uid: Uuid, scope: TenantScope) -> Result<Organization> {
    let org = OrganizationStore::get_by_uid(conn, uid)?
        .ok_or_else(|| Error::not_found("organization not found"))?;
    scope.ensure(Some(org.uid), "organization")?;
    Ok(org)
}

pub fn get_by_code(conn: &Connection, code: &str, scope: TenantScope) -> Result<Organization> {
    let org = OrganizationStore::get_by_code(conn, code)?
        .ok_or_else(|| Error::not_found("organization not found"))?;
    scope.ensure(Some(org.uid), "organization")?;
    Ok(org)
}

pub fn update(
    tx: &Tx<'_>,
    uid: Uuid,
    req: &UpdateOrganization,
    scope: TenantScope,
) -> Result<Organization> {
    require_if_present(req.name.as_deref(), "organization name")?;
    require_if_present(req.sector.as_deref(), "organization sector")?;

    let mut org = get_by_uid(tx, uid, scope)?;

    if let Some(name) = &req.name {
        org.name = name.trim().to_string();
    }
    if let Some(sector) = &req.sector {
        org.sector = sector.trim().to_string();
    }
    if let Some(website) = &req.website {
        org.website = Some(website.trim().to_string()).filter(|w| !w.is_empty());
    }
    if let Some(logo) = &req.logo {
        org.logo = Some(logo.clone());
    }
    org.updated_at = Utc::now();

    OrganizationStore::update(tx, &org)?;
    Ok(org)
}

pub fn finalize(tx: &Tx<'_>, uid: Uuid, scope: TenantScope) -> Result<Organization> {
    let mut org = get_by_uid(tx, uid, scope)?;
    lifecycle::finalize(&mut org, Utc::now())?;
    OrganizationStore::update(tx, &org)?;
    Ok(org)
}

pub fn archive(tx: &Tx<'_>, uid: Uuid, scope: TenantScope) -> Result<Organization> {
    let mut org = get_by_uid(tx, uid, scope)?;
    lifecycle::archive(&mut org, Utc::now())?;
    OrganizationStore::update(tx, &org)?;
    Ok(org)
}

pub fn unarchive(tx: &Tx<'_>, uid: Uuid, scope: TenantScope) -> Result<Organization> {
    let mut org = get_by_uid(tx, uid, scope)?;
    lifecycle::unarchive(&mut org, Utc::now())?;
    OrganizationStore::update(tx, &org)?;
    Ok(org)
}

/// Hard delete. Departments, roles, and members go with it.
pub fn delete(tx: &Tx<'_>, uid: Uuid, scope: TenantScope) -> Result<Organization> {
    let org = get_by_uid(tx, uid, scope)?;
    OrganizationStore::delete(tx, org.id)?;
    tracing::info!("Deleted organization {} ({})", org.code, org.uid);
    Ok(org)
}
