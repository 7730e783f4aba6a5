use uuid::Uuid;

use super::{OrganizationLookup, RequestContext, Resolver};
use crate::error::{Error, Result};
use crate::service::organization::{self, Registration};
use crate::service::Page;
use crate::types::{
    Action, CreateOrganization, Organization, OrganizationFilter, Permission,
    RegisterOrganization, SearchFilter, UpdateOrganization,
};

impl Resolver {
    /// Public bootstrap of a new tenant. Not journaled: there is no session yet.
    pub fn register(
        &self,
        ctx: &RequestContext,
        req: &RegisterOrganization,
    ) -> Result<Registration> {
        let registration = self.transact(ctx, |tx| organization::register(tx, req))?;
        tracing::info!(
            "Registered organization {} with manager {}",
            registration.organization.code,
            registration.user.id
        );
        Ok(registration)
    }

    pub fn organizations(
        &self,
        ctx: &RequestContext,
        search: &SearchFilter,
        filter: &OrganizationFilter,
    ) -> Result<Page<Organization>> {
        let auther = self.authorize_admin(ctx)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.read(|conn| organization::list(conn, search, filter, scope))
    }

    pub fn organization(
        &self,
        ctx: &RequestContext,
        lookup: &OrganizationLookup,
    ) -> Result<Organization> {
        let auther = self.authorize(ctx, Permission::ReadOrganization)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        let code = lookup.code.as_deref().filter(|c| !c.trim().is_empty());

        self.read(|conn| match (lookup.uid, code) {
            (Some(uid), _) => organization::get_by_uid(conn, uid, scope),
            (None, Some(code)) => organization::get_by_code(conn, code.trim(), scope),
            (None, None) => Err(Error::forbidden("no query parameters provided")),
        })
    }

    pub fn organization_create(
        &self,
        ctx: &RequestContext,
        req: &CreateOrganization,
    ) -> Result<Organization> {
        let auther = self.authorize_admin(ctx)?;
        self.mutate(ctx, &auther, Action::Create, |tx| organization::create(tx, req))
    }

    pub fn organization_update(
        &self,
        ctx: &RequestContext,
        uid: Uuid,
        req: &UpdateOrganization,
    ) -> Result<Organization> {
        let auther = self.authorize(ctx, Permission::UpdateOrganization)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Update, |tx| {
            organization::update(tx, uid, req, scope)
        })
    }

    pub fn organization_finalize(&self, ctx: &RequestContext, uid: Uuid) -> Result<Organization> {
        let auther = self.authorize(ctx, Permission::UpdateOrganization)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Finalize, |tx| {
            organization::finalize(tx, uid, scope)
        })
    }

    // Archive and unarchive check the admin flag directly instead of a
    // permission grant.
    pub fn organization_archive(&self, ctx: &RequestContext, uid: Uuid) -> Result<Organization> {
        let auther = self.authorize_admin(ctx)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Archive, |tx| {
            organization::archive(tx, uid, scope)
        })
    }

    pub fn organization_unarchive(&self, ctx: &RequestContext, uid: Uuid) -> Result<Organization> {
        let auther = self.authorize_admin(ctx)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Unarchive, |tx| {
            organization::unarchive(tx, uid, scope)
        })
    }

    pub fn organization_delete(&self, ctx: &RequestContext, uid: Uuid) -> Result<Organization> {
        let auther = self.authorize_admin(ctx)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Delete, |tx| {
            organization::delete(tx, uid, scope)
        })
    }
}
