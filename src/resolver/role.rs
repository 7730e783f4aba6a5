use uuid::Uuid;

use super::{LookupQuery, RequestContext, Resolver, RoleInput};
use crate::error::{Error, Result};
use crate::service::loader::{Loader, RoleDetails, expand_roles};
use crate::service::{Page, role};
use crate::types::{Action, CreateRole, Permission, Role, RoleFilter, SearchFilter, UpdateRole};

impl Resolver {
    pub fn roles(
        &self,
        ctx: &RequestContext,
        org_uid: Option<Uuid>,
        search: &SearchFilter,
        filter: &RoleFilter,
    ) -> Result<Page<Role>> {
        let auther = self.authorize(ctx, Permission::ReadRole)?;
        let scope = Self::scope(&auther, org_uid.or(ctx.organization))?;
        self.read(|conn| role::list(conn, search, filter, scope))
    }

    /// Lists roles with their organization and department attached.
    pub fn roles_detailed(
        &self,
        ctx: &RequestContext,
        org_uid: Option<Uuid>,
        search: &SearchFilter,
        filter: &RoleFilter,
    ) -> Result<Page<RoleDetails>> {
        let auther = self.authorize(ctx, Permission::ReadRole)?;
        let scope = Self::scope(&auther, org_uid.or(ctx.organization))?;
        self.read(|conn| {
            let page = role::list(conn, search, filter, scope)?;
            let mut loader = Loader::new(conn);
            Ok(Page {
                items: expand_roles(&mut loader, page.items)?,
                total: page.total,
            })
        })
    }

    pub fn role(&self, ctx: &RequestContext, lookup: &LookupQuery) -> Result<Role> {
        let auther = self.authorize(ctx, Permission::ReadRole)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        let code = lookup.code.as_deref().filter(|c| !c.trim().is_empty());

        self.read(|conn| match (lookup.id, code) {
            (Some(id), _) => role::get_by_id(conn, id, scope),
            (None, Some(code)) => role::get_by_code(conn, code.trim(), scope),
            (None, None) => Err(Error::forbidden("no query parameters provided")),
        })
    }

    pub fn role_create(&self, ctx: &RequestContext, input: &RoleInput) -> Result<Role> {
        let auther = self.authorize(ctx, Permission::CreateRole)?;
        let org_uid = Self::target_org(
            &auther,
            input.org_uid,
            ctx,
            Error::bad_request("org uid is required"),
        )?;

        let req = CreateRole {
            org_uid,
            department_id: input.department_id,
            name: input.name.clone(),
            is_management: input.is_management,
            permissions: input.permissions.clone(),
            is_final: input.is_final,
        };
        self.mutate(ctx, &auther, Action::Create, |tx| role::create(tx, &req))
    }

    pub fn role_update(&self, ctx: &RequestContext, id: i64, req: &UpdateRole) -> Result<Role> {
        let auther = self.authorize(ctx, Permission::UpdateRole)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Update, |tx| role::update(tx, id, req, scope))
    }

    pub fn role_finalize(&self, ctx: &RequestContext, id: i64) -> Result<Role> {
        let auther = self.authorize(ctx, Permission::UpdateRole)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Finalize, |tx| role::finalize(tx, id, scope))
    }

    pub fn role_archive(&self, ctx: &RequestContext, id: i64) -> Result<Role> {
        let auther = self.authorize(ctx, Permission::UpdateRole)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Archive, |tx| role::archive(tx, id, scope))
    }

    pub fn role_unarchive(&self, ctx: &RequestContext, id: i64) -> Result<Role> {
        let auther = self.authorize(ctx, Permission::UpdateRole)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Unarchive, |tx| {
            role::unarchive(tx, id, scope)
        })
    }

    pub fn role_delete(&self, ctx: &RequestContext, id: i64) -> Result<Role> {
        let auther = self.authorize(ctx, Permission::DeleteRole)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Delete, |tx| role::delete(tx, id, scope))
    }
}
