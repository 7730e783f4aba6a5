use uuid::Uuid;

use super::{RequestContext, Resolver, SuperAdminInput, UserInput, UserLookup};
use crate::error::{Error, Result};
use crate::service::{Page, user};
use crate::types::{Action, CreateUser, Permission, SearchFilter, UpdateUser, User, UserFilter};

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Resolver {
    pub fn users(
        &self,
        ctx: &RequestContext,
        org_uid: Option<Uuid>,
        search: &SearchFilter,
        filter: &UserFilter,
    ) -> Result<Page<User>> {
        let auther = self.authorize(ctx, Permission::ReadUser)?;
        let scope = Self::scope(&auther, org_uid.or(ctx.organization))?;
        self.read(|conn| user::list(conn, search, filter, scope))
    }

    pub fn user(&self, ctx: &RequestContext, lookup: &UserLookup) -> Result<User> {
        let auther = self.authorize(ctx, Permission::ReadUser)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        let email = non_blank(lookup.email.as_deref());
        let phone = non_blank(lookup.phone.as_deref());

        self.read(|conn| match (lookup.id, email, phone) {
            (Some(id), _, _) => user::get_by_id(conn, id, scope),
            (None, Some(email), _) => user::get_by_email(conn, email, scope),
            (None, None, Some(phone)) => user::get_by_phone(conn, phone, scope),
            (None, None, None) => Err(Error::forbidden("no query parameters provided")),
        })
    }

    pub fn user_create(&self, ctx: &RequestContext, input: &UserInput) -> Result<User> {
        let auther = self.authorize(ctx, Permission::CreateUser)?;
        user::validate_names(&input.first_name, &input.last_name, &input.email, &input.phone)?;
        let org_uid = Self::target_org(
            &auther,
            input.org_uid,
            ctx,
            Error::forbidden("organization uid is required"),
        )?;
        let role_id = input
            .role_id
            .filter(|id| *id != 0)
            .ok_or_else(|| Error::forbidden("role id is required"))?;

        let req = CreateUser {
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            is_admin: false,
            org_uid: Some(org_uid),
            role_id: Some(role_id),
        };
        self.mutate(ctx, &auther, Action::Create, |tx| user::create(tx, &req))
    }

    /// Creates another global admin. Admin only.
    pub fn super_admin_create(&self, ctx: &RequestContext, input: &SuperAdminInput) -> Result<User> {
        let auther = self.authorize_admin(ctx)?;
        let req = CreateUser {
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            is_admin: true,
            org_uid: None,
            role_id: None,
        };
        self.mutate(ctx, &auther, Action::Create, |tx| user::create(tx, &req))
    }

    pub fn user_update(&self, ctx: &RequestContext, id: i64, req: &UpdateUser) -> Result<User> {
        let auther = self.authorize(ctx, Permission::UpdateUser)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Update, |tx| user::update(tx, id, req, scope))
    }

    pub fn user_finalize(&self, ctx: &RequestContext, id: i64) -> Result<User> {
        let auther = self.authorize(ctx, Permission::UpdateUser)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Finalize, |tx| user::finalize(tx, id, scope))
    }

    pub fn user_archive(&self, ctx: &RequestContext, id: i64) -> Result<User> {
        let auther = self.authorize(ctx, Permission::UpdateUser)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Archive, |tx| user::archive(tx, id, scope))
    }

    pub fn user_unarchive(&self, ctx: &RequestContext, id: i64) -> Result<User> {
        let auther = self.authorize(ctx, Permission::UpdateUser)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Unarchive, |tx| {
            user::unarchive(tx, id, scope)
        })
    }

    pub fn user_delete(&self, ctx: &RequestContext, id: i64) -> Result<User> {
        let auther = self.authorize(ctx, Permission::DeleteUser)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Delete, |tx| user::delete(tx, id, scope))
    }
}
