use uuid::Uuid;

use super::{DepartmentInput, LookupQuery, RequestContext, Resolver};
use crate::error::{Error, Result};
use crate::service::{Page, department};
use crate::types::{
    Action, CreateDepartment, Department, Permission, SearchFilter, UpdateDepartment,
};

impl Resolver {
    pub fn departments(
        &self,
        ctx: &RequestContext,
        org_uid: Option<Uuid>,
        search: &SearchFilter,
    ) -> Result<Page<Department>> {
        let auther = self.authorize(ctx, Permission::ReadDepartment)?;
        let scope = Self::scope(&auther, org_uid.or(ctx.organization))?;
        self.read(|conn| department::list(conn, search, scope))
    }

    pub fn department(&self, ctx: &RequestContext, lookup: &LookupQuery) -> Result<Department> {
        let auther = self.authorize(ctx, Permission::ReadDepartment)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        let code = lookup.code.as_deref().filter(|c| !c.trim().is_empty());

        self.read(|conn| match (lookup.id, code) {
            (Some(id), _) => department::get_by_id(conn, id, scope),
            (None, Some(code)) => department::get_by_code(conn, code.trim(), scope),
            (None, None) => Err(Error::forbidden("no query parameters provided")),
        })
    }

    pub fn department_create(
        &self,
        ctx: &RequestContext,
        input: &DepartmentInput,
    ) -> Result<Department> {
        let auther = self.authorize(ctx, Permission::CreateDepartment)?;
        let org_uid = Self::target_org(
            &auther,
            input.org_uid,
            ctx,
            Error::bad_request("org uid is required"),
        )?;

        let req = CreateDepartment {
            org_uid,
            name: input.name.clone(),
            is_final: input.is_final,
        };
        self.mutate(ctx, &auther, Action::Create, |tx| department::create(tx, &req))
    }

    pub fn department_update(
        &self,
        ctx: &RequestContext,
        id: i64,
        req: &UpdateDepartment,
    ) -> Result<Department> {
        let auther = self.authorize(ctx, Permission::UpdateDepartment)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Update, |tx| {
            department::update(tx, id, req, scope)
        })
    }

    pub fn department_finalize(&self, ctx: &RequestContext, id: i64) -> Result<Department> {
        let auther = self.authorize(ctx, Permission::UpdateDepartment)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Finalize, |tx| {
            department::finalize(tx, id, scope)
        })
    }

    pub fn department_archive(&self, ctx: &RequestContext, id: i64) -> Result<Department> {
        let auther = self.authorize(ctx, Permission::UpdateDepartment)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Archive, |tx| {
            department::archive(tx, id, scope)
        })
    }

    pub fn department_unarchive(&self, ctx: &RequestContext, id: i64) -> Result<Department> {
        let auther = self.authorize(ctx, Permission::UpdateDepartment)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Unarchive, |tx| {
            department::unarchive(tx, id, scope)
        })
    }

    pub fn department_delete(&self, ctx: &RequestContext, id: i64) -> Result<Department> {
        let auther = self.authorize(ctx, Permission::DeleteDepartment)?;
        let scope = Self::scope(&auther, ctx.organization)?;
        self.mutate(ctx, &auther, Action::Delete, |tx| {
            department::delete(tx, id, scope)
        })
    }
}
