//! Request orchestration.
//!
//! Every operation resolves the caller, checks permission, computes the
//! tenant scope, and then runs the service call. Mutations run in one
//! transaction together with their journal entry and commit only when both
//! succeed; any error drops the transaction, which rolls it back.

mod activity;
mod auth;
mod department;
mod input;
mod organization;
mod role;
mod user;

pub use input::{
    DepartmentInput, LookupQuery, OrganizationLookup, RoleInput, SuperAdminInput, UserInput,
    UserLookup,
};

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::auth::{TenantScope, grant_permission, require_admin, resolve};
use crate::error::{Error, Result};
use crate::service::activity::{Audited, NewActivity, record};
use crate::store::{SqliteStore, Tx};
use crate::types::{Action, Auther, Permission};

/// Per-request inputs that used to travel through ambient context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Raw bearer token as presented by the client.
    pub token: Option<String>,
    /// Organization requested by the client. Only honored for admins.
    pub organization: Option<Uuid>,
    /// Work still uncommitted at this instant is rolled back.
    pub deadline: Option<Instant>,
}

impl RequestContext {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_organization(mut self, organization: Uuid) -> Self {
        self.organization = Some(organization);
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

pub struct Resolver {
    store: Arc<SqliteStore>,
}

impl Resolver {
    #[must_use]
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// Runs a read against the shared connection. The lock is released on return.
    fn read<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.store.conn();
        f(&conn)
    }

    fn caller(&self, ctx: &RequestContext) -> Result<Auther> {
        self.read(|conn| resolve(conn, ctx.token.as_deref(), Utc::now()))
    }

    fn authorize(&self, ctx: &RequestContext, permission: Permission) -> Result<Auther> {
        self.read(|conn| {
            let auther = resolve(conn, ctx.token.as_deref(), Utc::now())?;
            grant_permission(conn, &auther, permission)?;
            Ok(auther)
        })
    }

    fn authorize_admin(&self, ctx: &RequestContext) -> Result<Auther> {
        let auther = self.caller(ctx)?;
        require_admin(&auther)?;
        Ok(auther)
    }

    fn scope(auther: &Auther, requested: Option<Uuid>) -> Result<TenantScope> {
        TenantScope::for_caller(auther, requested)
    }

    /// The organization a new row belongs to. Non-admins always get their own.
    fn target_org(
        auther: &Auther,
        requested: Option<Uuid>,
        ctx: &RequestContext,
        missing: Error,
    ) -> Result<Uuid> {
        if auther.is_admin {
            requested.or(ctx.organization).ok_or(missing)
        } else {
            auther.org_uid.ok_or(Error::PermissionDenied)
        }
    }

    /// Runs an unaudited unit of work in its own transaction.
    fn transact<T>(&self, ctx: &RequestContext, f: impl FnOnce(&Tx<'_>) -> Result<T>) -> Result<T> {
        let tx = self.store.begin()?;
        let value = f(&tx)?;
        Self::commit(ctx, tx)?;
        Ok(value)
    }

    /// Runs a mutation and journals it in the same transaction.
    fn mutate<T: Audited>(
        &self,
        ctx: &RequestContext,
        auther: &Auther,
        action: Action,
        f: impl FnOnce(&Tx<'_>) -> Result<T>,
    ) -> Result<T> {
        let tx = self.store.begin()?;
        let value = f(&tx)?;
        record(
            &tx,
            NewActivity::by(auther, T::OBJECT_TYPE, action, value.object_id()),
        )?;
        Self::commit(ctx, tx)?;
        Ok(value)
    }

    /// Commits unless the request ran out of time, in which case the
    /// dropped `Tx` rolls back.
    fn commit(ctx: &RequestContext, tx: Tx<'_>) -> Result<()> {
        if ctx.is_expired() {
            tracing::warn!("Request deadline passed before commit, rolling back");
            return Err(Error::Timeout);
        }
        tx.commit()
    }
}
