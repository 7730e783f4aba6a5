use chrono::Utc;

use super::{RequestContext, Resolver};
use crate::auth::{TenantScope, generate_otp, login, logout};
use crate::error::{Error, Result};
use crate::service::activity::{NewActivity, record};
use crate::service::user;
use crate::store::UserStore;
use crate::types::{
    Action, Auther, LoginRequest, ObjectType, OtpRequest, OtpSession, Permission, UpdateUser, User,
};

impl Resolver {
    /// The permission names a role may carry.
    #[must_use]
    pub fn permissions(&self) -> Vec<&'static str> {
        Permission::catalog_strings()
    }

    /// Issues a one-time login code for the user with the given email or phone.
    pub fn generate_otp(&self, ctx: &RequestContext, req: &OtpRequest) -> Result<OtpSession> {
        self.transact(ctx, |tx| generate_otp(tx, req, Utc::now()))
    }

    /// Trades a one-time code for a session and journals the login.
    pub fn login(&self, ctx: &RequestContext, req: &LoginRequest) -> Result<Auther> {
        let auther = self.transact(ctx, |tx| {
            let auther = login(tx, req, Utc::now())?;
            record(
                tx,
                NewActivity::by(&auther, ObjectType::Auther, Action::Login, auther.id),
            )?;
            Ok(auther)
        })?;

        tracing::info!("User {} logged in", auther.id);
        Ok(auther)
    }

    pub fn logout(&self, ctx: &RequestContext) -> Result<()> {
        let auther = self.caller(ctx)?;
        self.mutate(ctx, &auther, Action::Logout, |tx| {
            logout(tx, &auther)?;
            Ok(auther.clone())
        })?;
        Ok(())
    }

    /// The resolved identity behind the request.
    pub fn auther(&self, ctx: &RequestContext) -> Result<Auther> {
        self.caller(ctx)
    }

    pub fn me(&self, ctx: &RequestContext) -> Result<User> {
        let auther = self.caller(ctx)?;
        self.read(|conn| {
            UserStore::get_by_id(conn, auther.id)?.ok_or_else(|| Error::not_found("user not found"))
        })
    }

    /// Lets callers edit their own profile. Role changes are ignored.
    pub fn change_details(&self, ctx: &RequestContext, req: &UpdateUser) -> Result<User> {
        let auther = self.caller(ctx)?;
        let patch = UpdateUser {
            role_id: None,
            ..req.clone()
        };
        self.mutate(ctx, &auther, Action::Update, |tx| {
            user::update(tx, auther.id, &patch, TenantScope::All)
        })
    }
}
