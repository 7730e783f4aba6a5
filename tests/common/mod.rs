#![allow(dead_code)]

use std::sync::Arc;

use orgbook::resolver::{DepartmentInput, RequestContext, Resolver, RoleInput, UserInput};
use orgbook::service::organization::Registration;
use orgbook::service::user;
use orgbook::store::SqliteStore;
use orgbook::types::{CreateUser, LoginRequest, OtpRequest, RegisterOrganization, User};

pub const ADMIN_EMAIL: &str = "superadmin@example.com";

/// A resolver over an in-memory database with a logged-in super admin.
pub struct Fixture {
    pub resolver: Resolver,
    pub admin: RequestContext,
    pub admin_user: User,
}

impl Fixture {
    pub fn new() -> Self {
        let store = SqliteStore::open_in_memory().expect("open store");
        store.initialize().expect("apply schema");

        let tx = store.begin().expect("begin");
        let admin_user = user::create(
            &tx,
            &CreateUser {
                first_name: "Super".into(),
                last_name: "Admin".into(),
                email: ADMIN_EMAIL.into(),
                phone: "9000090000".into(),
                is_admin: true,
                org_uid: None,
                role_id: None,
            },
        )
        .expect("create admin");
        tx.commit().expect("commit");

        let resolver = Resolver::new(Arc::new(store));
        let admin = login(&resolver, ADMIN_EMAIL);

        Self {
            resolver,
            admin,
            admin_user,
        }
    }

    /// Applies extra SQL on top of the schema.
    pub fn install(&self, sql: &str) {
        self.resolver
            .store()
            .initialize_with_extensions(&[sql])
            .expect("apply extension");
    }

    /// Row count of a table, bypassing every scope.
    pub fn count(&self, table: &str) -> i64 {
        self.resolver
            .store()
            .conn()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("count rows")
    }

    pub fn login(&self, email: &str) -> RequestContext {
        login(&self.resolver, email)
    }

    /// Registers a tenant and logs in its manager.
    pub fn register(&self, name: &str) -> (Registration, RequestContext) {
        let slug = name.to_lowercase();
        let registration = self
            .resolver
            .register(&RequestContext::anonymous(), &RegisterOrganization {
                org_name: name.into(),
                sector: "Retail".into(),
                first_name: "Manager".into(),
                last_name: name.into(),
                email: format!("manager@{slug}.test"),
                phone: format!("555-{slug}"),
                ..RegisterOrganization::default()
            })
            .expect("register organization");
        let ctx = self.login(&registration.user.email);
        (registration, ctx)
    }

    /// Creates a member of the caller's organization whose role holds
    /// exactly `permissions`, and logs them in.
    pub fn member(
        &self,
        manager: &RequestContext,
        email: &str,
        permissions: &[&str],
    ) -> (User, RequestContext) {
        let department = self
            .resolver
            .department_create(
                manager,
                &DepartmentInput {
                    name: format!("Dept {email}"),
                    is_final: true,
                    ..DepartmentInput::default()
                },
            )
            .expect("create department");
        let role = self
            .resolver
            .role_create(
                manager,
                &RoleInput {
                    department_id: department.id,
                    name: format!("Role {email}"),
                    permissions: permissions.iter().map(|p| p.to_string()).collect(),
                    is_final: true,
                    ..RoleInput::default()
                },
            )
            .expect("create role");
        let user = self
            .resolver
            .user_create(
                manager,
                &UserInput {
                    first_name: "Member".into(),
                    last_name: email.into(),
                    email: email.into(),
                    phone: format!("phone-{email}"),
                    role_id: Some(role.id),
                    ..UserInput::default()
                },
            )
            .expect("create member");
        let ctx = self.login(email);
        (user, ctx)
    }
}

pub fn login(resolver: &Resolver, email: &str) -> RequestContext {
    let otp = resolver
        .generate_otp(&RequestContext::anonymous(), &OtpRequest {
            email: Some(email.into()),
            phone: None,
        })
        .expect("generate otp");
    let auther = resolver
        .login(&RequestContext::anonymous(), &LoginRequest {
            email: Some(email.into()),
            phone: None,
            otp: otp.token,
        })
        .expect("login");
    RequestContext::bearer(auther.session_token.to_string())
}
