mod activities;
mod auth;
mod departments;
mod organizations;
mod roles;
mod users;

use std::sync::Arc;

use axum::Router;

use crate::server::AppState;

pub use activities::activities_router;
pub use auth::auth_router;
pub use departments::departments_router;
pub use organizations::organizations_router;
pub use roles::roles_router;
pub use users::users_router;

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth_router())
        .nest("/organizations", organizations_router())
        .nest("/departments", departments_router())
        .nest("/roles", roles_router())
        .nest("/users", users_router())
        .nest("/activities", activities_router())
}
