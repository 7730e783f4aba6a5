mod helpers;
mod identity;
mod login;
mod middleware;
mod policy;
mod scope;

pub use helpers::{
    ORGANIZATION_HEADER, SESSION_COOKIE, extract_bearer_token, organization_from_headers,
    token_from_headers,
};
pub use identity::{is_expired, resolve};
pub use login::{OTP_LENGTH, generate_otp, login, logout, otp_ttl, session_ttl};
pub use middleware::Caller;
pub use policy::{grant_permission, require_admin};
pub use scope::TenantScope;
