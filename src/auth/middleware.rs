use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::helpers::{organization_from_headers, token_from_headers};
use crate::resolver::RequestContext;
use crate::server::AppState;
use crate::server::response::ApiError;

/// The credentials and tenant header a request carries, plus the instant
/// after which its transaction may no longer commit.
///
/// Extraction never authenticates; the resolver does that per operation so
/// public routes and protected routes share one path.
pub struct Caller(pub RequestContext);

impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let organization = organization_from_headers(&parts.headers)
            .map_err(|_| ApiError::bad_request("organization header is not a valid uid"))?;

        Ok(Caller(RequestContext {
            token: token_from_headers(&parts.headers),
            organization,
            deadline: Some(Instant::now() + state.request_timeout),
        }))
    }
}
