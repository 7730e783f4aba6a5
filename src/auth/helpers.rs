use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use uuid::Uuid;

/// Header carrying an admin's requested tenant.
pub const ORGANIZATION_HEADER: &str = "Organization";

/// Cookie consulted when no Authorization header is present.
pub const SESSION_COOKIE: &str = "jwt";

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOrganizationHeader;

/// Extracts the token from a `Bearer` Authorization header.
pub fn extract_bearer_token(header: &str) -> Option<String> {
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Finds a cookie value in a `Cookie` header.
pub fn extract_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

/// Reads the caller's token from the Authorization header, then the session cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    bearer.or_else(|| {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .find_map(|h| extract_cookie(h, SESSION_COOKIE))
    })
}

/// Parses the `Organization` header. Absent or blank is `None`.
pub fn organization_from_headers(
    headers: &HeaderMap,
) -> Result<Option<Uuid>, InvalidOrganizationHeader> {
    let Some(value) = headers.get(ORGANIZATION_HEADER) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| InvalidOrganizationHeader)?
        .trim();
    if value.is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(value)
        .map(Some)
        .map_err(|_| InvalidOrganizationHeader)
}
