use chrono::{DateTime, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::store::{AuthSessionStore, UserStore};
use crate::types::Auther;

/// Expiry is compared at whole-second resolution in UTC.
#[must_use]
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at.timestamp() < now.timestamp()
}

/// Resolves a bearer token into the calling identity. Read-only.
pub fn resolve(conn: &Connection, token: Option<&str>, now: DateTime<Utc>) -> Result<Auther> {
    let raw = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(Error::Unauthenticated)?;

    let token = Uuid::parse_str(raw).map_err(|_| Error::InvalidSession)?;

    let session = AuthSessionStore::get_by_token(conn, token)?.ok_or(Error::InvalidSession)?;

    if !session.is_valid {
        return Err(Error::SessionInvalidated);
    }

    if is_expired(session.expires_at, now) {
        return Err(Error::SessionExpired);
    }

    let user = UserStore::get_by_id(conn, session.user_id)?.ok_or(Error::InvalidSession)?;

    Ok(Auther::from_session(&user, &session))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn test_expiry_ignores_subsecond_difference() {
        let expires = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let later_same_second = expires + Duration::milliseconds(900);
        assert!(!is_expired(expires, later_same_second));
        assert!(is_expired(expires, expires + Duration::seconds(1)));
        assert!(!is_expired(expires, expires - Duration::days(1)));
    }

    #[test]
    fn test_missing_token_is_unauthenticated() {
        let conn = Connection::open_in_memory().unwrap();
        let now = Utc::now();
        assert!(matches!(resolve(&conn, None, now), Err(Error::Unauthenticated)));
        assert!(matches!(
            resolve(&conn, Some("   "), now),
            Err(Error::Unauthenticated)
        ));
    }

    #[test]
    fn test_malformed_token_is_invalid_session() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            resolve(&conn, Some("not-a-uuid"), Utc::now()),
            Err(Error::InvalidSession)
        ));
    }
}
