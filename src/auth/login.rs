use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use rusqlite::Connection;
use uuid::Uuid;

use super::identity::is_expired;
use crate::error::{Error, Result};
use crate::store::{AuthSessionStore, OtpSessionStore, Tx, UserStore};
use crate::types::{AuthSession, Auther, LoginRequest, OtpRequest, OtpSession, User};

pub const OTP_LENGTH: usize = 5;

pub fn otp_ttl() -> Duration {
    Duration::minutes(5)
}

pub fn session_ttl() -> Duration {
    Duration::days(30)
}

fn generate_otp_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(OTP_LENGTH)
        .map(char::from)
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Finds the user a one-time code is addressed to. Email takes precedence.
fn find_recipient(conn: &Connection, email: Option<&str>, phone: Option<&str>) -> Result<User> {
    match (non_empty(email), non_empty(phone)) {
        (Some(email), _) => UserStore::get_by_email(conn, email)?
            .ok_or_else(|| Error::forbidden("no user found with given email")),
        (None, Some(phone)) => UserStore::get_by_phone(conn, phone)?
            .ok_or_else(|| Error::forbidden("no user found with given phone")),
        (None, None) => Err(Error::bad_request("email or phone is required")),
    }
}

/// Issues a short-lived one-time code. Delivery is the caller's concern.
pub fn generate_otp(tx: &Tx<'_>, req: &OtpRequest, now: DateTime<Utc>) -> Result<OtpSession> {
    let user = find_recipient(tx, req.email.as_deref(), req.phone.as_deref())?;

    let otp = OtpSessionStore::insert(
        tx,
        &OtpSession {
            id: 0,
            user_id: user.id,
            token: generate_otp_code(),
            is_valid: true,
            expires_at: now + otp_ttl(),
            created_at: now,
        },
    )?;

    tracing::debug!("Issued one-time code for user {}", user.id);
    Ok(otp)
}

/// Exchanges a one-time code for an auth session.
pub fn login(tx: &Tx<'_>, req: &LoginRequest, now: DateTime<Utc>) -> Result<Auther> {
    let user = find_recipient(tx, req.email.as_deref(), req.phone.as_deref())?;

    if user.is_archived {
        return Err(Error::forbidden("user is archived"));
    }

    let mut otp = OtpSessionStore::get_by_token(tx, user.id, req.otp.trim())?
        .ok_or_else(|| Error::forbidden("otp is invalid"))?;

    if !otp.is_valid {
        return Err(Error::unauthorized("otp is not valid"));
    }

    if is_expired(otp.expires_at, now) {
        return Err(Error::unauthorized("otp is expired"));
    }

    otp.is_valid = false;
    OtpSessionStore::update(tx, &otp)?;

    let session = AuthSessionStore::insert(
        tx,
        &AuthSession {
            id: 0,
            user_id: user.id,
            token: Uuid::new_v4(),
            is_valid: true,
            expires_at: now + session_ttl(),
            created_at: now,
        },
    )?;

    Ok(Auther::from_session(&user, &session))
}

/// Invalidates the caller's session.
pub fn logout(tx: &Tx<'_>, auther: &Auther) -> Result<AuthSession> {
    let mut session = AuthSessionStore::get_by_token(tx, auther.session_token)?
        .ok_or(Error::InvalidSession)?;

    if !session.is_valid {
        return Err(Error::SessionInvalidated);
    }

    session.is_valid = false;
    AuthSessionStore::update(tx, &session)?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_code_shape() {
        let code = generate_otp_code();
        assert_eq!(code.len(), OTP_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_recipient_requires_email_or_phone() {
        let conn = Connection::open_in_memory().unwrap();
        let err = find_recipient(&conn, Some("  "), None).unwrap_err();
        assert!(matches!(err, Error::BadRequest(ref msg) if msg == "email or phone is required"));
    }
}
