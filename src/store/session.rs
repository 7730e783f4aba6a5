use rusqlite::{Connection, Row, params};
use uuid::Uuid;

use super::{Record, datetime_column, find_one, format_datetime, inserted, uuid_column};
use crate::error::Result;
use crate::types::{AuthSession, OtpSession};

impl Record for AuthSession {
    const TABLE: &'static str = "auth_sessions";
    const COLUMNS: &'static str = "id, user_id, token, is_valid, expires_at, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(AuthSession {
            id: row.get(0)?,
            user_id: row.get(1)?,
            token: uuid_column(row, 2)?,
            is_valid: row.get(3)?,
            expires_at: datetime_column(row, 4)?,
            created_at: datetime_column(row, 5)?,
        })
    }
}

impl Record for OtpSession {
    const TABLE: &'static str = "otp_sessions";
    const COLUMNS: &'static str = "id, user_id, token, is_valid, expires_at, created_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(OtpSession {
            id: row.get(0)?,
            user_id: row.get(1)?,
            token: row.get(2)?,
            is_valid: row.get(3)?,
            expires_at: datetime_column(row, 4)?,
            created_at: datetime_column(row, 5)?,
        })
    }
}

pub struct AuthSessionStore;

impl AuthSessionStore {
    pub fn get_by_token(conn: &Connection, token: Uuid) -> Result<Option<AuthSession>> {
        find_one(conn, "token = ?1", params![token.to_string()])
    }

    pub fn insert(conn: &Connection, session: &AuthSession) -> Result<AuthSession> {
        conn.execute(
            "INSERT INTO auth_sessions (user_id, token, is_valid, expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session.user_id,
                session.token.to_string(),
                session.is_valid,
                format_datetime(&session.expires_at),
                format_datetime(&session.created_at),
            ],
        )?;
        inserted(conn)
    }

    pub fn update(conn: &Connection, session: &AuthSession) -> Result<()> {
        conn.execute(
            "UPDATE auth_sessions SET is_valid = ?1, expires_at = ?2 WHERE id = ?3",
            params![
                session.is_valid,
                format_datetime(&session.expires_at),
                session.id,
            ],
        )?;
        Ok(())
    }
}

pub struct OtpSessionStore;

impl OtpSessionStore {
    /// Codes are short, so lookups are always qualified by the owning user.
    pub fn get_by_token(conn: &Connection, user_id: i64, token: &str) -> Result<Option<OtpSession>> {
        find_one(
            conn,
            "user_id = ?1 AND token = ?2",
            params![user_id, token],
        )
    }

    pub fn insert(conn: &Connection, otp: &OtpSession) -> Result<OtpSession> {
        conn.execute(
            "INSERT INTO otp_sessions (user_id, token, is_valid, expires_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                otp.user_id,
                otp.token,
                otp.is_valid,
                format_datetime(&otp.expires_at),
                format_datetime(&otp.created_at),
            ],
        )?;
        inserted(conn)
    }

    pub fn update(conn: &Connection, otp: &OtpSession) -> Result<()> {
        conn.execute(
            "UPDATE otp_sessions SET is_valid = ?1 WHERE id = ?2",
            params![otp.is_valid, otp.id],
        )?;
        Ok(())
    }
}
