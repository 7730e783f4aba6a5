use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use super::Page;
use crate::auth::TenantScope;
use crate::error::{Error, Result};
use crate::store::{Tx, UserActivityStore};
use crate::types::{
    Action, ActivityFilter, Auther, Department, ObjectType, Organization, Role, SearchFilter, User,
    UserActivity, action_tag,
};

/// A journal entry waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: i64,
    pub org_uid: Option<Uuid>,
    pub action: String,
    pub object_id: Option<i64>,
    pub object_type: Option<ObjectType>,
    pub session_token: Uuid,
}

impl NewActivity {
    /// An entry for `auther` acting on one object.
    #[must_use]
    pub fn by(auther: &Auther, object: ObjectType, action: Action, object_id: i64) -> Self {
        Self {
            user_id: auther.id,
            org_uid: auther.org_uid,
            action: action_tag(object, action),
            object_id: Some(object_id),
            object_type: Some(object),
            session_token: auther.session_token,
        }
    }
}

/// Objects whose mutations are journaled.
pub trait Audited {
    const OBJECT_TYPE: ObjectType;

    fn object_id(&self) -> i64;
}

impl Audited for Organization {
    const OBJECT_TYPE: ObjectType = ObjectType::Organization;

    fn object_id(&self) -> i64 {
        self.id
    }
}

impl Audited for Department {
    const OBJECT_TYPE: ObjectType = ObjectType::Department;

    fn object_id(&self) -> i64 {
        self.id
    }
}

impl Audited for Role {
    const OBJECT_TYPE: ObjectType = ObjectType::Role;

    fn object_id(&self) -> i64 {
        self.id
    }
}

impl Audited for User {
    const OBJECT_TYPE: ObjectType = ObjectType::User;

    fn object_id(&self) -> i64 {
        self.id
    }
}

impl Audited for Auther {
    const OBJECT_TYPE: ObjectType = ObjectType::Auther;

    fn object_id(&self) -> i64 {
        self.id
    }
}

/// Appends one journal entry inside the caller's transaction.
pub fn record(tx: &Tx<'_>, activity: NewActivity) -> Result<UserActivity> {
    if activity.user_id <= 0 {
        return Err(Error::bad_request("actor user id is required"));
    }
    if activity.action.trim().is_empty() {
        return Err(Error::bad_request("activity action is required"));
    }

    let row = UserActivityStore::insert(
        tx,
        &UserActivity {
            id: 0,
            user_id: activity.user_id,
            org_uid: activity.org_uid,
            action: activity.action,
            object_id: activity.object_id,
            object_type: activity.object_type.map(|t| t.as_str().to_string()),
            session_token: activity.session_token,
            created_at: Utc::now(),
        },
    )?;

    tracing::debug!(
        "Recorded activity {} by user {} on {:?}",
        row.action,
        row.user_id,
        row.object_id
    );
    Ok(row)
}

pub fn list(
    conn: &Connection,
    search: &SearchFilter,
    filter: &ActivityFilter,
    scope: TenantScope,
) -> Result<Page<UserActivity>> {
    UserActivityStore::list(conn, search, filter, scope.org_uid()).map(Page::from)
}

pub fn get_by_id(conn: &Connection, id: i64, scope: TenantScope) -> Result<UserActivity> {
    let activity = UserActivityStore::get_by_id(conn, id)?
        .ok_or_else(|| Error::not_found("activity not found"))?;
    scope.ensure(activity.org_uid, "activity")?;
    Ok(activity)
}
