//! Request-scoped batch fetching.
//!
//! A [`Loader`] is built for one inbound request and dropped with it. Keys are
//! fetched in one query per batch and cached, including misses, so repeated
//! lookups within the request never hit the database twice.

use std::collections::HashMap;
use std::hash::Hash;

use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::store::{DepartmentStore, OrganizationStore, RoleStore, UserStore};
use crate::types::{Department, Organization, Role, User, UserActivity};

pub struct Loader<'c> {
    conn: &'c Connection,
    organizations: HashMap<Uuid, Option<Organization>>,
    departments: HashMap<i64, Option<Department>>,
    roles: HashMap<i64, Option<Role>>,
    users: HashMap<i64, Option<User>>,
    batches: usize,
}

fn load<K, V>(
    cache: &mut HashMap<K, Option<V>>,
    batches: &mut usize,
    keys: &[K],
    fetch: impl FnOnce(&[K]) -> Result<Vec<V>>,
    key_of: impl Fn(&V) -> K,
) -> Result<Vec<Option<V>>>
where
    K: Copy + Eq + Hash,
    V: Clone,
{
    let mut missing: Vec<K> = Vec::new();
    for key in keys {
        if !cache.contains_key(key) && !missing.contains(key) {
            missing.push(*key);
        }
    }

    if !missing.is_empty() {
        let found = fetch(&missing)?;
        *batches += 1;
        for key in &missing {
            cache.insert(*key, None);
        }
        for value in found {
            cache.insert(key_of(&value), Some(value));
        }
    }

    Ok(keys
        .iter()
        .map(|key| cache.get(key).cloned().flatten())
        .collect())
}

impl<'c> Loader<'c> {
    #[must_use]
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            organizations: HashMap::new(),
            departments: HashMap::new(),
            roles: HashMap::new(),
            users: HashMap::new(),
            batches: 0,
        }
    }

    /// Number of database round trips made so far.
    #[must_use]
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn organizations(&mut self, uids: &[Uuid]) -> Result<Vec<Option<Organization>>> {
        let conn = self.conn;
        load(
            &mut self.organizations,
            &mut self.batches,
            uids,
            |keys| OrganizationStore::get_many_by_uids(conn, keys),
            |org| org.uid,
        )
    }

    pub fn departments(&mut self, ids: &[i64]) -> Result<Vec<Option<Department>>> {
        let conn = self.conn;
        load(
            &mut self.departments,
            &mut self.batches,
            ids,
            |keys| DepartmentStore::get_many_by_ids(conn, keys),
            |dept| dept.id,
        )
    }

    pub fn roles(&mut self, ids: &[i64]) -> Result<Vec<Option<Role>>> {
        let conn = self.conn;
        load(
            &mut self.roles,
            &mut self.batches,
            ids,
            |keys| RoleStore::get_many_by_ids(conn, keys),
            |role| role.id,
        )
    }

    pub fn users(&mut self, ids: &[i64]) -> Result<Vec<Option<User>>> {
        let conn = self.conn;
        load(
            &mut self.users,
            &mut self.batches,
            ids,
            |keys| UserStore::get_many_by_ids(conn, keys),
            |user| user.id,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleDetails {
    #[serde(flatten)]
    pub role: Role,
    pub organization: Option<Organization>,
    pub department: Option<Department>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDetails {
    #[serde(flatten)]
    pub activity: UserActivity,
    pub user: Option<User>,
}

/// Attaches each role's organization and department.
pub fn expand_roles(loader: &mut Loader<'_>, roles: Vec<Role>) -> Result<Vec<RoleDetails>> {
    let org_uids: Vec<Uuid> = roles.iter().map(|r| r.org_uid).collect();
    let dept_ids: Vec<i64> = roles.iter().map(|r| r.department_id).collect();

    let organizations = loader.organizations(&org_uids)?;
    let departments = loader.departments(&dept_ids)?;

    Ok(roles
        .into_iter()
        .zip(organizations)
        .zip(departments)
        .map(|((role, organization), department)| RoleDetails {
            role,
            organization,
            department,
        })
        .collect())
}

/// Attaches the acting user to each activity.
pub fn expand_activities(
    loader: &mut Loader<'_>,
    activities: Vec<UserActivity>,
) -> Result<Vec<ActivityDetails>> {
    let user_ids: Vec<i64> = activities.iter().map(|a| a.user_id).collect();
    let users = loader.users(&user_ids)?;

    Ok(activities
        .into_iter()
        .zip(users)
        .map(|(activity, user)| ActivityDetails { activity, user })
        .collect())
}
