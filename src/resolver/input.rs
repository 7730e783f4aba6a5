use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Department creation. `org_uid` is only read for admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentInput {
    pub org_uid: Option<Uuid>,
    pub name: String,
    pub is_final: bool,
}

/// Role creation. `org_uid` is only read for admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleInput {
    pub org_uid: Option<Uuid>,
    pub department_id: i64,
    pub name: String,
    pub is_management: bool,
    pub permissions: Vec<String>,
    pub is_final: bool,
}

/// Member creation. `org_uid` is only read for admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub org_uid: Option<Uuid>,
    pub role_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperAdminInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Lookup by id or code. Id wins when both are given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupQuery {
    pub id: Option<i64>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationLookup {
    pub uid: Option<Uuid>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserLookup {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
