//! Request payloads accepted by the lifecycle services.
//!
//! String fields default to empty so that a missing field reaches the
//! service validation and fails with a message naming it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Logo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateOrganization {
    pub name: String,
    pub sector: String,
    pub website: Option<String>,
    pub logo: Option<Logo>,
}

/// Field-level patch. An empty `website` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub website: Option<String>,
    pub logo: Option<Logo>,
}

/// Bootstrap of a new tenant together with its first manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterOrganization {
    pub org_name: String,
    pub sector: String,
    pub website: Option<String>,
    pub logo: Option<Logo>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateDepartment {
    pub org_uid: Uuid,
    pub name: String,
    pub is_final: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateDepartment {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRole {
    pub org_uid: Uuid,
    pub department_id: i64,
    pub name: String,
    pub is_management: bool,
    pub permissions: Vec<String>,
    pub is_final: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateRole {
    pub name: Option<String>,
    pub department_id: Option<i64>,
    pub is_management: Option<bool>,
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub org_uid: Option<Uuid>,
    pub role_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub otp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationFilter {
    pub sector: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleFilter {
    pub department_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFilter {
    pub role_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFilter {
    pub user_id: Option<i64>,
}
