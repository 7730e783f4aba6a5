use std::fmt;

use serde::{Deserialize, Serialize};

/// A named capability that a non-management role may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    UploadFile,
    CreateOrganization,
    ReadOrganization,
    UpdateOrganization,
    DeleteOrganization,
    CreateDepartment,
    ReadDepartment,
    UpdateDepartment,
    DeleteDepartment,
    CreateRole,
    ReadRole,
    UpdateRole,
    DeleteRole,
    CreateUser,
    ReadUser,
    UpdateUser,
    DeleteUser,
    ReadUserActivity,
}

impl Permission {
    /// Every permission a role can be granted, in display order.
    pub const CATALOG: [Permission; 18] = [
        Permission::UploadFile,
        Permission::CreateOrganization,
        Permission::ReadOrganization,
        Permission::UpdateOrganization,
        Permission::DeleteOrganization,
        Permission::CreateDepartment,
        Permission::ReadDepartment,
        Permission::UpdateDepartment,
        Permission::DeleteDepartment,
        Permission::CreateRole,
        Permission::ReadRole,
        Permission::UpdateRole,
        Permission::DeleteRole,
        Permission::CreateUser,
        Permission::ReadUser,
        Permission::UpdateUser,
        Permission::DeleteUser,
        Permission::ReadUserActivity,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::UploadFile => "UPLOAD_FILE",
            Permission::CreateOrganization => "CREATE_ORGANIZATION",
            Permission::ReadOrganization => "READ_ORGANIZATION",
            Permission::UpdateOrganization => "UPDATE_ORGANIZATION",
            Permission::DeleteOrganization => "DELETE_ORGANIZATION",
            Permission::CreateDepartment => "CREATE_DEPARTMENT",
            Permission::ReadDepartment => "READ_DEPARTMENT",
            Permission::UpdateDepartment => "UPDATE_DEPARTMENT",
            Permission::DeleteDepartment => "DELETE_DEPARTMENT",
            Permission::CreateRole => "CREATE_ROLE",
            Permission::ReadRole => "READ_ROLE",
            Permission::UpdateRole => "UPDATE_ROLE",
            Permission::DeleteRole => "DELETE_ROLE",
            Permission::CreateUser => "CREATE_USER",
            Permission::ReadUser => "READ_USER",
            Permission::UpdateUser => "UPDATE_USER",
            Permission::DeleteUser => "DELETE_USER",
            Permission::ReadUserActivity => "READ_USER_ACTIVITY",
        }
    }

    /// Converts a permission string to its catalog entry.
    pub fn parse(s: &str) -> Option<Permission> {
        Self::CATALOG.into_iter().find(|p| p.as_str() == s)
    }

    /// Returns the catalog as strings.
    #[must_use]
    pub fn catalog_strings() -> Vec<&'static str> {
        Self::CATALOG.iter().map(|p| p.as_str()).collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps catalog members only, dropping unknown names and repeats.
/// First occurrence order is preserved.
pub fn normalize_permissions<S: AsRef<str>>(requested: &[S]) -> Vec<Permission> {
    let mut kept = Vec::with_capacity(requested.len());
    for name in requested {
        if let Some(permission) = Permission::parse(name.as_ref()) {
            if !kept.contains(&permission) {
                kept.push(permission);
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_permission() {
        assert_eq!(Permission::parse("READ_USER"), Some(Permission::ReadUser));
        assert_eq!(
            Permission::parse("READ_USER_ACTIVITY"),
            Some(Permission::ReadUserActivity)
        );
        assert_eq!(Permission::parse("read_user"), None);
        assert_eq!(Permission::parse("DELETE_ROLE_UNKNOWN"), None);
    }

    #[test]
    fn test_normalize_drops_unknown_and_duplicates() {
        let kept = normalize_permissions(&["READ_USER", "READ_USER", "DELETE_ROLE_UNKNOWN"]);
        assert_eq!(kept, vec![Permission::ReadUser]);
    }

    #[test]
    fn test_normalize_keeps_first_occurrence_order() {
        let kept = normalize_permissions(&["UPDATE_ROLE", "CREATE_ROLE", "UPDATE_ROLE"]);
        assert_eq!(kept, vec![Permission::UpdateRole, Permission::CreateRole]);
    }

    #[test]
    fn test_serde_uses_catalog_names() {
        let json = serde_json::to_string(&vec![Permission::ReadUser, Permission::UploadFile]).unwrap();
        assert_eq!(json, r#"["READ_USER","UPLOAD_FILE"]"#);
        for permission in Permission::CATALOG {
            let encoded = serde_json::to_string(&permission).unwrap();
            assert_eq!(encoded, format!("\"{}\"", permission.as_str()));
        }
    }
}
