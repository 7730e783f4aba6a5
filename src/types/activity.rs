use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of object an activity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Auther,
    Organization,
    Department,
    Role,
    User,
}

impl ObjectType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ObjectType::Auther => "AUTHER",
            ObjectType::Organization => "ORGANIZATION",
            ObjectType::Department => "DEPARTMENT",
            ObjectType::Role => "ROLE",
            ObjectType::User => "USER",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Login,
    Logout,
    Create,
    Update,
    Finalize,
    Archive,
    Unarchive,
    Delete,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Login => "LOGIN",
            Action::Logout => "LOGOUT",
            Action::Create => "CREATE",
            Action::Update => "UPDATE",
            Action::Finalize => "FINALIZE",
            Action::Archive => "ARCHIVE",
            Action::Unarchive => "UNARCHIVE",
            Action::Delete => "DELETE",
        }
    }

    /// Session actions are journaled under their bare verb.
    #[must_use]
    pub const fn is_session(self) -> bool {
        matches!(self, Action::Login | Action::Logout)
    }
}

/// Builds the journal tag, e.g. `DEPARTMENT_CREATE` or the bare `LOGIN`.
#[must_use]
pub fn action_tag(object: ObjectType, action: Action) -> String {
    if action.is_session() {
        action.as_str().to_string()
    } else {
        format!("{}_{}", object.as_str(), action.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_tag() {
        assert_eq!(
            action_tag(ObjectType::Department, Action::Create),
            "DEPARTMENT_CREATE"
        );
        assert_eq!(
            action_tag(ObjectType::Organization, Action::Unarchive),
            "ORGANIZATION_UNARCHIVE"
        );
        assert_eq!(action_tag(ObjectType::Auther, Action::Login), "LOGIN");
        assert_eq!(action_tag(ObjectType::Auther, Action::Logout), "LOGOUT");
    }
}
