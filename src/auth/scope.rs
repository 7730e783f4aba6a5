use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::Auther;

/// The organization boundary applied to a list, get, or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// Every tenant. Only reachable by admins.
    All,
    Organization(Uuid),
}

impl TenantScope {
    /// Computes the effective scope for a caller.
    ///
    /// Admins get whatever organization they asked for, or every tenant.
    /// Non-admins are pinned to their own organization and `requested` is
    /// ignored.
    pub fn for_caller(auther: &Auther, requested: Option<Uuid>) -> Result<Self> {
        if auther.is_admin {
            return Ok(requested.map_or(TenantScope::All, TenantScope::Organization));
        }

        match auther.org_uid {
            Some(org_uid) => Ok(TenantScope::Organization(org_uid)),
            None => {
                tracing::warn!("Non-admin user {} has no organization", auther.id);
                Err(Error::PermissionDenied)
            }
        }
    }

    /// The organization to filter queries by, if any.
    #[must_use]
    pub fn org_uid(self) -> Option<Uuid> {
        match self {
            TenantScope::All => None,
            TenantScope::Organization(uid) => Some(uid),
        }
    }

    #[must_use]
    pub fn permits(self, owner: Option<Uuid>) -> bool {
        match self {
            TenantScope::All => true,
            TenantScope::Organization(uid) => owner == Some(uid),
        }
    }

    /// Rows outside the scope are reported as missing, never as forbidden.
    pub fn ensure(self, owner: Option<Uuid>, entity: &str) -> Result<()> {
        if self.permits(owner) {
            Ok(())
        } else {
            Err(Error::not_found(format!("{entity} not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auther(is_admin: bool, org_uid: Option<Uuid>) -> Auther {
        Auther {
            id: 7,
            name: "Test User".to_string(),
            is_admin,
            org_uid,
            role_id: None,
            session_token: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_admin_uses_requested_scope() {
        let requested = Uuid::new_v4();
        let admin = auther(true, None);
        assert_eq!(
            TenantScope::for_caller(&admin, Some(requested)).unwrap(),
            TenantScope::Organization(requested)
        );
        assert_eq!(
            TenantScope::for_caller(&admin, None).unwrap(),
            TenantScope::All
        );
    }

    #[test]
    fn test_non_admin_scope_ignores_request() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let member = auther(false, Some(own));
        assert_eq!(
            TenantScope::for_caller(&member, Some(other)).unwrap(),
            TenantScope::Organization(own)
        );
        assert_eq!(
            TenantScope::for_caller(&member, None).unwrap(),
            TenantScope::Organization(own)
        );
    }

    #[test]
    fn test_non_admin_without_org_is_denied() {
        let orphan = auther(false, None);
        assert!(matches!(
            TenantScope::for_caller(&orphan, Some(Uuid::new_v4())),
            Err(Error::PermissionDenied)
        ));
    }

    #[test]
    fn test_ensure_reports_not_found() {
        let own = Uuid::new_v4();
        let scope = TenantScope::Organization(own);
        assert!(scope.ensure(Some(own), "department").is_ok());
        assert!(TenantScope::All.ensure(None, "user").is_ok());

        let err = scope.ensure(Some(Uuid::new_v4()), "department").unwrap_err();
        assert!(matches!(err, Error::NotFound(ref msg) if msg == "department not found"));
        assert!(scope.ensure(None, "user").is_err());
    }
}
