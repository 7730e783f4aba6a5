//! Human-readable codes assigned at creation time.
//!
//! Each code is formatted from the current row count plus one. Nothing
//! reserves the number, so two concurrent creates in the same scope, or a
//! create after a delete, can produce the same code.

/// The organization's code without its `ORG` prefix.
fn org_suffix(org_code: &str) -> &str {
    org_code.get(3..).unwrap_or_default()
}

#[must_use]
pub fn organization_code(count: i64) -> String {
    format!("ORG{:03}", count + 1)
}

#[must_use]
pub fn department_code(org_code: &str, count: i64) -> String {
    format!("DEPT-{}-{:03}", org_suffix(org_code), count + 1)
}

#[must_use]
pub fn role_code(org_code: &str, count: i64) -> String {
    format!("ROLE-{}-{:03}", org_suffix(org_code), count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_codes() {
        assert_eq!(organization_code(0), "ORG001");
        assert_eq!(organization_code(1), "ORG002");
        assert_eq!(organization_code(999), "ORG1000");
    }

    #[test]
    fn test_scoped_codes_strip_org_prefix() {
        assert_eq!(department_code("ORG003", 2), "DEPT-003-003");
        assert_eq!(role_code("ORG012", 0), "ROLE-012-001");
    }

    #[test]
    fn test_short_org_code_has_empty_suffix() {
        assert_eq!(department_code("OR", 0), "DEPT--001");
    }
}
