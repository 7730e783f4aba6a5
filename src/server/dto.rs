use serde::Deserialize;
use uuid::Uuid;

use crate::types::{
    ActivityFilter, OrganizationFilter, RoleFilter, SearchFilter, SearchPreset, SortBy, SortDir,
    UserFilter,
};

/// Query string accepted by every list endpoint.
///
/// Kept flat because query strings cannot carry flattened typed fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub sort_by: Option<SortBy>,
    pub sort_dir: Option<SortDir>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub is_final: Option<bool>,
    pub is_accepted: Option<bool>,
    pub is_archived: Option<bool>,
    pub preset: Option<SearchPreset>,
    pub org_uid: Option<Uuid>,
    pub sector: Option<String>,
    pub department_id: Option<i64>,
    pub role_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl ListParams {
    #[must_use]
    pub fn search(&self) -> SearchFilter {
        SearchFilter {
            sort_by: self.sort_by.unwrap_or_default(),
            sort_dir: self.sort_dir.unwrap_or_default(),
            offset: self.offset.unwrap_or_default(),
            limit: self.limit,
            is_final: self.is_final,
            is_accepted: self.is_accepted,
            is_archived: self.is_archived,
            preset: self.preset,
        }
    }

    #[must_use]
    pub fn organization_filter(&self) -> OrganizationFilter {
        OrganizationFilter {
            sector: self.sector.clone(),
        }
    }

    #[must_use]
    pub fn role_filter(&self) -> RoleFilter {
        RoleFilter {
            department_id: self.department_id,
        }
    }

    #[must_use]
    pub fn user_filter(&self) -> UserFilter {
        UserFilter {
            role_id: self.role_id,
        }
    }

    #[must_use]
    pub fn activity_filter(&self) -> ActivityFilter {
        ActivityFilter {
            user_id: self.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_use_defaults() {
        let search = ListParams::default().search();
        assert_eq!(search, SearchFilter::default());
    }

    #[test]
    fn test_params_carry_filters() {
        let params = ListParams {
            sort_by: Some(SortBy::Alphabetical),
            limit: Some(10),
            department_id: Some(4),
            ..ListParams::default()
        };
        let search = params.search();
        assert_eq!(search.sort_by, SortBy::Alphabetical);
        assert_eq!(search.effective_limit(), 10);
        assert_eq!(params.role_filter().department_id, Some(4));
        assert_eq!(params.user_filter().role_id, None);
    }
}
