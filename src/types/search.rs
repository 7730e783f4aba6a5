use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    DateCreated,
    #[default]
    DateUpdated,
    Alphabetical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    #[default]
    Ascending,
    Descending,
}

impl SortDir {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            SortDir::Ascending => "ASC",
            SortDir::Descending => "DESC",
        }
    }
}

/// Coarse named filter that expands into the lifecycle booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPreset {
    All,
    Active,
    Draft,
    Accepted,
    Archived,
}

/// Sorting, paging, and lifecycle filtering for list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    pub sort_by: SortBy,
    pub sort_dir: SortDir,
    pub offset: i64,
    pub limit: Option<i64>,
    pub is_final: Option<bool>,
    pub is_accepted: Option<bool>,
    pub is_archived: Option<bool>,
    pub preset: Option<SearchPreset>,
}

impl SearchFilter {
    pub const DEFAULT_LIMIT: i64 = 50;

    #[must_use]
    pub fn with_preset(preset: SearchPreset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::default()
        }
    }

    /// Expands the preset into lifecycle flags. Explicit flags win.
    #[must_use]
    pub fn resolved(&self) -> SearchFilter {
        let (is_final, is_accepted, is_archived) = match self.preset {
            None | Some(SearchPreset::All) => (None, None, None),
            Some(SearchPreset::Active) => (Some(true), None, Some(false)),
            Some(SearchPreset::Draft) => (Some(false), None, Some(false)),
            Some(SearchPreset::Accepted) => (Some(true), Some(true), Some(false)),
            Some(SearchPreset::Archived) => (None, None, Some(true)),
        };
        SearchFilter {
            sort_by: self.sort_by,
            sort_dir: self.sort_dir,
            offset: self.offset,
            limit: self.limit,
            is_final: self.is_final.or(is_final),
            is_accepted: self.is_accepted.or(is_accepted),
            is_archived: self.is_archived.or(is_archived),
            preset: None,
        }
    }

    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => Self::DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub fn effective_offset(&self) -> i64 {
        self.offset.max(0)
    }
}
