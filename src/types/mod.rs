mod activity;
mod models;
mod permission;
mod requests;
mod search;

pub use activity::{Action, ObjectType, action_tag};
pub use models::*;
pub use permission::{Permission, normalize_permissions};
pub use requests::*;
pub use search::{SearchFilter, SearchPreset, SortBy, SortDir};
