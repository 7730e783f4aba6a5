//! Entity lifecycle services.
//!
//! Mutating operations take an open [`Tx`](crate::store::Tx) and never commit
//! it. Reads take a plain connection, which may itself be a transaction.

pub mod activity;
pub mod code;
pub mod department;
pub mod lifecycle;
pub mod loader;
pub mod organization;
pub mod role;
pub mod user;

use serde::Serialize;

use crate::error::{Error, Result};

/// One page of a list plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

impl<T> From<(Vec<T>, i64)> for Page<T> {
    fn from((items, total): (Vec<T>, i64)) -> Self {
        Self { items, total }
    }
}

/// Fails with `BadRequest("<field> is required")` on a blank value.
pub(crate) fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::bad_request(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Like [`require`], for patch fields that are only checked when present.
pub(crate) fn require_if_present(value: Option<&str>, field: &str) -> Result<()> {
    match value {
        Some(value) => require(value, field),
        None => Ok(()),
    }
}
