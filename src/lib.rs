//! # Orgbook
//!
//! A multi-tenant organization directory: organizations, departments, roles
//! and users, with OTP login, per-role permissions and an audit journal.
//! Usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use orgbook::resolver::Resolver;
//! use orgbook::server::{AppState, create_router};
//! use orgbook::store::SqliteStore;
//!
//! let store = SqliteStore::new("./data/orgbook.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState {
//!     resolver: Resolver::new(Arc::new(store)),
//!     request_timeout: Duration::from_secs(10),
//! });
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `orgbook` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod resolver;
pub mod server;
pub mod service;
pub mod store;
pub mod types;
