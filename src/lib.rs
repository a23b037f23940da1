//! items-api — a deliberately small CRUD backend used for CI/CD pipeline
//! practice. One `items` resource over HTTP, backed by MySQL, with an
//! optional bearer-token guard.
//!
//! Exposed as a library so integration tests in `tests/` can build the
//! router without spawning the binary.

use std::sync::Arc;

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod store;

use auth::TokenService;
use store::mysql::ItemStore;

/// Shared application state passed to handlers and middleware.
///
/// Built exactly once at startup, after configuration is resolved and the
/// database bootstrap has completed. The pool inside `db` is the only
/// state shared between requests.
pub struct AppState {
    pub db: ItemStore,
    pub tokens: TokenService,
    pub config: config::Config,
}

pub type SharedState = Arc<AppState>;
