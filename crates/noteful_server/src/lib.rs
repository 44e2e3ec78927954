//! HTTP surface of the Noteful API.
//!
//! # Responsibility
//! - Mount the folder and note resources under `/api`.
//! - Wire configuration, the store handle and middleware together.
//!
//! # Invariants
//! - The store handle reaches handlers only through `AppState`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod store;

use config::Environment;
use store::Store;

pub use routes::build_router;

/// Shared request state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub environment: Environment,
}

impl AppState {
    pub fn new(store: Store, environment: Environment) -> Self {
        Self { store, environment }
    }
}
