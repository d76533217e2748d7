//! service-core: Shared infrastructure and resource query primitives for catalog services.
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod observability;
pub mod query;
pub mod store;

pub use async_trait;
pub use axum;
pub use mongodb;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;
pub use tracing;
pub use validator;
