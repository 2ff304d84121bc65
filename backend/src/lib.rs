//! Users backend library: validated records, router registration and the
//! HTTP surface built on them.

pub mod api;
pub mod doc;
pub mod helpers;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod settings;
pub mod store;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
