//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users endpoints, their request and response
//! records, and the shared error payload. The document backs Swagger UI in
//! debug builds and is exported via `cargo run --bin openapi-dump`.
//!
//! Paths are declared under [`DOCUMENTED_PREFIX`]; [`ApiDoc::with_prefix`]
//! rebases them onto the prefix the routers are actually mounted at.

use crate::api::users::{UserListSchema, UserView};
use crate::models::{Error, ErrorCode};
use crate::schema::{UserCreate, UserUpdate};
use utoipa::OpenApi;

/// API prefix the handler path annotations are written against.
pub const DOCUMENTED_PREFIX: &str = "/api/v1";

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quippix users API",
        description = "HTTP interface for registering, listing and updating users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
    ),
    components(schemas(
        UserCreate,
        UserUpdate,
        UserView,
        UserListSchema,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "Operations related to users")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Build the document with every path moved from [`DOCUMENTED_PREFIX`]
    /// to `api_v1_str`.
    ///
    /// # Examples
    /// ```
    /// use backend::ApiDoc;
    ///
    /// let doc = ApiDoc::with_prefix("/v2");
    /// assert!(doc.paths.paths.contains_key("/v2/users"));
    /// ```
    #[must_use]
    pub fn with_prefix(api_v1_str: &str) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| {
                let rebased = match path.strip_prefix(DOCUMENTED_PREFIX) {
                    Some(rest) => format!("{api_v1_str}{rest}"),
                    None => path,
                };
                (rebased, item)
            })
            .collect();
        doc
    }
}
