//! Users API handlers.
//!
//! ```text
//! POST  /api/v1/users        {"name":"Ada","email":"ada@example.com","password":"pw"}
//! GET   /api/v1/users?skip=0&limit=20
//! GET   /api/v1/users/{id}
//! PATCH /api/v1/users/{id}   {"email":"ada@example.org","password":"pw"}
//! ```
//!
//! Request bodies are taken as raw JSON and validated through the record
//! layer so every failure is reported with the same field issue list.

use actix_web::{HttpResponse, get, patch, post, web};
use pagination::{Paginated, TOTAL_COUNT_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api::state::HttpState;
use crate::models::{ApiResult, Error};
use crate::schema::{ApiModel, Fields, User, UserCreate, UserUpdate};
use crate::store::{UpdateError, UserChange};

/// Page size used when the query omits `limit`.
pub const DEFAULT_LIMIT: usize = 20;
/// Largest page size a client may request.
pub const MAX_LIMIT: usize = 100;

/// Public projection of a stored user; the password never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    /// Repository-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Contact address.
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Paginated list of users as documented in the OpenAPI surface.
#[derive(ToSchema)]
#[schema(as = UserList)]
pub struct UserListSchema {
    /// Number of users in `data`.
    #[schema(example = 1)]
    pub count: usize,
    /// Users in ascending id order.
    pub data: Vec<UserView>,
    /// Number of stored users.
    #[schema(example = 1)]
    pub total_count: u64,
    /// Offset applied to the listing.
    #[schema(example = 0)]
    pub skip: usize,
    /// Page size applied to the listing.
    #[schema(example = 20)]
    pub limit: usize,
}

/// Offset pagination query for `GET /users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of users to skip (default 0).
    pub skip: Option<usize>,
    /// Maximum number of users to return (default 20, capped at 100).
    pub limit: Option<usize>,
}

impl PageQuery {
    fn window(&self) -> (usize, usize) {
        (
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        )
    }
}

fn user_not_found(id: i64) -> Error {
    Error::not_found(format!("user {id} not found"))
        .with_details(json!({ "id": id, "code": "user_not_found" }))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let create = UserCreate::load([payload.into_inner()])?;
    let id = state.users.next_id().await?;
    let user = User::load([json!({ "id": id }), Value::Object(create.to_fields()?)])?;
    state.users.save(&user).await?;
    info!(user_id = user.id, "user created");
    Ok(HttpResponse::Created().json(UserView::from(&user)))
}

/// List users one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Users", body = UserListSchema),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Paginated<UserView>>> {
    let (skip, limit) = query.window();
    let page = state.users.list(skip, limit).await?;
    let mut extras = Fields::new();
    extras.insert(TOTAL_COUNT_FIELD.to_owned(), json!(page.total));
    extras.insert("skip".to_owned(), json!(skip));
    extras.insert("limit".to_owned(), json!(limit));
    let envelope = User::paginate(&page.users, extras)?.map(|user| UserView::from(&user));
    Ok(web::Json(envelope))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserView>> {
    let id = path.into_inner();
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(web::Json(UserView::from(&user)))
}

/// Apply a partial update to a user.
///
/// Only the fields the client actually set are merged over the stored
/// record, so an omitted name keeps its current value.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated", body = UserView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<UserView>> {
    let id = path.into_inner();
    let update = UserUpdate::load([payload.into_inner()])?;
    let changes = Value::Object(update.valid_values()?);
    let merge: UserChange = Box::new(move |stored: User| {
        User::load([Value::Object(stored.to_fields()?), changes])
    });
    let user = state
        .users
        .update(id, merge)
        .await
        .map_err(|err| match err {
            UpdateError::NotFound { id } => user_not_found(id),
            UpdateError::Rejected(err) => err.into(),
            UpdateError::Repository(err) => err.into(),
        })?;
    info!(user_id = user.id, "user updated");
    Ok(web::Json(UserView::from(&user)))
}

/// Register the users handlers on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user);
}
