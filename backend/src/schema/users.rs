//! User records exchanged by the users routes.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use super::model::{ApiModel, Fields, fields};
use super::secret::Password;

/// Payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserCreate {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(value_type = String, format = Password)]
    pub password: Password,
}

impl ApiModel for UserCreate {}

/// Payload for updating a user; the name may be left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserUpdate {
    #[serde(default)]
    #[schema(example = "Ada King")]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(value_type = String, format = Password)]
    pub password: Password,
}

impl ApiModel for UserUpdate {
    fn field_defaults() -> Fields {
        fields(json!({ "name": null }))
    }
}

/// Stored user.
///
/// ## Invariants
/// - `id` is assigned by the repository and never changes.
/// - `email` is a syntactically valid address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: Password,
}

impl ApiModel for User {}
