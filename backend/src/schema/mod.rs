//! Declarative request and response records.
//!
//! Records are passive values: they are decoded, validated, and discarded
//! per request. Shared behaviour lives on [`ApiModel`].

pub mod auth;
pub mod common;
pub mod error;
pub mod model;
pub mod secret;
pub mod stamp;
pub mod users;

pub use self::auth::TokenUser;
pub use self::common::{
    Address, AddressFields, CategoryCreate, CategoryProjection, GeoFields, ImageFields,
    ImageUpdate, NameFields, OAuthAccount, OtpRecord, RatingFields, SocialLink, StatusFields,
    TimestampFields,
};
pub use self::error::{FieldIssue, SchemaError, ValidationError};
pub use self::model::{ApiModel, Fields, MergePolicy, is_mapping};
pub use self::secret::Password;
pub use self::stamp::Stamp;
pub use self::users::{User, UserCreate, UserUpdate};
