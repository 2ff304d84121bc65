//! Shared record shapes reused across resources.

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::model::{ApiModel, Fields, fields};
use super::stamp::Stamp;

/// Country assumed when an address omits one.
pub const DEFAULT_COUNTRY: &str = "India";
/// Image path used when a resource has no uploaded image.
pub const DEFAULT_IMAGE_PATH: &str = "default-image.png";
/// Stored image identifier used for categories without their own image.
pub const DEFAULT_CATEGORY_IMAGE_ID: &str = "6383766357664417270919c4";
/// Public path of the default category image.
pub const DEFAULT_CATEGORY_IMAGE: &str = "/quippix/services/default-image.png";

fn default_country() -> Option<String> {
    Some(DEFAULT_COUNTRY.to_owned())
}

fn default_image_path() -> String {
    DEFAULT_IMAGE_PATH.to_owned()
}

fn default_category_image_id() -> Option<String> {
    Some(DEFAULT_CATEGORY_IMAGE_ID.to_owned())
}

fn default_category_image() -> Option<String> {
    Some(DEFAULT_CATEGORY_IMAGE.to_owned())
}

fn default_rating() -> Option<f64> {
    Some(0.0)
}

/// Audit stamps carried by stored documents.
///
/// `created_at` and `updated_at` are stamped when the record is decoded
/// without them, so each instance receives its own instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TimestampFields {
    /// Document creation time.
    #[serde(default = "Stamp::now")]
    pub created_at: Stamp,
    /// Time of the most recent update.
    #[serde(default = "Stamp::now")]
    pub updated_at: Stamp,
    /// Soft-deletion flag.
    #[serde(default)]
    pub is_deleted: bool,
    /// User who made the most recent update.
    pub updated_by: String,
    /// Creator and owner of the resource.
    pub created_by: String,
}

impl ApiModel for TimestampFields {
    fn generated_fields(&self) -> Vec<&'static str> {
        [("created_at", self.created_at), ("updated_at", self.updated_at)]
            .into_iter()
            .filter(|(_, stamp)| stamp.is_generated())
            .map(|(name, _)| name)
            .collect()
    }

    fn field_defaults() -> Fields {
        fields(json!({ "is_deleted": false }))
    }
}

/// Geographical position reported by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoFields {
    pub latitude: f64,
    pub longitude: f64,
    /// Accuracy of the coordinates, in metres.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Altitude above sea level, in metres.
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub altitude_accuracy: Option<f64>,
}

impl ApiModel for GeoFields {
    fn field_defaults() -> Fields {
        fields(json!({ "accuracy": null, "altitude": null, "altitude_accuracy": null }))
    }
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<i64>,
    pub state: String,
    #[serde(default = "default_country")]
    pub country: Option<String>,
}

impl ApiModel for Address {
    fn field_defaults() -> Fields {
        fields(json!({ "postal_code": null, "country": DEFAULT_COUNTRY }))
    }
}

/// Optional address attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AddressFields {
    #[serde(default)]
    pub address: Option<Address>,
}

impl ApiModel for AddressFields {
    fn field_defaults() -> Fields {
        fields(json!({ "address": null }))
    }
}

/// Image reference attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ImageFields {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default = "default_image_path")]
    pub file_path: String,
}

impl ApiModel for ImageFields {
    fn field_defaults() -> Fields {
        fields(json!({ "file_id": null, "file_path": DEFAULT_IMAGE_PATH }))
    }
}

/// One-time password state cached per recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OtpRecord {
    pub token: String,
    /// Codes already issued, oldest first.
    pub previous_otps: Vec<String>,
}

impl ApiModel for OtpRecord {}

/// Category creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category_image_id")]
    pub image_id: Option<String>,
    #[serde(default = "default_category_image")]
    pub image: Option<String>,
}

impl ApiModel for CategoryCreate {
    fn field_defaults() -> Fields {
        fields(json!({
            "description": "",
            "image_id": DEFAULT_CATEGORY_IMAGE_ID,
            "image": DEFAULT_CATEGORY_IMAGE,
        }))
    }
}

/// Stored category as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryProjection {
    pub id: Uuid,
    #[serde(flatten)]
    pub category: CategoryCreate,
}

impl ApiModel for CategoryProjection {
    fn field_defaults() -> Fields {
        CategoryCreate::field_defaults()
    }
}

/// Personal names and contact address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NameFields {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub display_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

impl ApiModel for NameFields {
    fn field_defaults() -> Fields {
        fields(json!({ "first_name": "", "last_name": "", "display_name": "" }))
    }
}

/// Link to a social profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub url: String,
}

/// Aggregated feedback for a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RatingFields {
    #[serde(default = "default_rating")]
    pub avg_rating: Option<f64>,
    #[serde(default = "default_rating")]
    pub feedback_count: Option<f64>,
}

impl Default for RatingFields {
    fn default() -> Self {
        Self {
            avg_rating: default_rating(),
            feedback_count: default_rating(),
        }
    }
}

impl ApiModel for RatingFields {
    fn field_defaults() -> Fields {
        fields(json!({ "avg_rating": 0.0, "feedback_count": 0.0 }))
    }
}

/// Request to replace the image of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ImageUpdate {
    pub image_id: String,
    pub image: String,
    pub resource_id: String,
}

impl ApiModel for ImageUpdate {}

/// Activation and verification flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StatusFields {
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
}

impl ApiModel for StatusFields {
    fn field_defaults() -> Fields {
        fields(json!({ "is_active": false, "is_verified": false }))
    }
}

/// Account linked through an OAuth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OAuthAccount {
    pub access_token: String,
    pub account_id: String,
    pub account_email: String,
    /// Expiry of the access token as a Unix timestamp.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

impl ApiModel for OAuthAccount {
    fn field_defaults() -> Fields {
        fields(json!({ "expires_at": null, "refresh_token": null, "id_token": null }))
    }
}
