//! Audit timestamps that remember whether a default factory produced them.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::helpers::current_timestamp;

/// UTC instant on the wire, tagged with its provenance in memory.
///
/// Decoded stamps count as caller supplied; [`Stamp::now`] is the serde
/// default factory and marks its value as generated. Equality and ordering
/// look at the instant only.
///
/// # Examples
/// ```
/// use backend::schema::Stamp;
///
/// let generated = Stamp::now();
/// assert!(generated.is_generated());
///
/// let supplied = Stamp::from(generated.instant());
/// assert!(!supplied.is_generated());
/// assert_eq!(generated, supplied);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Stamp {
    instant: DateTime<Utc>,
    generated: bool,
}

impl Stamp {
    /// Stamp the current instant as a generated value.
    #[must_use]
    pub fn now() -> Self {
        Self {
            instant: current_timestamp(),
            generated: true,
        }
    }

    /// The recorded instant.
    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Whether the default factory produced this stamp.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.generated
    }
}

impl From<DateTime<Utc>> for Stamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            generated: false,
        }
    }
}

impl PartialEq for Stamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for Stamp {}

impl PartialOrd for Stamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Serialize for Stamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.instant.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Stamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DateTime::<Utc>::deserialize(deserializer).map(Self::from)
    }
}
