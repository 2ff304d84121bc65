//! Pagination envelope primitives shared by list endpoints.
//!
//! A [`Paginated`] envelope wraps an ordered page of items and reports how
//! many items the page holds alongside the total size of the underlying
//! collection. Callers may attach extra top-level fields which are flattened
//! into the serialized envelope:
//!
//! ```json
//! { "count": 2, "data": [{ "id": 1 }, { "id": 2 }], "total_count": 40, "skip": 0 }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope key holding the number of items in the page.
pub const COUNT_FIELD: &str = "count";
/// Envelope key holding the page items.
pub const DATA_FIELD: &str = "data";
/// Envelope key holding the size of the whole collection.
pub const TOTAL_COUNT_FIELD: &str = "total_count";

/// Errors raised while assembling a [`Paginated`] envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// An extra field tried to replace a value the envelope computes itself.
    #[error("envelope field `{field}` is computed from the page and cannot be overridden")]
    ReservedField {
        /// Name of the rejected field.
        field: String,
    },
    /// The supplied total count is not a non-negative integer.
    #[error("total_count must be a non-negative integer, got {value}")]
    InvalidTotalCount {
        /// Offending value rendered as JSON.
        value: String,
    },
    /// A deserialised envelope reports a `count` that disagrees with `data`.
    #[error("count is {count} but data holds {len} items")]
    CountMismatch {
        /// Declared count.
        count: usize,
        /// Number of items actually present.
        len: usize,
    },
}

/// Ordered page of items with count metadata.
///
/// ## Invariants
/// - `count` always equals the number of items in `data`.
/// - `total_count` defaults to zero until a caller supplies it.
/// - `extra` never contains the `count`, `data`, or `total_count` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawPaginated<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Paginated<T> {
    count: usize,
    data: Vec<T>,
    #[serde(default)]
    total_count: u64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Wire shape checked before it becomes a [`Paginated`].
#[derive(Deserialize)]
struct RawPaginated<T> {
    count: usize,
    data: Vec<T>,
    #[serde(default)]
    total_count: u64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl<T> TryFrom<RawPaginated<T>> for Paginated<T> {
    type Error = PaginationError;

    fn try_from(raw: RawPaginated<T>) -> Result<Self, Self::Error> {
        if raw.count != raw.data.len() {
            return Err(PaginationError::CountMismatch {
                count: raw.count,
                len: raw.data.len(),
            });
        }
        Ok(Self {
            count: raw.count,
            data: raw.data,
            total_count: raw.total_count,
            extra: raw.extra,
        })
    }
}

impl<T> Paginated<T> {
    /// Wrap an ordered page of items.
    ///
    /// # Examples
    /// ```
    /// use pagination::Paginated;
    ///
    /// let page = Paginated::new(vec!["a", "b", "c"]);
    /// assert_eq!(page.count(), 3);
    /// assert_eq!(page.total_count(), 0);
    /// ```
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
            total_count: 0,
            extra: Map::new(),
        }
    }

    /// Record the size of the whole collection the page was taken from.
    #[must_use]
    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = total_count;
        self
    }

    /// Merge caller supplied fields into the envelope.
    ///
    /// A `total_count` entry sets [`Paginated::total_count`]; every other
    /// entry is kept as an extra top-level field. Later entries overwrite
    /// earlier extras with the same key.
    ///
    /// # Errors
    /// Returns [`PaginationError::ReservedField`] for `count` or `data`
    /// entries and [`PaginationError::InvalidTotalCount`] when `total_count`
    /// is not a non-negative integer.
    ///
    /// # Examples
    /// ```
    /// use pagination::Paginated;
    /// use serde_json::{json, Map, Value};
    ///
    /// let mut extras = Map::new();
    /// extras.insert("total_count".into(), json!(12));
    /// extras.insert("skip".into(), json!(10));
    ///
    /// let page = Paginated::new(vec![1, 2]).with_extras(extras)?;
    /// assert_eq!(page.total_count(), 12);
    /// assert_eq!(page.extra().get("skip"), Some(&Value::from(10)));
    /// # Ok::<(), pagination::PaginationError>(())
    /// ```
    pub fn with_extras(mut self, extras: Map<String, Value>) -> Result<Self, PaginationError> {
        for (key, value) in extras {
            match key.as_str() {
                COUNT_FIELD | DATA_FIELD => {
                    return Err(PaginationError::ReservedField { field: key });
                }
                TOTAL_COUNT_FIELD => {
                    self.total_count =
                        value
                            .as_u64()
                            .ok_or_else(|| PaginationError::InvalidTotalCount {
                                value: value.to_string(),
                            })?;
                }
                _ => {
                    self.extra.insert(key, value);
                }
            }
        }
        Ok(self)
    }

    /// Number of items in this page.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Items in this page, in their original order.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Size of the whole collection, or zero when unknown.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Extra envelope fields supplied by the caller.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Consume the envelope and return its items.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Convert every item while keeping the envelope metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            count: self.count,
            data: self.data.into_iter().map(f).collect(),
            total_count: self.total_count,
            extra: self.extra,
        }
    }
}
