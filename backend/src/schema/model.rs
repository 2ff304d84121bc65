//! Generic record behaviour shared by every request and response shape.
//!
//! A record is any type that can be dumped to a field mapping (`Serialize`),
//! decoded back from one (`DeserializeOwned`), and checked against its format
//! rules (`Validate`). [`ApiModel`] layers three operations on top:
//!
//! - [`ApiModel::valid_values`] keeps only meaningful overrides,
//! - [`ApiModel::load`] merges partial sources into one validated record,
//! - [`ApiModel::paginate`] validates items into a [`Paginated`] envelope.

use pagination::Paginated;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;
use validator::Validate;

use super::error::{SchemaError, ValidationError, kind_of};

/// Field mapping in declaration order.
pub type Fields = Map<String, Value>;

/// How [`ApiModel::load_with`] treats sources that are not field mappings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Reject the whole merge with [`SchemaError::UnsupportedSource`].
    #[default]
    Strict,
    /// Ignore the source and carry on merging the remaining ones.
    SkipUnsupported,
}

/// Capability check used by the merge: can this value be read as fields?
pub fn is_mapping(value: &Value) -> bool {
    value.is_object()
}

/// Dump any serialisable value to JSON.
fn dump<S: Serialize + ?Sized>(source: &S) -> Result<Value, SchemaError> {
    serde_json::to_value(source).map_err(SchemaError::Serialize)
}

/// Build a field mapping from a JSON object literal.
///
/// Non-object values produce an empty mapping.
pub(crate) fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

/// Validation and conversion behaviour shared by declarative records.
pub trait ApiModel: Serialize + DeserializeOwned + Validate + Sized {
    /// Fields of this instance whose values came from a default factory
    /// (e.g. creation stamps) rather than from the caller.
    fn generated_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Declared default for every optional field, keyed by field name.
    ///
    /// Required fields are absent from the mapping.
    fn field_defaults() -> Fields {
        Fields::new()
    }

    /// Dump the record to a field mapping in declaration order.
    ///
    /// # Errors
    /// Returns [`SchemaError::NotARecord`] when the record does not serialise
    /// to a JSON object.
    fn to_fields(&self) -> Result<Fields, SchemaError> {
        match dump(self)? {
            Value::Object(map) => Ok(map),
            other => Err(SchemaError::NotARecord {
                kind: kind_of(&other),
            }),
        }
    }

    /// Decode and validate a value into a record.
    ///
    /// # Errors
    /// Returns [`SchemaError::Validation`] when required fields are missing,
    /// a value has the wrong type, or a format rule fails.
    fn from_value(value: Value) -> Result<Self, SchemaError> {
        let record: Self =
            serde_json::from_value(value).map_err(|err| ValidationError::from_decode(&err))?;
        record.validate().map_err(ValidationError::from)?;
        Ok(record)
    }

    /// Fields holding meaningful, caller supplied values.
    ///
    /// Drops every field that is null, equal to its declared default, or
    /// produced by a default factory. Useful for building partial-update
    /// payloads.
    ///
    /// # Errors
    /// Fails only when the record cannot be dumped.
    fn valid_values(&self) -> Result<Fields, SchemaError> {
        let defaults = Self::field_defaults();
        let generated = self.generated_fields();
        let values = self
            .to_fields()?
            .into_iter()
            .filter(|(name, value)| {
                !value.is_null()
                    && !generated.contains(&name.as_str())
                    && defaults.get(name) != Some(value)
            })
            .collect();
        Ok(values)
    }

    /// Merge partial sources left to right and validate the result.
    ///
    /// Later sources overwrite earlier ones on key collisions. Sources that
    /// are not field mappings are rejected.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnsupportedSource`] for a non-mapping source and
    /// [`SchemaError::Validation`] when the merged fields are invalid.
    fn load<I>(sources: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator,
        I::Item: Serialize,
    {
        Self::load_with(MergePolicy::Strict, sources)
    }

    /// Merge partial sources under an explicit [`MergePolicy`].
    ///
    /// # Errors
    /// See [`ApiModel::load`]; with [`MergePolicy::SkipUnsupported`] only
    /// validation failures are reported.
    fn load_with<I>(policy: MergePolicy, sources: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator,
        I::Item: Serialize,
    {
        let mut merged = Fields::new();
        for (index, source) in sources.into_iter().enumerate() {
            let value = dump(&source)?;
            if !is_mapping(&value) {
                let kind = kind_of(&value);
                match policy {
                    MergePolicy::Strict => {
                        return Err(SchemaError::UnsupportedSource { index, kind });
                    }
                    MergePolicy::SkipUnsupported => {
                        debug!(index, kind, "skipping merge source that is not a mapping");
                        continue;
                    }
                }
            }
            merged.extend(fields(value));
        }
        Self::from_value(Value::Object(merged))
    }

    /// Validate one item or a sequence of items into a pagination envelope.
    ///
    /// A value dumping to a JSON array is treated as a sequence; anything
    /// else is a single item. Items are validated independently and in
    /// order; the first invalid item aborts the call. `extras` are merged
    /// into the envelope, where `total_count` defaults to zero.
    ///
    /// # Errors
    /// Returns [`SchemaError::Validation`] with the item index in every field
    /// path, or [`SchemaError::Envelope`] when `extras` are rejected.
    fn paginate<D>(data: &D, extras: Fields) -> Result<Paginated<Self>, SchemaError>
    where
        D: Serialize + ?Sized,
    {
        let items = match dump(data)? {
            Value::Array(items) => items,
            single => vec![single],
        };
        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Self::from_value(item).map_err(|err| match err {
                    SchemaError::Validation(validation) => {
                        SchemaError::Validation(validation.at_index("data", index))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated::new(records).with_extras(extras)?)
    }
}
