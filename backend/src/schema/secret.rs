//! Secret string values.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Password supplied by a user.
///
/// The value is hidden from `Debug` output and wiped from memory on drop.
/// It still serialises to its plain text so records can be dumped to fields
/// and merged; HTTP responses must never include it.
///
/// # Examples
/// ```
/// use backend::schema::Password;
///
/// let password = Password::new("hunter22");
/// assert_eq!(password.expose_secret(), "hunter22");
/// assert_eq!(format!("{password:?}"), "Password(**********)");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wrap a plain-text password.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the plain-text value.
    pub fn expose_secret(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**********)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}
