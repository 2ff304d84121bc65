//! HTTP-facing data models: the error payload and its code.

pub mod error;
pub use self::error::{Error, ErrorCode};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
