//! Top-level error wrapper types.

use crate::{ConfigError, JsonError};

/// The failure families raised by the herror crates.
///
/// # Examples
///
/// ```
/// use herror_error::{HerrorError, JsonError};
///
/// let json_err = JsonError::new("trailing characters");
/// let err: HerrorError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HerrorErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Herror error with kind discrimination.
///
/// # Examples
///
/// ```
/// use herror_error::{ConfigError, HerrorErrorKind, HerrorResult};
///
/// fn might_fail() -> HerrorResult<()> {
///     Err(ConfigError::new("unreadable herror.toml"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), HerrorErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Herror Error: {}", _0)]
pub struct HerrorError(Box<HerrorErrorKind>);

impl HerrorError {
    /// Create a new error from a kind.
    pub fn new(kind: HerrorErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HerrorErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to HerrorErrorKind
impl<T> From<T> for HerrorError
where
    T: Into<HerrorErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for herror operations.
pub type HerrorResult<T> = std::result::Result<T, HerrorError>;
