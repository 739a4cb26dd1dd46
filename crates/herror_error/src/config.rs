//! Configuration error types.

/// Stack capture settings that could not be read or are out of range.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong, prefixed with the setting name when there is one
    pub message: String,
    /// The offending setting, if the error concerns a single key
    pub key: Option<String>,
    /// Line of the herror code that raised it
    pub line: u32,
    /// File of the herror code that raised it
    pub file: &'static str,
}

impl ConfigError {
    /// Create a ConfigError not tied to any one setting, such as an
    /// unreadable file.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a ConfigError for one rejected setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use herror_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("max_frames", "must be greater than zero");
    /// assert_eq!(err.key.as_deref(), Some("max_frames"));
    /// assert_eq!(err.message, "max_frames: must be greater than zero");
    /// ```
    #[track_caller]
    pub fn invalid(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        let key = key.into();
        Self {
            message: format!("{key}: {reason}"),
            key: Some(key),
            ..Self::new(String::new())
        }
    }
}
