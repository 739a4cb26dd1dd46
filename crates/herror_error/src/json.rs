//! JSON error types.

/// Failure to encode or decode an error chain as JSON.
///
/// `message` is the serializer's text, unchanged. When decoding stopped
/// inside the payload, `position` holds the payload line and column.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// Serializer message
    pub message: String,
    /// Payload line and column where decoding stopped
    pub position: Option<(usize, usize)>,
    /// Line of the herror code that raised it
    pub line: u32,
    /// File of the herror code that raised it
    pub file: &'static str,
}

impl JsonError {
    /// Create a JsonError with no payload position.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            position: None,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<serde_json::Error> for JsonError {
    /// Keeps the decoder text verbatim and records where in the payload it
    /// stopped.
    ///
    /// # Examples
    ///
    /// ```
    /// use herror_error::JsonError;
    ///
    /// let decode = serde_json::from_str::<serde_json::Value>("{\"error\":").unwrap_err();
    /// let expected = decode.to_string();
    /// let err = JsonError::from(decode);
    /// assert_eq!(err.message, expected);
    /// assert_eq!(err.position, Some((1, 9)));
    /// ```
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        // serde_json reports line 0 for errors raised outside the payload
        let position = (err.line() > 0).then(|| (err.line(), err.column()));
        Self {
            position,
            ..Self::new(err.to_string())
        }
    }
}
