//! JSON encoding of error chains.

use crate::HError;
use herror_error::{HerrorError, HerrorResult, JsonError};
use serde::Deserialize;
use tracing::{instrument, trace};

impl HError {
    /// Encode the chain as JSON.
    ///
    /// Every node has exactly the keys `error`, `wrapped`, `details` and
    /// `stack`; an absent cause or stack is `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] if serialization fails.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> HerrorResult<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| HerrorError::from(JsonError::from(e)))?;
        trace!(bytes = json.len(), "Encoded error chain");
        Ok(json)
    }

    /// Decode a chain previously produced by [`HError::to_json`].
    ///
    /// Nesting depth is not limited, so any chain `to_json` encodes decodes
    /// back.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] carrying the decoder's message verbatim when
    /// `payload` is not a well-formed chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use herror::HError;
    ///
    /// let err = HError::new("outer").wrap(HError::new("inner"));
    /// let decoded = HError::from_json(&err.to_json()?)?;
    /// assert_eq!(decoded, err);
    ///
    /// assert!(HError::from_json("{not json").is_err());
    /// # Ok::<(), herror::HerrorError>(())
    /// ```
    #[instrument(skip(payload), fields(bytes = payload.len()))]
    pub fn from_json(payload: &str) -> HerrorResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(payload);
        deserializer.disable_recursion_limit();
        HError::deserialize(&mut deserializer)
            .and_then(|chain| deserializer.end().map(|()| chain))
            .map_err(|e| HerrorError::from(JsonError::from(e)))
    }
}
