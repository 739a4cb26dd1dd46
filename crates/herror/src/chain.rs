//! The error chain node.

use crate::Dump;
use herror_stack::{BacktraceSource, FrameFilter, StackConfig, Stacktrace};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use tracing::debug;

/// One link in a chain of causes.
///
/// A node owns its deeper cause, so a chain is always finite and acyclic.
/// Equality compares every field of every node, which is what JSON
/// round-tripping preserves.
///
/// # Examples
///
/// ```
/// use herror::HError;
///
/// let err = HError::new("MAIN ERROR").wrap(HError::new("ERR A"));
/// assert_eq!(err.to_string(), "MAIN ERROR\n-> ERR A");
/// assert_eq!(err.unwrap().map(|cause| cause.message()), Some("ERR A"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HError {
    #[serde(rename = "error", default)]
    message: String,
    wrapped: Option<Box<HError>>,
    #[serde(default)]
    details: String,
    stack: Option<Stacktrace>,
}

impl HError {
    /// Create a leaf node from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Create a node from any error value.
    ///
    /// An `HError` passes through unchanged. Any other error becomes a node
    /// holding its rendered message, with its `source()` chain folded into
    /// nested nodes so the whole causal history is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use herror::HError;
    ///
    /// let original = HError::new("disk full");
    /// assert_eq!(HError::from_error(original.clone()), original);
    ///
    /// let io = std::io::Error::other("permission denied");
    /// assert_eq!(HError::from_error(io).message(), "permission denied");
    /// ```
    pub fn from_error<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(err);
        match boxed.downcast::<HError>() {
            Ok(chain) => *chain,
            Err(foreign) => Self::fold(foreign.as_ref()),
        }
    }

    fn fold(err: &(dyn Error + 'static)) -> Self {
        if let Some(chain) = err.downcast_ref::<HError>() {
            return chain.clone();
        }
        Self {
            message: err.to_string(),
            wrapped: err.source().map(|source| Box::new(Self::fold(source))),
            ..Default::default()
        }
    }

    /// Return a new node that carries this node's message, details and stack
    /// with `cause` as its immediate cause.
    ///
    /// `self` is left untouched. A cause already present on `self` is
    /// replaced in the returned node.
    pub fn wrap<E>(&self, cause: E) -> HError
    where
        E: Error + Send + Sync + 'static,
    {
        HError {
            message: self.message.clone(),
            wrapped: Some(Box::new(HError::from_error(cause))),
            details: self.details.clone(),
            stack: self.stack.clone(),
        }
    }

    /// The immediate cause, if any.
    pub fn unwrap(&self) -> Option<&HError> {
        self.wrapped.as_deref()
    }

    /// Report whether this node or any deeper node has the same message as
    /// the rendered `target`.
    ///
    /// Matching compares message text only. Two unrelated errors with the
    /// same text match each other.
    ///
    /// # Examples
    ///
    /// ```
    /// use herror::HError;
    ///
    /// let err = HError::new("request failed").wrap(HError::new("timeout"));
    /// assert!(err.matches(&HError::new("timeout")));
    /// assert!(!err.matches(&HError::new("refused")));
    /// ```
    pub fn matches(&self, target: &dyn Error) -> bool {
        let needle = target.to_string();
        self.chain().any(|node| node.message == needle)
    }

    /// Iterate over this node and all deeper causes, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Attach the current call stack to this node and return the same node.
    ///
    /// Frames from the runtime and from herror itself are left out. When the
    /// platform reports no frames the node ends up without a stack.
    /// [`StackConfig::default`] applies; no configuration file is read.
    pub fn capture_stack(&mut self) -> &mut Self {
        self.capture_stack_with(&StackConfig::default(), &[])
    }

    /// Like [`HError::capture_stack`], with explicit settings and extra frame
    /// filters applied after the default ones.
    pub fn capture_stack_with(
        &mut self,
        config: &StackConfig,
        filters: &[FrameFilter<'_>],
    ) -> &mut Self {
        self.stack = Stacktrace::capture_with(config, &BacktraceSource, filters);
        debug!(
            frames = self.stack.as_ref().map(|s| s.frames.len()),
            "Captured stack for error"
        );
        self
    }

    /// Consuming form of [`HError::capture_stack`].
    pub fn with_stack(mut self) -> Self {
        self.capture_stack();
        self
    }

    /// Append a pretty-printed dump of `values` to the details and return
    /// the same node.
    ///
    /// Each call adds a newline followed by one `(type) value` block per
    /// value. Earlier details are never replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use herror::HError;
    ///
    /// #[derive(Debug)]
    /// struct Payload {
    ///     number: i32,
    /// }
    ///
    /// let mut err = HError::new("something went wrong");
    /// err.add_details(&[&Payload { number: 123 }]);
    /// assert!(err.details().contains("number: 123"));
    /// ```
    pub fn add_details(&mut self, values: &[&dyn Dump]) -> &mut Self {
        let mut details = std::mem::take(&mut self.details);
        details.push('\n');
        for value in values {
            details.push_str(&value.dump());
        }
        self.details = details;
        self
    }

    /// Consuming form of [`HError::add_details`].
    pub fn with_details(mut self, values: &[&dyn Dump]) -> Self {
        self.add_details(values);
        self
    }

    /// This node's own message, without its causes.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Accumulated debug details.
    pub fn details(&self) -> &str {
        &self.details
    }

    /// The captured stack, if one was requested.
    pub fn stack(&self) -> Option<&Stacktrace> {
        self.stack.as_ref()
    }
}

impl From<&str> for HError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl fmt::Display for HError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(wrapped) = &self.wrapped {
            write!(f, "\n-> {}", wrapped)?;
        }
        Ok(())
    }
}

impl Error for HError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.wrapped
            .as_deref()
            .map(|wrapped| wrapped as &(dyn Error + 'static))
    }
}

/// Iterator over the nodes of a chain, outermost first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a HError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a HError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.wrapped.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Layered {
        message: &'static str,
        source: Option<Box<Layered>>,
    }

    impl fmt::Display for Layered {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl Error for Layered {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.source.as_deref().map(|s| s as &(dyn Error + 'static))
        }
    }

    #[test]
    fn from_error_is_identity_for_chains() {
        let err = HError::new("a").wrap(HError::new("b"));
        let again = HError::from_error(HError::from_error(err.clone()));
        assert_eq!(again, err);
    }

    #[test]
    fn foreign_source_chain_is_folded() {
        let foreign = Layered {
            message: "outer",
            source: Some(Box::new(Layered {
                message: "middle",
                source: Some(Box::new(Layered {
                    message: "inner",
                    source: None,
                })),
            })),
        };

        let err = HError::new("top").wrap(foreign);
        let messages: Vec<_> = err.chain().map(HError::message).collect();
        assert_eq!(messages, ["top", "outer", "middle", "inner"]);
        assert_eq!(err.to_string(), "top\n-> outer\n-> middle\n-> inner");
    }

    #[test]
    fn wrap_leaves_receiver_untouched() {
        let base = HError::new("base");
        let wrapped = base.wrap(HError::new("cause"));
        assert!(base.unwrap().is_none());
        assert_eq!(wrapped.unwrap().map(HError::message), Some("cause"));
    }

    #[test]
    fn wrap_replaces_existing_cause() {
        let first = HError::new("main").wrap(HError::new("first"));
        let second = first.wrap(HError::new("second"));
        assert_eq!(second.to_string(), "main\n-> second");
    }

    #[test]
    fn default_is_empty_message() {
        let err = HError::default();
        assert_eq!(err.to_string(), "");
        assert!(err.stack().is_none());
        assert_eq!(err.details(), "");
    }

    #[test]
    fn details_accumulate_in_call_order() {
        let mut err = HError::new("x");
        err.add_details(&[&"a"]).add_details(&[&"b"]);
        assert_eq!(err.details(), "\n(&str) \"a\"\n\n(&str) \"b\"\n");
    }
}
