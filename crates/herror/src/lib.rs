//! herror: error chains with debug details and captured stacks.
//!
//! An [`HError`] is one link in a chain of causes. Each link carries its own
//! message, an optional deeper cause, free-form debug details and, when asked
//! for, the call stack at the point of capture.
//!
//! # Quick Start
//!
//! ```
//! use herror::HError;
//!
//! fn step() -> Result<(), std::io::Error> {
//!     Err(std::io::Error::other("cannot move"))
//! }
//!
//! fn perform_task() -> Result<(), HError> {
//!     step().map_err(|e| HError::new("task has failed").wrap(e))
//! }
//!
//! let err = perform_task().unwrap_err();
//! assert_eq!(err.to_string(), "task has failed\n-> cannot move");
//! ```
//!
//! # Ownership of builder calls
//!
//! - [`HError::wrap`] borrows the node and returns a new one. The original
//!   stays valid and unchanged.
//! - [`HError::capture_stack`] and [`HError::add_details`] mutate the node they
//!   are called on and hand the same node back.
//!
//! # Architecture
//!
//! - `herror_error` - Failure types of the library itself
//! - `herror_stack` - Stack capture, frame building and symbol parsing
//! - `herror` - The error chain; re-exports the other two

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod details;
mod json;
mod protocol;

pub use chain::{Chain, HError};
pub use details::Dump;
pub use protocol::{is, unwrap, wrap};

pub use herror_error::{ConfigError, HerrorError, HerrorErrorKind, HerrorResult, JsonError};
pub use herror_stack::{
    BacktraceSource, Frame, FrameFilter, FrameSource, RawFrame, StackConfig, StackConfigBuilder,
    Stacktrace, Symbol, UNKNOWN, is_in_app, parse_symbol,
};
