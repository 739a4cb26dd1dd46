//! Stack capture for the herror error-chain library.
//!
//! This crate turns the current call stack into an ordered [`Stacktrace`] of
//! structured [`Frame`]s. Each frame records the package, receiver type and
//! function parsed out of the raw symbol name, the file and line it points
//! at, and whether it belongs to application code or to the toolchain and
//! its dependencies.
//!
//! # Ordering
//!
//! Captured frames run from the outermost remaining ancestor to the frame
//! closest to the capture call. Runtime frames and this workspace's own
//! frames are removed before callers see the trace.
//!
//! # Examples
//!
//! ```
//! use herror_stack::{Frame, Stacktrace};
//!
//! let skip_closures = |frame: &Frame| frame.function.ends_with("{{closure}}");
//! if let Some(stack) = Stacktrace::capture(&[&skip_closures]) {
//!     assert!(stack.frames.iter().all(|f| !f.function.ends_with("{{closure}}")));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod frame;
mod source;
mod stacktrace;
mod symbol;

pub use config::{StackConfig, StackConfigBuilder};
pub use frame::{Frame, UNKNOWN, is_in_app};
pub use source::{BacktraceSource, FrameSource, RawFrame};
pub use stacktrace::{FrameFilter, OWN_PACKAGES, Stacktrace};
pub use symbol::{Symbol, parse_symbol};
