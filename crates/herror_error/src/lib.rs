//! Error types for the herror workspace.
//!
//! These are the failures raised by the herror crates themselves (malformed
//! JSON payloads, unreadable configuration). They are distinct from
//! `herror::HError`, the error-chain value the library hands to its users.
//!
//! # Error Hierarchy
//!
//! - `HerrorErrorKind` enum lists the specific failure families
//! - Each family is a struct carrying a message plus the source location
//!   captured with `#[track_caller]`
//! - `HerrorError` boxes the kind so results stay small
//!
//! # Examples
//!
//! ```
//! use herror_error::{HerrorResult, JsonError};
//!
//! fn decode() -> HerrorResult<()> {
//!     Err(JsonError::new("expected value at line 1 column 1"))?
//! }
//!
//! match decode() {
//!     Ok(()) => println!("decoded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;

pub use config::ConfigError;
pub use error::{HerrorError, HerrorErrorKind, HerrorResult};
pub use json::JsonError;
