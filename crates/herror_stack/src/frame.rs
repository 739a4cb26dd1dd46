//! Structured stack frames.

use crate::{RawFrame, parse_symbol};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder for frame fields the platform could not resolve.
pub const UNKNOWN: &str = "unknown";

/// One entry of a captured call stack.
///
/// Every field always exists. String fields hold [`UNKNOWN`] when the
/// platform supplied nothing, except `receiver_type` which stays empty for
/// free functions. Empty, zero and `false` values are left out of the JSON
/// form and restored on decode.
///
/// # Examples
///
/// ```
/// use herror_stack::Frame;
///
/// let frame = Frame::new("my_app::jobs::Runner::start", "/srv/my_app/src/jobs.rs", 42);
/// assert_eq!(frame.package, "my_app::jobs");
/// assert_eq!(frame.receiver_type, "Runner");
/// assert_eq!(frame.function, "start");
/// assert_eq!(frame.filename, "jobs.rs");
/// assert!(frame.in_app);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    /// Function or method name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub function: String,
    /// Receiver type for methods
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub receiver_type: String,
    /// Package (module path) of the function
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,
    /// Last component of the source path
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename: String,
    /// Source path as reported by the debug info
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub abs_path: String,
    /// Line number, 0 when unknown
    #[serde(default, skip_serializing_if = "is_zero")]
    pub line: u32,
    /// Whether the frame belongs to application code
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub in_app: bool,
}

fn is_zero(line: &u32) -> bool {
    *line == 0
}

impl Frame {
    /// Build a frame from a raw symbol name, a source path and a line.
    ///
    /// An empty `function` or `file` yields [`UNKNOWN`] in the fields derived
    /// from it.
    pub fn new(function: &str, file: &str, line: u32) -> Self {
        let (abs_path, filename) = if file.is_empty() {
            (UNKNOWN.to_string(), UNKNOWN.to_string())
        } else {
            let filename = Path::new(file)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| UNKNOWN.to_string());
            (file.to_string(), filename)
        };

        let (package, receiver_type, function) = if function.is_empty() {
            (UNKNOWN.to_string(), String::new(), UNKNOWN.to_string())
        } else {
            let symbol = parse_symbol(function);
            (symbol.package, symbol.receiver_type, symbol.function)
        };

        let in_app = is_in_app(&abs_path, &package);

        Self {
            function,
            receiver_type,
            package,
            filename,
            abs_path,
            line,
            in_app,
        }
    }

    /// Build a frame from an unresolved platform record.
    pub fn from_raw(raw: &RawFrame) -> Self {
        Self::new(
            raw.function.as_deref().unwrap_or_default(),
            raw.file.as_deref().unwrap_or_default(),
            raw.line,
        )
    }
}

/// Toolchain and dependency-cache locations that never hold application code.
const EXTERNAL_ROOTS: &[&str] = &["/rustc/", "/rustlib/src/", "/.cargo/registry/", "/.cargo/git/"];

/// Classify a frame as application code.
///
/// A frame is external when its file lives under the toolchain sources or the
/// dependency cache, or when its package or path has a `vendor` segment.
///
/// # Examples
///
/// ```
/// use herror_stack::is_in_app;
///
/// assert!(is_in_app("/srv/my_app/src/main.rs", "my_app"));
/// assert!(!is_in_app("/rustc/90b35a6/library/std/src/rt.rs", "std::rt"));
/// assert!(!is_in_app("/srv/my_app/vendor/serde/src/de.rs", "serde::de"));
/// ```
pub fn is_in_app(abs_path: &str, package: &str) -> bool {
    let normalized = abs_path.replace('\\', "/");
    if EXTERNAL_ROOTS.iter().any(|root| normalized.contains(root)) {
        return false;
    }

    let vendored_package = package
        .split(['/', ':'])
        .any(|segment| segment == "vendor");
    let vendored_path = normalized.split('/').any(|segment| segment == "vendor");

    !(vendored_package || vendored_path)
}
