//! Raw call-stack collection.

use tracing::trace;

/// An unresolved call-stack entry as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    /// Demangled symbol name, if the symbol could be resolved
    pub function: Option<String>,
    /// Source file path, if debug info is available
    pub file: Option<String>,
    /// Line number, 0 when unknown
    pub line: u32,
}

impl RawFrame {
    /// Create a fully resolved raw frame.
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: Some(function.into()),
            file: Some(file.into()),
            line,
        }
    }
}

/// Capability to walk the calling thread's stack.
///
/// Implementations return frames innermost first, dropping the first `skip`
/// entries and stopping once `max_frames` have been collected.
pub trait FrameSource {
    /// Collect at most `max_frames` raw frames after skipping `skip`.
    fn collect(&self, max_frames: usize, skip: usize) -> Vec<RawFrame>;
}

/// Frame source backed by the platform unwinder via the `backtrace` crate.
///
/// Inlined calls resolve to several symbols for one physical frame; each of
/// them becomes its own [`RawFrame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceSource;

impl FrameSource for BacktraceSource {
    fn collect(&self, max_frames: usize, skip: usize) -> Vec<RawFrame> {
        let mut frames = Vec::with_capacity(max_frames.min(64));
        let mut walked = 0usize;

        backtrace::trace(|frame| {
            walked += 1;
            if walked <= skip {
                return true;
            }

            let mut resolved = false;
            backtrace::resolve_frame(frame, |symbol| {
                if frames.len() >= max_frames {
                    return;
                }
                resolved = true;
                frames.push(RawFrame {
                    function: symbol.name().map(|name| format!("{name:#}")),
                    file: symbol
                        .filename()
                        .map(|path| path.to_string_lossy().into_owned()),
                    line: symbol.lineno().unwrap_or(0),
                });
            });

            if !resolved && frames.len() < max_frames {
                frames.push(RawFrame::default());
            }
            frames.len() < max_frames
        });

        trace!(walked, collected = frames.len(), "Collected raw frames");
        frames
    }
}
