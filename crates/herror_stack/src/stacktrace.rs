//! Stack capture with frame filtering.

use crate::{BacktraceSource, Frame, FrameSource, StackConfig, UNKNOWN};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Predicate over a frame; returning `true` drops the frame.
pub type FrameFilter<'a> = &'a dyn Fn(&Frame) -> bool;

/// Root modules of this workspace. Their frames never appear in a capture.
pub const OWN_PACKAGES: &[&str] = &["herror", "herror_stack"];

/// The ordered frames of a call stack, outermost first.
///
/// # Examples
///
/// ```
/// use herror_stack::{Frame, Stacktrace};
///
/// let stack = Stacktrace {
///     frames: vec![Frame::new("my_app::main", "/srv/my_app/src/main.rs", 3)],
/// };
/// let json = serde_json::to_string(&stack).unwrap();
/// assert!(json.starts_with(r#"{"frames":[{"function":"main""#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stacktrace {
    /// Frames from the outermost ancestor to the frame nearest the capture
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
}

impl Stacktrace {
    /// Capture the current call stack with [`StackConfig::default`].
    ///
    /// No configuration file is read. Pass the result of
    /// [`StackConfig::load`] to [`Stacktrace::capture_with`] to honour one.
    ///
    /// Runtime frames and this workspace's own frames are removed, then each
    /// of `filters` is applied in order. Returns `None` when the platform
    /// reports no frames at all.
    pub fn capture(filters: &[FrameFilter<'_>]) -> Option<Self> {
        Self::capture_with(&StackConfig::default(), &BacktraceSource, filters)
    }

    /// Capture from an explicit frame source and configuration.
    #[instrument(skip_all, fields(max_frames = config.max_frames(), frame_skip = config.skip()))]
    pub fn capture_with(
        config: &StackConfig,
        source: &dyn FrameSource,
        filters: &[FrameFilter<'_>],
    ) -> Option<Self> {
        let raw = source.collect(*config.max_frames(), *config.skip());
        if raw.is_empty() {
            debug!("No frames available");
            return None;
        }

        let mut frames: Vec<Frame> = raw.iter().map(Frame::from_raw).collect();
        frames.retain(|frame| !is_noise(config, frame));
        for filter in filters {
            frames.retain(|frame| !filter(frame));
        }

        // Sources walk innermost first.
        frames.reverse();

        debug!(raw = raw.len(), kept = frames.len(), "Captured stack");
        Some(Self { frames })
    }

    /// Returns true if no frames survived filtering.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn is_noise(config: &StackConfig, frame: &Frame) -> bool {
    if frame.package.is_empty() || frame.package == UNKNOWN {
        return true;
    }
    if config.is_runtime_package(&frame.package) {
        return true;
    }
    let root = frame
        .package
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    OWN_PACKAGES.contains(&root)
}
