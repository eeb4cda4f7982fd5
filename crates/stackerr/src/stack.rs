//! Bounded call-stack capture.
//!
//! ```text
//!   user fn ──► Category::wrap ──► Stack::capture(1)
//!                                        │
//!                                        ▼  backtrace::trace (no symbols)
//!                            [ip, ip, ip, ...]  ≤ MAX_DEPTH
//!                                        │
//!                                        ▼  only when printed
//!                              Frame::resolve per frame
//! ```
//!
//! Capture walks the stack once and copies raw instruction pointers.
//! Symbol lookup is deferred to render time, so wrapping an error on a
//! hot path costs one unwind and one small allocation.

use std::fmt;

use crate::frame::{Frame, FrameFormat};
use crate::render::RenderConfig;

/// Maximum number of frames kept per capture.
pub const MAX_DEPTH: usize = 32;

/// Headroom for frames of the unwinder itself, above `capture`.
const UNWINDER_FRAMES: usize = 16;

/// Ordered, immutable sequence of captured frames, innermost first.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    /// Capture the current call stack.
    ///
    /// Frames belonging to the unwinder and to `capture` itself are always
    /// dropped; `skip` additionally drops that many of the innermost
    /// remaining frames (library wrappers). Never fails: an unwalkable
    /// stack yields an empty `Stack`.
    #[inline(never)]
    pub fn capture(skip: usize) -> Stack {
        let anchor = Stack::capture as *const () as usize;
        let limit = UNWINDER_FRAMES
            .saturating_add(skip)
            .saturating_add(MAX_DEPTH);
        let mut raw: Vec<(usize, usize)> = Vec::with_capacity(MAX_DEPTH + UNWINDER_FRAMES);

        backtrace::trace(|frame| {
            raw.push((frame.ip() as usize, frame.symbol_address() as usize));
            raw.len() < limit
        });

        // Everything up to and including our own frame belongs to the
        // unwinder. Without a match keep the walk as-is.
        let anchored = raw.iter().position(|&(_, sym)| sym == anchor);
        let start = anchored.map_or(0, |i| i + 1).saturating_add(skip);

        let frames: Vec<Frame> = raw
            .iter()
            .skip(start)
            .take(MAX_DEPTH)
            .map(|&(ip, _)| Frame(ip))
            .collect();

        tracing::trace!(
            depth = frames.len(),
            skip,
            anchored = anchored.is_some(),
            "captured stack"
        );

        Stack { frames }
    }

    /// Build a stack from already-captured frames, keeping at most
    /// [`MAX_DEPTH`] of them.
    pub fn from_frames(mut frames: Vec<Frame>) -> Stack {
        frames.truncate(MAX_DEPTH);
        Stack { frames }
    }

    /// An empty stack.
    pub const fn empty() -> Stack {
        Stack { frames: Vec::new() }
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Write every frame in long-location form, each preceded by a newline.
    pub(crate) fn fmt_frames(&self, f: &mut fmt::Formatter<'_>, cfg: &RenderConfig) -> fmt::Result {
        for frame in &self.frames {
            write!(f, "\n{}", frame.display(FrameFormat::LongLocation, cfg))?;
        }
        Ok(())
    }

    /// Render all frames, one long-location entry per line.
    pub fn render(&self, cfg: &RenderConfig) -> String {
        let mut out = String::new();
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&frame.render(FrameFormat::LongLocation, cfg));
        }
        out
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderConfig::default()))
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("depth", &self.frames.len())
            .finish()
    }
}
