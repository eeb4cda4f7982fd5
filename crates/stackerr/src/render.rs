//! Rendering configuration and the rich-render capability.
//!
//! Long-form frame rendering depends on where the process runs. A
//! [`RenderConfig`] carries that knowledge explicitly so nothing in the
//! crate reads global state at format time.
//!
//! | Mode   | Source path in long frames                               |
//! |--------|----------------------------------------------------------|
//! | `Dev`  | Full path as recorded in debug info                      |
//! | `Prod` | Sliced from the project marker, else the toolchain root  |

use std::fmt;

/// Deployment mode used to pick the path-truncation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Dev,
    Prod,
}

impl Mode {
    /// Interpret a mode flag. Only `"prod"` selects [`Mode::Prod`].
    ///
    /// ```
    /// use stackerr::Mode;
    /// assert_eq!(Mode::from_flag("prod"), Mode::Prod);
    /// assert_eq!(Mode::from_flag("staging"), Mode::Dev);
    /// ```
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim() == "prod" {
            Mode::Prod
        } else {
            Mode::Dev
        }
    }

    #[inline]
    pub fn is_prod(&self) -> bool {
        matches!(self, Mode::Prod)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Dev => f.write_str("dev"),
            Mode::Prod => f.write_str("prod"),
        }
    }
}

/// Read-only render settings handed to frame and error renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Path-truncation rule selector
    pub mode: Mode,

    /// Project root marker, e.g. the repository directory name
    pub project_root: Option<String>,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "production")] {
        const DEFAULT_MODE: Mode = Mode::Prod;
    } else {
        const DEFAULT_MODE: Mode = Mode::Dev;
    }
}

impl Default for Mode {
    fn default() -> Self {
        DEFAULT_MODE
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            project_root: None,
        }
    }
}

impl RenderConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deployment mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the project root marker. Empty markers are ignored.
    pub fn project_root(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        self.project_root = if marker.is_empty() { None } else { Some(marker) };
        self
    }

    /// Shorthand for a production configuration with a project marker.
    pub fn prod(marker: impl Into<String>) -> Self {
        Self::new().mode(Mode::Prod).project_root(marker)
    }
}

/// Error-level format directive.
///
/// | Directive | Output                                              |
/// |-----------|-----------------------------------------------------|
/// | `Str`     | flattened message                                   |
/// | `Value`   | flattened message                                   |
/// | `Quoted`  | flattened message, quoted and escaped               |
/// | `Rich`    | flattened message + stack frames, nested causes too |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Str,
    Quoted,
    Value,
    Rich,
}

/// Capability for errors that can render a diagnostic form beyond
/// their `Display` message.
///
/// The rich renderer of an outer error recurses into a nested cause
/// only when that cause implements this trait; other causes contribute
/// their plain message and nothing else.
pub trait RichRender: std::error::Error + Send + Sync + 'static {
    /// Write the rich rendering of `self` into `f`.
    fn fmt_rich(&self, f: &mut fmt::Formatter<'_>, cfg: &RenderConfig) -> fmt::Result;

    /// Upcast used when walking a cause chain.
    fn as_error(&self) -> &(dyn std::error::Error + 'static);
}

/// `Display` adapter that renders any [`RichRender`] with a given config.
pub struct Rich<'a, R: ?Sized> {
    pub(crate) inner: &'a R,
    pub(crate) cfg: &'a RenderConfig,
}

impl<'a, R: RichRender + ?Sized> fmt::Display for Rich<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_rich(f, self.cfg)
    }
}

/// Wrap `value` so that `{}` produces its rich rendering.
pub fn rich<'a, R: RichRender + ?Sized>(value: &'a R, cfg: &'a RenderConfig) -> Rich<'a, R> {
    Rich { inner: value, cfg }
}
