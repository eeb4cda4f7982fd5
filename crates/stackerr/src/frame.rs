//! Frame resolution.
//!
//! A [`Frame`] is one raw instruction pointer captured by
//! [`Stack::capture`](crate::Stack::capture). Nothing is resolved at
//! capture time: file, line and function name are looked up through the
//! symbolizer every time they are asked for.
//!
//! # Formats
//!
//! | `FrameFormat`  | Output                                         |
//! |----------------|------------------------------------------------|
//! | `Short`        | `error.rs`                                     |
//! | `Long`         | `stackerr::error::wrap` `\n\t` trimmed path    |
//! | `Line`         | `42`                                           |
//! | `Name`         | `error::wrap`                                  |
//! | `Location`     | `error.rs:42`                                  |
//! | `LongLocation` | `Long` + `:42`                                 |
//!
//! Unresolvable addresses render as `unknown` with line `0`.

use std::ffi::c_void;
use std::fmt;

use crate::render::RenderConfig;

/// Sentinel for anything the symbolizer could not resolve.
pub const UNKNOWN: &str = "unknown";

/// Path prefixes of sources that do not belong to the project.
///
/// The leading separator is dropped when slicing, so a std frame renders
/// as `rustc/<hash>/library/std/src/...` and a dependency as
/// `registry/src/<index>/<crate>/src/...`.
const TOOLCHAIN_ROOTS: &[&str] = &["/rustc/", "/registry/src/", "/git/checkouts/", "/toolchains/"];

/// Frame-level render directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameFormat {
    Short,
    Long,
    Line,
    Name,
    Location,
    LongLocation,
}

/// One captured instruction pointer.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Frame(pub usize);

/// Result of a single symbolizer lookup.
struct Resolved {
    file: Option<String>,
    line: u32,
    name: Option<String>,
}

impl Frame {
    /// Raw instruction pointer.
    #[inline]
    pub const fn ip(&self) -> usize {
        self.0
    }

    fn resolve(&self) -> Resolved {
        let mut out = Resolved { file: None, line: 0, name: None };
        if self.0 == 0 {
            return out;
        }

        let mut seen = false;
        // Inlined frames report several symbols for one address; the first
        // one is the innermost and the one we want.
        backtrace::resolve(self.0 as *mut c_void, |symbol| {
            if seen {
                return;
            }
            seen = true;
            out.name = symbol.name().map(|n| format!("{:#}", n));
            out.file = symbol.filename().map(|p| p.display().to_string());
            out.line = symbol.lineno().unwrap_or(0);
        });
        out
    }

    /// Full path of the source file, or `"unknown"`.
    pub fn file(&self) -> String {
        self.resolve().file.unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Source line, or `0` when unknown.
    pub fn line(&self) -> u32 {
        self.resolve().line
    }

    /// Fully qualified function name, or `"unknown"`.
    pub fn name(&self) -> String {
        self.resolve().name.unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Function name without its crate root.
    pub fn function(&self) -> String {
        funcname(&self.name()).to_string()
    }

    /// True if the symbolizer found a function for this address.
    pub fn is_resolved(&self) -> bool {
        self.resolve().name.is_some()
    }

    /// Render this frame in the requested format.
    pub fn render(&self, format: FrameFormat, cfg: &RenderConfig) -> String {
        self.display(format, cfg).to_string()
    }

    /// `Display` adapter for this frame.
    pub fn display<'a>(&'a self, format: FrameFormat, cfg: &'a RenderConfig) -> FrameDisplay<'a> {
        FrameDisplay { frame: self, format, cfg }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, format: FrameFormat, cfg: &RenderConfig) -> fmt::Result {
        let r = self.resolve();
        let file = r.file.as_deref().unwrap_or(UNKNOWN);
        let name = r.name.as_deref().unwrap_or(UNKNOWN);

        match format {
            FrameFormat::Short => f.write_str(base_name(file)),
            FrameFormat::Long => write!(f, "{}\n\t{}", name, display_path(file, cfg)),
            FrameFormat::Line => write!(f, "{}", r.line),
            FrameFormat::Name => f.write_str(funcname(name)),
            FrameFormat::Location => write!(f, "{}:{}", base_name(file), r.line),
            FrameFormat::LongLocation => {
                write!(f, "{}\n\t{}:{}", name, display_path(file, cfg), r.line)
            }
        }
    }
}

/// Bound frame + format + config, ready for `{}`.
pub struct FrameDisplay<'a> {
    frame: &'a Frame,
    format: FrameFormat,
    cfg: &'a RenderConfig,
}

impl fmt::Display for FrameDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.frame.write(f, self.format, self.cfg)
    }
}

impl fmt::Display for Frame {
    /// `{}` is `file.rs:42`; `{:#}` is the long location under the
    /// default [`RenderConfig`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write(f, FrameFormat::LongLocation, &RenderConfig::default())
        } else {
            self.write(f, FrameFormat::Location, &RenderConfig::default())
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:#x})", self.0)
    }
}

// ── Path and name helpers ─────────────────────────────────────────

/// Last path component, accepting both separators.
pub(crate) fn base_name(path: &str) -> &str {
    match path.rfind(|c| c == '/' || c == '\\') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// Apply the environment-aware path rule.
///
/// `Dev` keeps the path untouched. `Prod` slices from the project marker,
/// then from the first toolchain root, and finally falls back to the bare
/// file name so no local layout leaks.
pub(crate) fn display_path<'a>(path: &'a str, cfg: &RenderConfig) -> &'a str {
    if !cfg.mode.is_prod() {
        return path;
    }

    if let Some(marker) = cfg.project_root.as_deref() {
        if let Some(i) = path.find(marker) {
            return &path[i..];
        }
    }

    for root in TOOLCHAIN_ROOTS {
        if let Some(i) = path.find(root) {
            return &path[i + 1..];
        }
    }

    base_name(path)
}

/// Strip the crate root from a qualified name.
///
/// Only separators outside angle brackets count, so
/// `<app::Store as core::fmt::Debug>::fmt` keeps its qualified self type.
pub(crate) fn funcname(name: &str) -> &str {
    let bytes = name.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i + 1 < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes[i + 1] == b':' => return &name[i + 2..],
            _ => {}
        }
        i += 1;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Mode;

    #[inline(never)]
    fn here() -> Frame {
        let mut ip = 0;
        backtrace::trace(|frame| {
            ip = frame.ip() as usize;
            false
        });
        Frame(ip)
    }

    #[test]
    fn null_frame_is_unknown() {
        let f = Frame(0);
        assert_eq!(f.file(), UNKNOWN);
        assert_eq!(f.name(), UNKNOWN);
        assert_eq!(f.line(), 0);
        assert!(!f.is_resolved());
        assert_eq!(f.render(FrameFormat::Location, &RenderConfig::default()), "unknown:0");
    }

    #[test]
    fn live_frame_resolves() {
        let f = here();
        assert_ne!(f.ip(), 0);
        // Symbols may be stripped in some CI profiles; only check shape then.
        if f.is_resolved() {
            assert_ne!(f.name(), UNKNOWN);
            let long = f.render(FrameFormat::Long, &RenderConfig::default());
            assert!(long.contains("\n\t"), "long form: {}", long);
        }
    }

    #[test]
    fn base_name_both_separators() {
        assert_eq!(base_name("/home/dev/shop/src/main.rs"), "main.rs");
        assert_eq!(base_name("C:\\dev\\shop\\src\\main.rs"), "main.rs");
        assert_eq!(base_name("main.rs"), "main.rs");
    }

    #[test]
    fn dev_keeps_full_path() {
        let cfg = RenderConfig::new().mode(Mode::Dev).project_root("shop");
        let p = "/home/dev/work/shop/src/orders.rs";
        assert_eq!(display_path(p, &cfg), p);
    }

    #[test]
    fn prod_slices_at_project() {
        let cfg = RenderConfig::prod("shop");
        assert_eq!(
            display_path("/home/dev/work/shop/src/orders.rs", &cfg),
            "shop/src/orders.rs"
        );
    }

    #[test]
    fn prod_falls_back_to_toolchain() {
        let cfg = RenderConfig::prod("shop");
        assert_eq!(
            display_path("/rustc/90b35a623/library/std/src/rt.rs", &cfg),
            "rustc/90b35a623/library/std/src/rt.rs"
        );
        assert_eq!(
            display_path("/home/ci/.cargo/registry/src/index.crates.io-6f17/tokio-1.45.1/src/lib.rs", &cfg),
            "registry/src/index.crates.io-6f17/tokio-1.45.1/src/lib.rs"
        );
    }

    #[test]
    fn prod_without_any_marker_uses_base_name() {
        let cfg = RenderConfig::new().mode(Mode::Prod);
        assert_eq!(display_path("/srv/build/app/src/db.rs", &cfg), "db.rs");
    }

    #[test]
    fn funcname_strips_crate() {
        assert_eq!(funcname("shop::orders::Repo::find"), "orders::Repo::find");
        assert_eq!(funcname("main"), "main");
        assert_eq!(funcname("<shop::Repo as core::fmt::Debug>::fmt"), "fmt");
        assert_eq!(funcname("shop::run::{{closure}}"), "run::{{closure}}");
    }

    #[test]
    fn debug_is_hex() {
        assert_eq!(format!("{:?}", Frame(0x2a)), "Frame(0x2a)");
    }
}
