//! # stackerr: categorized errors with lazily resolved stacks
//!
//! An error value that keeps three things through any number of wraps:
//! a [`Category`] for status mapping, one field/message [`Context`], and
//! the call stack of every layer that wrapped it.
//!
//! ## Design
//!
//! - **Capture is cheap.** [`Stack::capture`] copies at most
//!   [`MAX_DEPTH`] raw instruction pointers. Symbols are looked up only
//!   when a stack is printed.
//! - **Values are immutable.** Wrapping or re-annotating builds a new
//!   [`Error`] that shares the cause chain by `Arc`.
//! - **Two wraps, two rules.** [`Category::wrap`] stamps its category;
//!   the free [`wrap`] inherits category and context from an inner
//!   [`Error`].
//! - **Rendering is explicit.** Long frames need a [`RenderConfig`]
//!   (dev vs prod path rules); it is passed in, never read from globals.
//!
//! ## Quick Start
//!
//! ```rust
//! use stackerr::{add_context, cause, get_category, get_context, wrap, Category, Directive, RenderConfig};
//!
//! fn find_user(id: u32) -> Result<(), stackerr::Error> {
//!     let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "db timeout");
//!     Err(Category::NotFound.wrap(io, format!("user {}", id)))
//! }
//!
//! let err = find_user(7).unwrap_err();
//! let err = add_context(err, "id", "unknown user");
//! let err = wrap(err, "handler");
//!
//! assert_eq!(err.to_string(), "handler: user 7: db timeout");
//! assert_eq!(get_category(&err), Category::NotFound);
//! assert_eq!(err.status(), 404);
//! assert_eq!(get_context(&err).unwrap().field, "id");
//! assert_eq!(cause(&err).to_string(), "db timeout");
//!
//! let rich = err.render(Directive::Rich, &RenderConfig::prod("shop"));
//! assert!(rich.starts_with("handler: user 7: db timeout\n"));
//! ```
//!
//! ## Feature Flags
//!
//! | Flag         | Effect |
//! |--------------|--------|
//! | `production` | `RenderConfig::default()` uses `Mode::Prod` path trimming |

mod frame;
mod stack;
mod render;
mod category;
mod context;
mod error;
mod accessors;
#[macro_use]
mod macros;
mod convert;
mod report;

pub mod env;

// ── Public API ────────────────────────────────────────────────────

pub use frame::{Frame, FrameDisplay, FrameFormat, UNKNOWN};
pub use stack::{Stack, MAX_DEPTH};
pub use render::{rich, Directive, Mode, RenderConfig, Rich, RichRender};
pub use category::{status_for, Category};
pub use context::Context;
pub use error::{
    add_context, new, newf, wrap, wrap_rich, wrap_with_category, wrapf, BoxError, Error,
};
pub use accessors::{cause, chain, get_category, get_context, status_of};
pub use convert::ResultExt;
pub use report::Report;

/// Convenience Result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
