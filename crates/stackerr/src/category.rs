//! Error categories and their status mapping.
//!
//! | Category        | Status |
//! |-----------------|--------|
//! | `Uncategorized` | 500    |
//! | `BadRequest`    | 400    |
//! | `NotFound`      | 404    |
//! | `InternalError` | 500    |
//!
//! A category is fixed when an error is built. Category-scoped wraps
//! ([`Category::wrap`]) always stamp their own category; the free
//! [`wrap`](crate::wrap) inherits it.

use std::fmt;

use crate::error::{BoxError, Error};
use crate::render::RichRender;
use crate::stack::Stack;

/// Closed classification of an error's nature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Uncategorized,
    BadRequest,
    NotFound,
    InternalError,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Uncategorized,
        Category::BadRequest,
        Category::NotFound,
        Category::InternalError,
    ];

    /// External status code for this category.
    #[inline]
    pub const fn status(self) -> u16 {
        match self {
            Category::BadRequest => 400,
            Category::NotFound => 404,
            Category::Uncategorized | Category::InternalError => 500,
        }
    }

    /// True for categories that blame the caller (4xx).
    #[inline]
    pub const fn is_client(self) -> bool {
        self.status() < 500
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Uncategorized => "uncategorized",
            Category::BadRequest => "bad_request",
            Category::NotFound => "not_found",
            Category::InternalError => "internal_error",
        }
    }

    // ── Constructors ──────────────────────────────────────────────

    /// New error of this category. Captures no stack.
    ///
    /// ```
    /// use stackerr::Category;
    /// let e = Category::NotFound.new("user not found");
    /// assert_eq!(e.category(), Category::NotFound);
    /// assert!(e.stack().is_empty());
    /// ```
    pub fn new(self, message: impl Into<String>) -> Error {
        Error::message(self, message.into(), Stack::empty())
    }

    /// New error with a formatted message. Captures no stack.
    pub fn newf(self, args: fmt::Arguments<'_>) -> Error {
        Error::message(self, fmt::format(args), Stack::empty())
    }

    /// Like [`Category::new`], but captures the caller's stack.
    #[inline(never)]
    pub fn new_traced(self, message: impl Into<String>) -> Error {
        Error::message(self, message.into(), Stack::capture(1))
    }

    /// Like [`Category::newf`], but captures the caller's stack.
    #[inline(never)]
    pub fn newf_traced(self, args: fmt::Arguments<'_>) -> Error {
        Error::message(self, fmt::format(args), Stack::capture(1))
    }

    /// Wrap `err` behind `message` and stamp this category on the result,
    /// regardless of what `err` carried before.
    #[inline(never)]
    pub fn wrap(self, err: impl Into<BoxError>, message: impl Into<String>) -> Error {
        Error::wrapped(Some(self), err.into(), message.into(), Stack::capture(1))
    }

    /// [`Category::wrap`] with a formatted message.
    #[inline(never)]
    pub fn wrapf(self, err: impl Into<BoxError>, args: fmt::Arguments<'_>) -> Error {
        Error::wrapped(Some(self), err.into(), fmt::format(args), Stack::capture(1))
    }

    /// Wrap a rich-renderable foreign error under this category.
    #[inline(never)]
    pub fn wrap_rich<R: RichRender>(self, err: R, message: impl Into<String>) -> Error {
        Error::wrapped_rich(self, err, message.into(), Stack::capture(1))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External status code for `category`.
#[inline]
pub const fn status_for(category: Category) -> u16 {
    category.status()
}
