use std::io;

use crate::category::Category;
use crate::context::Context;
use crate::error::{BoxError, Error};
use crate::stack::Stack;

/// Category implied by an `io::ErrorKind`.
fn io_category(kind: io::ErrorKind) -> Category {
    match kind {
        io::ErrorKind::NotFound => Category::NotFound,
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => Category::BadRequest,
        _ => Category::InternalError,
    }
}

// ── From<io::Error> ───────────────────────────────────────────────

impl From<io::Error> for Error {
    /// Adopt an `io::Error`, categorized by its kind.
    ///
    /// The io error stays the root cause and the message is unchanged;
    /// the stack of the `?` site is captured.
    #[inline(never)]
    fn from(err: io::Error) -> Self {
        let category = io_category(err.kind());
        Error::adopted(category, Box::new(err), Stack::capture(1))
    }
}

// ── Into<io::Error> ───────────────────────────────────────────────

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err.category() {
            Category::NotFound => io::ErrorKind::NotFound,
            Category::BadRequest => io::ErrorKind::InvalidInput,
            Category::Uncategorized | Category::InternalError => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}

// ── ResultExt: annotate errors during propagation ────────────────

/// Extension trait for wrapping the error side of any `Result`.
///
/// ```
/// use stackerr::{Category, ResultExt};
///
/// fn read() -> Result<String, std::io::Error> {
///     Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
/// }
///
/// let err = read().wrap_err("loading config").unwrap_err();
/// assert_eq!(err.to_string(), "loading config: disk gone");
///
/// let err = read().categorize(Category::NotFound, "loading config").unwrap_err();
/// assert_eq!(err.category(), Category::NotFound);
/// ```
pub trait ResultExt<T> {
    /// Free [`wrap`](crate::wrap): category and context carry over.
    fn wrap_err(self, message: impl Into<String>) -> Result<T, Error>;

    /// [`ResultExt::wrap_err`] with a lazily built message.
    fn wrap_err_with<M, F>(self, f: F) -> Result<T, Error>
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Category-scoped wrap: `category` replaces whatever was there.
    fn categorize(self, category: Category, message: impl Into<String>) -> Result<T, Error>;

    /// Attach a field/message context without adding a layer.
    fn err_context(self, field: impl Into<String>, message: impl Into<String>) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline(never)]
    fn wrap_err(self, message: impl Into<String>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::wrapped(None, e.into(), message.into(), Stack::capture(1))),
        }
    }

    #[inline(never)]
    fn wrap_err_with<M, F>(self, f: F) -> Result<T, Error>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::wrapped(None, e.into(), f().into(), Stack::capture(1))),
        }
    }

    #[inline(never)]
    fn categorize(self, category: Category, message: impl Into<String>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::wrapped(
                Some(category),
                e.into(),
                message.into(),
                Stack::capture(1),
            )),
        }
    }

    fn err_context(self, field: impl Into<String>, message: impl Into<String>) -> Result<T, Error> {
        self.map_err(|e| Error::attached(e.into(), Context::new(field, message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessors::cause;

    #[test]
    fn from_io_not_found() {
        let e = Error::from(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(e.category(), Category::NotFound);
        assert_eq!(e.to_string(), "no such file");
        assert!(cause(&e).is::<io::Error>());
        assert!(!e.stack().is_empty());
    }

    #[test]
    fn from_io_categories() {
        let cat = |k| Error::from(io::Error::new(k, "x")).category();
        assert_eq!(cat(io::ErrorKind::InvalidInput), Category::BadRequest);
        assert_eq!(cat(io::ErrorKind::InvalidData), Category::BadRequest);
        assert_eq!(cat(io::ErrorKind::PermissionDenied), Category::InternalError);
        assert_eq!(cat(io::ErrorKind::TimedOut), Category::InternalError);
    }

    #[test]
    fn question_mark_conversion() {
        fn inner() -> Result<(), io::Error> {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
        }
        fn outer() -> Result<(), Error> {
            inner()?;
            Ok(())
        }
        let e = outer().unwrap_err();
        assert_eq!(e.status(), 404);
    }

    #[test]
    fn into_io_error() {
        let io_err: io::Error = Category::BadRequest.new("bad").into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(io_err.to_string(), "bad");
    }

    #[test]
    fn result_ext_wrap_err() {
        let r: Result<(), &str> = Err("socket closed");
        let e = r.wrap_err("sending").unwrap_err();
        assert_eq!(e.to_string(), "sending: socket closed");
        assert_eq!(e.category(), Category::Uncategorized);
    }

    #[test]
    fn result_ext_preserves_inner_category() {
        let r: Result<(), Error> = Err(Category::NotFound.new("no row"));
        let e = r.wrap_err_with(|| format!("user {}", 5)).unwrap_err();
        assert_eq!(e.category(), Category::NotFound);
        assert_eq!(e.to_string(), "user 5: no row");
    }

    #[test]
    fn result_ext_categorize() {
        let r: Result<(), Error> = Err(Category::NotFound.new("no row"));
        let e = r.categorize(Category::InternalError, "lookup").unwrap_err();
        assert_eq!(e.category(), Category::InternalError);
    }

    #[test]
    fn result_ext_context() {
        let r: Result<(), Error> = Err(Category::BadRequest.new("invalid"));
        let e = r.err_context("email", "malformed").unwrap_err();
        assert_eq!(e.category(), Category::BadRequest);
        assert_eq!(e.context().unwrap().as_pair(), ("email", "malformed"));
        assert_eq!(e.to_string(), "invalid");
    }

    #[test]
    fn ok_passes_through() {
        let r: Result<u8, io::Error> = Ok(7);
        assert_eq!(r.wrap_err("never").unwrap(), 7);
    }
}
