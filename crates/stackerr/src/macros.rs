/// Build an error of a category with a formatted message. No stack.
///
/// ```
/// use stackerr::{newf, Category};
/// let e = newf!(Category::BadRequest, "page {} out of range", 9);
/// assert_eq!(e.to_string(), "page 9 out of range");
/// ```
#[macro_export]
macro_rules! newf {
    ($category:expr, $($arg:tt)+) => {
        $crate::Category::newf($category, format_args!($($arg)+))
    };
}

/// Free wrap with a formatted message. Category and context carry over.
///
/// ```
/// use stackerr::{wrapf, Category};
/// let inner = Category::NotFound.new("no row");
/// let e = wrapf!(inner, "loading user {}", 42);
/// assert_eq!(e.to_string(), "loading user 42: no row");
/// assert_eq!(e.category(), Category::NotFound);
/// ```
#[macro_export]
macro_rules! wrapf {
    ($err:expr, $($arg:tt)+) => {
        $crate::wrapf($err, format_args!($($arg)+))
    };
}

/// Return early with a new, stack-carrying error of a category.
///
/// ```ignore
/// bail!(Category::NotFound, "order {} not found", id);
/// ```
#[macro_export]
macro_rules! bail {
    ($category:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err(
            $crate::Category::newf_traced($category, format_args!($($arg)+)).into()
        )
    };
}

/// Early-return if a condition is false.
///
/// ```ignore
/// ensure!(qty > 0, Category::BadRequest, "quantity must be positive, got {}", qty);
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $category:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::bail!($category, $($arg)+);
        }
    };
}
