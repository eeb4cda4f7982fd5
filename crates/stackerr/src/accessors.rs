//! Free functions that inspect any error, ours or not.
//!
//! All of them take `&(dyn Error + 'static)` and check for an
//! [`Error`](crate::Error) by downcasting before looking at its fields;
//! foreign errors get the neutral answer.

use std::error::Error as StdError;

use crate::category::Category;
use crate::context::Context;
use crate::error::Error;

/// Innermost error in the `source()` chain.
///
/// Returns `err` itself when it has no source. Terminates because every
/// wrap adds exactly one layer around an existing value.
pub fn cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut cur = err;
    while let Some(next) = cur.source() {
        cur = next;
    }
    cur
}

/// Category of `err`, `Uncategorized` for foreign errors.
pub fn get_category(err: &(dyn StdError + 'static)) -> Category {
    match err.downcast_ref::<Error>() {
        Some(e) => e.category(),
        None => Category::Uncategorized,
    }
}

/// Attached context, if `err` is ours and carries a non-empty one.
pub fn get_context<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Context> {
    err.downcast_ref::<Error>().and_then(Error::context)
}

/// Status code for any error, via its category.
pub fn status_of(err: &(dyn StdError + 'static)) -> u16 {
    get_category(err).status()
}

/// Iterate `err` and every error below it.
pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&e| e.source())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{add_context, wrap};
    use std::io;

    #[test]
    fn cause_of_plain_is_itself() {
        let io_err = io::Error::new(io::ErrorKind::Other, "raw");
        assert_eq!(cause(&io_err).to_string(), "raw");
    }

    #[test]
    fn cause_through_three_wraps() {
        let base = io::Error::new(io::ErrorKind::TimedOut, "db timeout");
        let e = wrap(wrap(wrap(base, "a"), "b"), "c");
        let root = cause(&e);
        assert!(root.is::<io::Error>());
        assert_eq!(root.to_string(), "db timeout");
        assert_eq!(e.root_cause().to_string(), "db timeout");
    }

    #[test]
    fn foreign_defaults() {
        let io_err = io::Error::new(io::ErrorKind::Other, "x");
        assert_eq!(get_category(&io_err), Category::Uncategorized);
        assert!(get_context(&io_err).is_none());
        assert_eq!(status_of(&io_err), 500);
    }

    #[test]
    fn boxed_dyn_errors_work() {
        let boxed: Box<dyn StdError + Send + Sync> =
            Box::new(add_context(Category::NotFound.new("gone"), "id", "7"));
        assert_eq!(get_category(boxed.as_ref()), Category::NotFound);
        assert_eq!(get_context(boxed.as_ref()).unwrap().field, "id");
        assert_eq!(status_of(boxed.as_ref()), 404);
    }

    #[test]
    fn chain_walks_every_layer() {
        let e = wrap(wrap("base", "a"), "b");
        let msgs: Vec<String> = chain(&e).map(|e| e.to_string()).collect();
        assert_eq!(msgs, vec!["b: a: base", "a: base", "base"]);
    }

    fn field_of<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a str> {
        get_context(err).map(|c| c.field.as_str())
    }

    #[test]
    fn borrowed_context_and_chain_outlive_the_call() {
        let e = wrap(add_context(crate::Category::NotFound.new("no row"), "id", "7"), "load");
        let field = field_of(&e);
        let layers: Vec<&(dyn StdError + 'static)> = chain(&e).collect();
        assert_eq!(field, Some("id"));
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[1].to_string(), "no row");
    }
}
