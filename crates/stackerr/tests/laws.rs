//! Property-based tests for the classification and wrapping laws.

use proptest::prelude::*;
use stackerr::{
    add_context, cause, get_category, get_context, status_for, wrap, wrap_with_category, Category,
    Context, Directive, Error, RenderConfig,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Uncategorized),
        Just(Category::BadRequest),
        Just(Category::NotFound),
        Just(Category::InternalError),
    ]
}

fn arb_message() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ .-]{1,24}"
}

fn arb_context() -> impl Strategy<Value = Context> {
    ("[a-z_]{1,12}", "[a-zA-Z0-9 ]{1,24}").prop_map(|(f, m)| Context::new(f, m))
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Base(String);

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn new_stamps_category(c in arb_category(), m in arb_message()) {
        let e = c.new(m.clone());
        prop_assert_eq!(get_category(&e), c);
        prop_assert_eq!(e.to_string(), m);
    }

    #[test]
    fn category_wrap_overrides(from in arb_category(), to in arb_category(), m in arb_message()) {
        let e = to.wrap(from.new(m), "x");
        prop_assert_eq!(get_category(&e), to);
        let e = wrap_with_category(from.new("y"), to, "x");
        prop_assert_eq!(get_category(&e), to);
    }

    #[test]
    fn free_wrap_preserves(c in arb_category(), ctx in arb_context(), m in arb_message()) {
        let inner = add_context(c.new(m), ctx.field.clone(), ctx.message.clone());
        let outer = wrap(inner, "x");
        prop_assert_eq!(get_category(&outer), c);
        prop_assert_eq!(get_context(&outer), Some(&ctx));
    }

    #[test]
    fn cause_finds_base(base in arb_message(), layers in prop::collection::vec(arb_message(), 1..8)) {
        let mut e: Error = wrap(Base(base.clone()), layers[0].clone());
        for l in &layers[1..] {
            e = wrap(e, l.clone());
        }
        let root = cause(&e);
        prop_assert!(root.is::<Base>());
        prop_assert_eq!(root.to_string(), base);
        prop_assert_eq!(e.depth(), layers.len());
    }

    #[test]
    fn display_is_stack_free(c in arb_category(), m in arb_message(), n in 0usize..4) {
        let mut e = c.wrap(Base(m), "start");
        for i in 0..n {
            e = wrap(e, format!("layer {}", i));
        }
        let plain = e.to_string();
        prop_assert!(!plain.contains('\n'));
        let rich = e.render(Directive::Rich, &RenderConfig::default());
        prop_assert!(rich.starts_with(&plain));
    }

    #[test]
    fn latest_context_wins(a in arb_context(), b in arb_context()) {
        let e = add_context(Base("x".into()), a.field, a.message);
        let e = add_context(e, b.field.clone(), b.message.clone());
        prop_assert_eq!(get_category(&e), Category::Uncategorized);
        prop_assert_eq!(get_context(&e), Some(&b));
    }

    #[test]
    fn status_matches_category(c in arb_category(), m in arb_message()) {
        let e = c.new(m);
        prop_assert_eq!(e.status(), status_for(c));
    }
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn status_table() {
    assert_eq!(status_for(Category::BadRequest), 400);
    assert_eq!(status_for(Category::NotFound), 404);
    assert_eq!(status_for(Category::Uncategorized), 500);
    assert_eq!(status_for(Category::InternalError), 500);
}

#[test]
fn bad_request_with_context() {
    let err = Category::BadRequest.new("missing id");
    let err = add_context(err, "id", "required");
    assert_eq!(get_category(&err), Category::BadRequest);
    assert_eq!(get_context(&err), Some(&Context::new("id", "required")));
    assert_eq!(err.to_string(), "missing id");
}

#[test]
fn plain_error_wrapped_twice() {
    let err = std::io::Error::new(std::io::ErrorKind::Other, "db timeout");
    let err = wrap(err, "query failed");
    let err = wrap(err, "service failed");
    assert_eq!(cause(&err).to_string(), "db timeout");
    assert_eq!(get_category(&err), Category::Uncategorized);
}

#[inline(never)]
fn load_order_for_rich_test() -> Error {
    let err = Category::NotFound.new_traced("order 7 not found");
    std::hint::black_box(&err);
    err
}

#[test]
fn rich_has_resolved_frame() {
    let err = wrap(load_order_for_rich_test(), "checkout");
    let out = err.render(Directive::Rich, &RenderConfig::default());
    assert!(out.starts_with("checkout: order 7 not found"));

    let first = err.stack().frames()[0];
    assert!(first.is_resolved(), "no symbols for {:?}", first);
    assert!(out.lines().any(|l| !l.trim().is_empty() && !l.contains("unknown")));
    assert!(out.contains("load_order_for_rich_test"), "{}", out);
}
