use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::category::Category;
use crate::context::Context;
use crate::render::{Directive, RenderConfig, RichRender};
use crate::stack::Stack;

/// Any error (or string) accepted as a wrap target.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Categorized error with optional context and a captured stack.
///
/// An `Error` is immutable. Every wrap or context change produces a new
/// value; the cause chain underneath is shared through an `Arc`, so
/// cloning and re-annotating are cheap and safe across threads.
///
/// ```text
///  Error { category, context } ──► Cause { stack }
///                                     │
///                                     ├─ Message("db timeout")
///                                     ├─ Wrapped { "query failed", source ──► Error | foreign }
///                                     └─ Attached(source ──► foreign)
/// ```
///
/// # Formatting
///
/// | Format   | Output                                           |
/// |----------|--------------------------------------------------|
/// | `{}`     | flattened message                                |
/// | `{:#}`   | rich rendering under the default `RenderConfig`  |
/// | `{:?}`   | struct view (category, context, message, depth)  |
///
/// Use [`Error::render`] or [`rich`](crate::rich) to pass an explicit
/// [`RenderConfig`].
#[derive(Clone)]
pub struct Error {
    category: Category,
    context: Option<Context>,
    cause: Arc<Cause>,
}

struct Cause {
    node: Node,
    stack: Stack,
}

enum Node {
    /// Leaf created by `new`/`newf`.
    Message(String),
    /// `message: source`, produced by every wrap.
    Wrapped { message: String, source: Source },
    /// A foreign error adopted as-is by `add_context`.
    Attached(Source),
}

enum Source {
    Plain(BoxError),
    Rich(Box<dyn RichRender>),
}

impl Source {
    fn as_error(&self) -> &(dyn StdError + 'static) {
        match self {
            Source::Plain(e) => e.as_ref(),
            Source::Rich(r) => r.as_error(),
        }
    }

    fn as_rich(&self) -> Option<&dyn RichRender> {
        match self {
            Source::Plain(_) => None,
            Source::Rich(r) => Some(r.as_ref()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_error(), f)
    }
}

/// A boxed wrap target, split into our own `Error` or anything else.
enum Target {
    Ours(Error),
    Foreign(BoxError),
}

impl Target {
    fn classify(err: BoxError) -> Target {
        match err.downcast::<Error>() {
            Ok(ours) => Target::Ours(*ours),
            Err(other) => Target::Foreign(other),
        }
    }
}

// ── Constructors ──────────────────────────────────────────────────

impl Error {
    fn from_parts(category: Category, context: Option<Context>, node: Node, stack: Stack) -> Error {
        Error {
            category,
            context,
            cause: Arc::new(Cause { node, stack }),
        }
    }

    /// Leaf error carrying `message`.
    pub(crate) fn message(category: Category, message: String, stack: Stack) -> Error {
        Error::from_parts(category, None, Node::Message(message), stack)
    }

    /// Wrap `err` behind `message`.
    ///
    /// `category = Some(..)` stamps that category and drops any context;
    /// `None` inherits both from `err` when it is one of ours.
    pub(crate) fn wrapped(
        category: Option<Category>,
        err: BoxError,
        message: String,
        stack: Stack,
    ) -> Error {
        match Target::classify(err) {
            Target::Ours(inner) => {
                let (category, context) = match category {
                    Some(c) => (c, None),
                    None => (inner.category, inner.context.clone()),
                };
                let source = Source::Rich(Box::new(inner));
                Error::from_parts(category, context, Node::Wrapped { message, source }, stack)
            }
            Target::Foreign(other) => {
                let category = category.unwrap_or_default();
                let source = Source::Plain(other);
                Error::from_parts(category, None, Node::Wrapped { message, source }, stack)
            }
        }
    }

    /// Wrap a rich-renderable foreign error behind `message`.
    pub(crate) fn wrapped_rich<R: RichRender>(
        category: Category,
        err: R,
        message: String,
        stack: Stack,
    ) -> Error {
        let source = Source::Rich(Box::new(err));
        Error::from_parts(category, None, Node::Wrapped { message, source }, stack)
    }

    /// Adopt a foreign error unchanged, or re-annotate one of ours.
    pub(crate) fn attached(err: BoxError, context: Context) -> Error {
        match Target::classify(err) {
            Target::Ours(inner) => inner.with_context(context.field, context.message),
            Target::Foreign(other) => Error::from_parts(
                Category::Uncategorized,
                Some(context),
                Node::Attached(Source::Plain(other)),
                Stack::empty(),
            ),
        }
    }

    /// Adopt a foreign error under `category`, keeping it as the root cause.
    pub(crate) fn adopted(category: Category, err: BoxError, stack: Stack) -> Error {
        Error::from_parts(category, None, Node::Attached(Source::Plain(err)), stack)
    }

    /// Same error with `context` replacing any previous one.
    ///
    /// Category, cause chain and stack are shared with `self`.
    pub fn with_context(&self, field: impl Into<String>, message: impl Into<String>) -> Error {
        Error {
            category: self.category,
            context: Some(Context::new(field, message)),
            cause: Arc::clone(&self.cause),
        }
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Error {
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Attached context, unless none was set or it is empty.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref().filter(|c| !c.is_empty())
    }

    /// Stack captured where this layer was built. Empty for plain
    /// `new`/`newf` and for context-only annotations of foreign errors.
    #[inline]
    pub fn stack(&self) -> &Stack {
        &self.cause.stack
    }

    /// Status code for this error's category.
    #[inline]
    pub fn status(&self) -> u16 {
        self.category.status()
    }

    /// Innermost error of the chain that has no further source.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        crate::accessors::cause(self)
    }

    /// Number of layers between this error and its root cause.
    pub fn depth(&self) -> usize {
        let mut n = 0;
        let mut cur: &(dyn StdError + 'static) = self;
        while let Some(next) = cur.source() {
            n += 1;
            cur = next;
        }
        n
    }

    /// Render under an explicit directive and configuration.
    pub fn render(&self, directive: Directive, cfg: &RenderConfig) -> String {
        match directive {
            Directive::Str | Directive::Value => self.to_string(),
            Directive::Quoted => format!("{:?}", self.to_string()),
            Directive::Rich => crate::render::rich(self, cfg).to_string(),
        }
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause.node {
            Node::Message(_) => None,
            Node::Wrapped { source, .. } | Node::Attached(source) => Some(source.as_error()),
        }
    }
}

impl RichRender for Error {
    fn fmt_rich(&self, f: &mut fmt::Formatter<'_>, cfg: &RenderConfig) -> fmt::Result {
        write_message(&self.cause.node, f)?;
        self.cause.stack.fmt_frames(f, cfg)?;

        let nested = match &self.cause.node {
            Node::Message(_) => None,
            Node::Wrapped { source, .. } | Node::Attached(source) => source.as_rich(),
        };
        if let Some(inner) = nested {
            f.write_str("\n")?;
            inner.fmt_rich(f, cfg)?;
        }
        Ok(())
    }

    fn as_error(&self) -> &(dyn StdError + 'static) {
        self
    }
}

// ── Display / Debug ───────────────────────────────────────────────

fn write_message(node: &Node, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match node {
        Node::Message(m) => f.write_str(m),
        Node::Wrapped { message, source } => write!(f, "{}: {}", message, source),
        Node::Attached(source) => write!(f, "{}", source),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.fmt_rich(f, &RenderConfig::default())
        } else {
            write_message(&self.cause.node, f)
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Error");
        d.field("category", &self.category);
        if let Some(ctx) = self.context() {
            d.field("context", ctx);
        }
        d.field("message", &self.to_string());
        if !self.cause.stack.is_empty() {
            d.field("stack", &self.cause.stack);
        }
        d.finish()
    }
}

// ── Free constructors ─────────────────────────────────────────────

/// Uncategorized error with `message`. Captures no stack.
pub fn new(message: impl Into<String>) -> Error {
    Error::message(Category::Uncategorized, message.into(), Stack::empty())
}

/// Uncategorized error with a formatted message. Captures no stack.
///
/// ```
/// let e = stackerr::newf(format_args!("user {} missing", 7));
/// assert_eq!(e.to_string(), "user 7 missing");
/// ```
pub fn newf(args: fmt::Arguments<'_>) -> Error {
    Error::message(Category::Uncategorized, fmt::format(args), Stack::empty())
}

/// Wrap `err` behind `message`, capturing the caller's stack.
///
/// If `err` is already an [`Error`] its category and context carry over,
/// so an inner layer can fix the category once and outer layers only
/// add detail. Use [`wrap_with_category`] to override instead.
#[inline(never)]
pub fn wrap(err: impl Into<BoxError>, message: impl Into<String>) -> Error {
    Error::wrapped(None, err.into(), message.into(), Stack::capture(1))
}

/// [`wrap`] with a formatted message.
#[inline(never)]
pub fn wrapf(err: impl Into<BoxError>, args: fmt::Arguments<'_>) -> Error {
    Error::wrapped(None, err.into(), fmt::format(args), Stack::capture(1))
}

/// Wrap `err` behind `message` and stamp `category` over whatever it had.
///
/// Any context on `err` is dropped with its category.
#[inline(never)]
pub fn wrap_with_category(
    err: impl Into<BoxError>,
    category: Category,
    message: impl Into<String>,
) -> Error {
    Error::wrapped(Some(category), err.into(), message.into(), Stack::capture(1))
}

/// Wrap a foreign error that knows how to render itself richly.
///
/// The outer rich rendering recurses into `err` instead of printing only
/// its message.
#[inline(never)]
pub fn wrap_rich<R: RichRender>(err: R, category: Category, message: impl Into<String>) -> Error {
    Error::wrapped_rich(category, err, message.into(), Stack::capture(1))
}

/// Attach a field/message context, replacing any previous one.
///
/// Category and cause are preserved for our own errors. Anything else
/// becomes an `Uncategorized` error with `err` as its cause.
pub fn add_context(
    err: impl Into<BoxError>,
    field: impl Into<String>,
    message: impl Into<String>,
) -> Error {
    Error::attached(err.into(), Context::new(field, message))
}
