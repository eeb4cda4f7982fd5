use std::fmt;

/// A single field/message annotation attached to an [`Error`](crate::Error).
///
/// At most one context lives on an error; attaching another replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Context {
    pub field: String,
    pub message: String,
}

impl Context {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when both field and message are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.field.is_empty() && self.message.is_empty()
    }

    /// `(field, message)` pair.
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.field, &self.message)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
