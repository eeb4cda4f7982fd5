//! Boundary helpers for the layer that answers a request.
//!
//! ```text
//!   handler ──► Err(e) ──► Report::log(&e, &cfg) ──► tracing event (rich)
//!                                │
//!                                └─► Report { status, message, context } ──► response
//! ```

use std::error::Error as StdError;

use crate::accessors::{get_category, get_context};
use crate::category::Category;
use crate::context::Context;
use crate::error::Error;
use crate::render::{Directive, RenderConfig};

/// What a response layer needs from an error: status, client message
/// and the optional field annotation. Never contains stack text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub status: u16,
    pub category: Category,
    pub message: String,
    pub context: Option<Context>,
}

impl Report {
    /// Summarize any error. Foreign errors report as `Uncategorized`.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Report {
        let category = get_category(err);
        Report {
            status: category.status(),
            category,
            message: err.to_string(),
            context: get_context(err).cloned(),
        }
    }

    /// Summarize `err` and emit one structured log event for it.
    ///
    /// Server-side categories log at `error`, client-side at `warn`. The
    /// event's `detail` field carries the rich rendering under `cfg`.
    pub fn log(err: &(dyn StdError + 'static), cfg: &RenderConfig) -> Report {
        let report = Report::from_error(err);
        let detail = match err.downcast_ref::<Error>() {
            Some(e) => e.render(Directive::Rich, cfg),
            None => err.to_string(),
        };
        let (field, note) = report
            .context
            .as_ref()
            .map_or(("", ""), |c| c.as_pair());

        if report.category.is_client() {
            tracing::warn!(
                status = report.status,
                category = %report.category,
                field,
                note,
                "{}",
                detail
            );
        } else {
            tracing::error!(
                status = report.status,
                category = %report.category,
                field,
                note,
                "{}",
                detail
            );
        }

        report
    }
}
