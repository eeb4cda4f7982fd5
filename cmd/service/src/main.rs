//! Layered service example
//!
//! Walks a few order lookups through store → repository → service →
//! handler and shows what each layer contributes to the final error.
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - log filter (default `stackerr=debug,service=info`)
//! - `STACKERR_MODE=prod` - trim source paths in stack output
//! - `STACKERR_PROJECT=stackerr` - project marker used when trimming
//! - `ORDER_ID=<n>` - look up a single order instead of the demo set
//! - `STORE_TIMEOUT_MS=<n>` - timeout reported by the slow order (default 250)

use std::collections::BTreeMap;

use stackerr::env::{env_get, env_get_opt, env_get_str};
use stackerr::{
    add_context, cause, ensure, wrapf, Category, Directive, RenderConfig, Report, ResultExt,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ── Store layer: its own error type ──────────────────────────────

#[derive(Debug, thiserror::Error)]
enum StoreError {
    #[error("record not found")]
    RecordNotFound,

    #[error("order already exists")]
    Duplicate,

    #[error("query timed out after {0} ms")]
    Timeout(u64),
}

#[derive(Debug, Clone)]
struct Order {
    id: u32,
    item: &'static str,
    qty: i32,
}

struct Store {
    rows: BTreeMap<u32, Order>,
    timeout_ms: u64,
}

impl Store {
    fn seeded(timeout_ms: u64) -> Self {
        let mut rows = BTreeMap::new();
        rows.insert(1, Order { id: 1, item: "keyboard", qty: 2 });
        rows.insert(2, Order { id: 2, item: "monitor", qty: 0 });
        rows.insert(3, Order { id: 3, item: "cable", qty: 5 });
        Self { rows, timeout_ms }
    }

    fn fetch(&self, id: u32) -> Result<Order, StoreError> {
        match id {
            13 => Err(StoreError::Timeout(self.timeout_ms)),
            99 => Err(StoreError::Duplicate),
            _ => self.rows.get(&id).cloned().ok_or(StoreError::RecordNotFound),
        }
    }
}

// ── Repository: fixes the category once ──────────────────────────

fn load_order(store: &Store, id: u32) -> stackerr::Result<Order> {
    store.fetch(id).map_err(|e| match e {
        StoreError::RecordNotFound => Category::NotFound.wrap(e, format!("order {}", id)),
        StoreError::Duplicate => Category::BadRequest.wrap(e, format!("order {}", id)),
        StoreError::Timeout(_) => Category::InternalError.wrap(e, format!("order {}", id)),
    })
}

// ── Service: adds detail without touching the category ───────────

fn checkout(store: &Store, id: u32) -> stackerr::Result<u32> {
    ensure!(id > 0, Category::BadRequest, "order id must be positive, got {}", id);

    let order = load_order(store, id).map_err(|e| wrapf!(e, "checkout order {}", id))?;

    if order.qty <= 0 {
        let err = Category::BadRequest.new(format!("order {} has no items", order.id));
        return Err(add_context(err, "qty", "must be at least 1"));
    }

    debug!(id = order.id, item = order.item, qty = order.qty, "order loaded");
    Ok(order.qty as u32)
}

// ── Handler: the boundary ────────────────────────────────────────

fn handle(store: &Store, id: u32, cfg: &RenderConfig) {
    println!("--- order {} ---", id);

    let result = checkout(store, id).wrap_err("POST /checkout");
    match result {
        Ok(qty) => {
            info!(id, qty, "checkout ok");
            println!("200 OK ({} items)", qty);
        }
        Err(err) => {
            let report = Report::log(&err, cfg);
            println!("{} {}", report.status, report.message);
            if let Some(ctx) = &report.context {
                println!("  context: {}", ctx);
            }
            println!("  root cause: {}", cause(&err));
            println!("  quoted: {}", err.render(Directive::Quoted, cfg));
            println!("{}", err.render(Directive::Rich, cfg));
        }
    }
    println!();
}

// RUST_LOG=debug STACKERR_MODE=prod STACKERR_PROJECT=stackerr cargo run -p stackerr-service
fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_get_str("SERVICE_LOG", "stackerr=debug,service=info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== stackerr service example ===\n");

    let cfg = RenderConfig::from_env();
    let store = Store::seeded(env_get("STORE_TIMEOUT_MS", 250));

    let ids: Vec<u32> = match env_get_opt::<u32>("ORDER_ID") {
        Some(id) => vec![id],
        None => vec![1, 2, 7, 13, 99, 0],
    };

    for id in ids {
        handle(&store, id, &cfg);
    }

    println!("=== Example Complete ===");
}
