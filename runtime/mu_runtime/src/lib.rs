//! Mu Runtime - processes, dynamic scoping and intrinsics.
//!
//! The integration point for interpreters and compilers: a `Runtime` owns
//! the catalog of global stores, and each `Process` owns its own stack of
//! local-variable frames.
//!
//! ```text
//! Runtime ── StoreCatalog ── ^NAME stores (shared, durable)
//!    │
//!    └── Process ── ScopeStack ── NAME stores (private, ephemeral)
//! ```

mod config;
mod errors;
pub mod intrinsics;
mod process;
mod scope;

use std::sync::Once;

pub use config::{RuntimeConfig, StorageKind};
pub use errors::{RuntimeError, RuntimeResult};
pub use process::{Process, Runtime};
pub use scope::ScopeStack;

pub use mu_key::{Subscript, SubscriptKey};
pub use mu_store::{CommitPolicy, DataState, VariableKind, VariableNode};
pub use mu_value::{Number, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once;
/// only the first call installs the subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
