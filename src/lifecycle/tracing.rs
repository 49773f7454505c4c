//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! ## Configuration
//!
//! - **Level filter** from `RUST_LOG`, defaulting to `info`
//! - **Compact** single-line output by default, or **JSON** objects when the config asks for it
//! - `with_target(false)`: module paths are hidden because events carry `entity_type` instead
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown with the final table size
//! - **Store operations**: Create, Get, List, Update, Delete and Actions, with the product id
//! - **Rejections**: `warn` with the error for not-found, conflicts and insufficient stock
//! - **Internal faults**: `error` with full detail (callers only get a generic message)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Default
//! RUST_LOG=info cargo run
//!
//! # Full payloads
//! RUST_LOG=debug cargo run
//!
//! # Machine-readable
//! INVENTORY_LOG_FORMAT=json cargo run
//! ```
//!
//! With `RUST_LOG=info` a failed decrease followed by a successful one looks like:
//!
//! ```text
//! WARN Action failed entity_type="Product" id=1 error=Entity error: Insufficient stock quantity: requested 15, available 10
//! INFO Action ok entity_type="Product" id=1
//! ```

use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

/// Initializes tracing for the process.
///
/// Safe to call more than once: later calls leave the first subscriber in place.
pub fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false); // entity_type identifies the actor

    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
