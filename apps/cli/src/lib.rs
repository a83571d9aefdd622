//! # Trinket Shop Console
//!
//! Menu-driven ordering over stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! trinket_cli/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── config.rs       ◄─── Environment + command-line settings
//! ├── menu.rs         ◄─── Menu options and rendering
//! ├── session.rs      ◄─── Menu loop, open order, order queue
//! └── reports.rs      ◄─── Product lines, receipts, first-N reports
//! ```

pub mod config;
pub mod menu;
pub mod reports;
pub mod session;

use std::env;
use std::io;

use anyhow::Context;
use chrono::Local;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trinket_catalog::{load_catalog, Catalog};

use config::{CliConfig, Invocation, USAGE};
use session::Session;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn,trinket=info";

/// Runs the console application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ─────► stderr, RUST_LOG or DEFAULT_LOG_FILTER    │
/// │  2. Load Configuration ─────► TRINKET_* variables, then arguments       │
/// │  3. Load Catalog ───────────► unreadable file = empty catalog + warning │
/// │  4. Run Session ────────────► stdin/stdout until option 0 or EOF        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let mut config = CliConfig::load().context("Invalid configuration")?;
    if config.apply_args(env::args().skip(1))? == Invocation::Help {
        print!("{}", USAGE);
        return Ok(());
    }

    info!(catalog = %config.catalog_path.display(), "Starting Trinket Shop console");

    let catalog = match load_catalog(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(error = %err, "Starting with an empty catalog");
            Catalog::default()
        }
    };

    let today = Local::now().date_naive();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), config, catalog, today);
    session.run().context("Console I/O failed")?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (parsed catalog lines, menu choices)
/// - `RUST_LOG=trinket=trace` - Trace for trinket crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
