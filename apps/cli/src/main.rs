//! # Trinket Shop Console Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (environment, then command line)
//! 3. Load the product catalog
//! 4. Run the menu over stdin/stdout until option 0 or end of input

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for testability
    trinket_cli::run()
}
