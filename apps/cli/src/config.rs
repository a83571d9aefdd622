//! # Console Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line arguments (`--catalog`)
//! 2. Environment variables (`TRINKET_*`)
//! 3. Defaults (this file)

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Command-line help text.
pub const USAGE: &str = "\
Trinket Shop - console ordering

Usage: trinket [OPTIONS]

Options:
  -c, --catalog <PATH>    Product catalog file (default: products.txt)
  -h, --help              Show this help message

Environment:
  TRINKET_CATALOG             Product catalog file
  TRINKET_STORE_NAME          Name shown in the menu header
  TRINKET_CURRENCY_SYMBOL     Currency symbol (default: $)
  TRINKET_CURRENCY_DECIMALS   Decimal places shown, 0 to 4 (default: 2)
  TRINKET_CLEAR_SCREEN        Clear the terminal before the menu (default: true)
  TRINKET_PAUSE               Wait for Enter after each command (default: true)
  RUST_LOG                    Log filter (default: warn,trinket=info)
";

/// Console application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Product catalog file.
    pub catalog_path: PathBuf,

    /// Store name (menu header)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Clear the terminal before drawing the menu
    pub clear_screen: bool,

    /// Wait for Enter after each command
    pub pause: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Start the menu.
    Run,
    /// Print [`USAGE`] and exit.
    Help,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_path: PathBuf::from("products.txt"),
            store_name: "TRINKET SHOP".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            clear_screen: true,
            pause: true,
        }
    }
}

impl CliConfig {
    /// Highest accepted `TRINKET_CURRENCY_DECIMALS`.
    pub const MAX_CURRENCY_DECIMALS: u8 = 4;

    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig::default();

        if let Some(path) = lookup("TRINKET_CATALOG") {
            config.catalog_path = PathBuf::from(path);
        }

        if let Some(name) = lookup("TRINKET_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(symbol) = lookup("TRINKET_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("TRINKET_CURRENCY_DECIMALS") {
            config.currency_decimals = decimals
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|d| *d <= Self::MAX_CURRENCY_DECIMALS)
                .ok_or_else(|| ConfigError::InvalidValue("TRINKET_CURRENCY_DECIMALS".to_string()))?;
        }

        if let Some(flag) = lookup("TRINKET_CLEAR_SCREEN") {
            config.clear_screen = parse_flag("TRINKET_CLEAR_SCREEN", &flag)?;
        }

        if let Some(flag) = lookup("TRINKET_PAUSE") {
            config.pause = parse_flag("TRINKET_PAUSE", &flag)?;
        }

        Ok(config)
    }

    /// Applies command-line arguments (program name excluded).
    pub fn apply_args<I, S>(&mut self, args: I) -> Result<Invocation, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingArgument(arg.clone()))?;
                    self.catalog_path = PathBuf::from(path);
                }
                "--help" | "-h" => return Ok(Invocation::Help),
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        Ok(Invocation::Run)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// Amounts are always held in cents; the configured decimals only
    /// change how many digits are shown (rounded half away from zero when
    /// fewer than two).
    ///
    /// ## Example
    /// ```rust
    /// use trinket_cli::config::CliConfig;
    ///
    /// let config = CliConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// assert_eq!(config.format_currency(-5), "-$0.05");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let decimals = u32::from(self.currency_decimals);
        let magnitude = cents.unsigned_abs();

        // Rescale from hundredths to the displayed precision
        let scaled = if decimals >= 2 {
            magnitude * 10_u64.pow(decimals - 2)
        } else {
            let divisor = 10_u64.pow(2 - decimals);
            (magnitude + divisor / 2) / divisor
        };

        let divisor = 10_u64.pow(decimals);
        let whole = scaled / divisor;
        let frac = scaled % divisor;

        format!(
            "{}{}{}",
            if cents < 0 && scaled > 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing value after {0}")]
    MissingArgument(String),

    #[error("Unknown argument: {0} (try --help)")]
    UnknownArgument(String),
}
