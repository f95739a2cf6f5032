//! CLI argument definitions for stockscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Fetch the current quote for a symbol |
//! | `history` | Fetch daily bars and window them by chart period |
//! | `search` | Quote, then history after the rate-limit delay |
//! | `prefs` | Read or change saved preferences |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-key` | `$STOCKSCOPE_API_KEY` | Alpha Vantage key, never saved |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--prefs` | `~/.stockscope/prefs.json` | Preference file |
//!
//! # Examples
//!
//! ```bash
//! stockscope quote AAPL
//! stockscope history IBM --period 3M --format json --pretty
//! stockscope search MSFT --follow
//! stockscope prefs toggle-language
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stockscope_core::{ChartPeriod, LogFormat, LoggingConfig, DEFAULT_BASE_URL};

#[derive(Debug, Parser)]
#[command(
    name = "stockscope",
    author,
    version,
    about = "Stock quotes and daily price history from Alpha Vantage"
)]
pub struct Cli {
    /// Alpha Vantage API key. Only forwarded upstream; never written to disk.
    #[arg(long, global = true, env = "STOCKSCOPE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Preference file (language, theme, chart period).
    #[arg(long, global = true, env = "STOCKSCOPE_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Base URL of the Alpha Vantage API.
    #[arg(long, global = true, env = "STOCKSCOPE_UPSTREAM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_base_url: String,

    /// Upstream request timeout in milliseconds. Unset waits indefinitely.
    #[arg(long, global = true, env = "STOCKSCOPE_UPSTREAM_TIMEOUT_MS")]
    pub upstream_timeout_ms: Option<u64>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, env = "STOCKSCOPE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format (pretty or json). Logs go to stderr.
    #[arg(long, global = true, env = "STOCKSCOPE_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }

    /// Explicit `--prefs`, else `$HOME/.stockscope/prefs.json`, else a file in the working directory.
    pub fn prefs_path(&self) -> PathBuf {
        if let Some(path) = &self.prefs {
            return path.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".stockscope").join("prefs.json"),
            None => PathBuf::from(".stockscope-prefs.json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Translated, human-readable tables.
    Table,
    /// Canonical JSON records.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the current quote for a symbol.
    ///
    ///   stockscope quote AAPL
    Quote(SymbolArgs),

    /// Fetch the compact daily series and show the bars inside a chart period.
    ///
    /// Choosing a period saves it as the default for later runs.
    ///
    ///   stockscope history IBM --period 6M
    History(PeriodArgs),

    /// Fetch the quote, wait for the rate-limit delay, then fetch history.
    ///
    /// A history failure still shows the quote.
    ///
    ///   stockscope search MSFT --period 1W --follow
    Search(SearchArgs),

    /// Read or change saved preferences.
    Prefs(PrefsArgs),
}

#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Ticker symbol, e.g. AAPL. Case does not matter.
    pub symbol: String,
}

#[derive(Debug, Args)]
pub struct PeriodArgs {
    /// Ticker symbol, e.g. AAPL.
    pub symbol: String,

    /// Chart period (1W, 1M, 3M, 6M, 1Y). Defaults to the saved period.
    #[arg(long)]
    pub period: Option<ChartPeriod>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub target: PeriodArgs,

    /// Print each search phase to stderr as it happens.
    #[arg(long, default_value_t = false)]
    pub follow: bool,

    /// Seconds to wait between the quote and history calls (minimum 1).
    #[arg(long, default_value_t = 1)]
    pub delay_secs: u64,
}

#[derive(Debug, Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Show the effective language, theme, and chart period.
    Get,
    /// Save one preference: `language`, `theme`, or `chartPeriod`.
    Set { key: String, value: String },
    /// Switch between Japanese and English.
    ToggleLanguage,
    /// Switch between light and dark.
    ToggleTheme,
}
