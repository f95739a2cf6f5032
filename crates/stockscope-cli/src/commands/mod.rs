mod history;
mod prefs;
mod quote;
mod search;

use std::sync::Arc;

use serde_json::{json, Value};
use stockscope_core::{
    AlphaVantageGateway, FilePreferenceStore, GatewayError, MarketDataSource, Preferences,
    TradingDate,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Renderer;

/// Result of one command, in both output formats.
///
/// A gateway failure is part of the output rather than an `Err`, so it is
/// rendered in the user's language and still sets the exit code.
pub struct CommandOutput {
    pub json: Value,
    pub text: String,
    pub failure: Option<GatewayError>,
}

impl CommandOutput {
    pub fn ok(json: Value, text: String) -> Self {
        Self {
            json,
            text,
            failure: None,
        }
    }

    pub fn failed(error: GatewayError, renderer: &Renderer) -> Self {
        let message = renderer.error(&error);
        Self {
            json: error_json(&error, &message),
            text: message,
            failure: Some(error),
        }
    }
}

pub(crate) fn error_json(error: &GatewayError, message: &str) -> Value {
    json!({ "error": message, "code": error.code() })
}

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub gateway: Arc<dyn MarketDataSource>,
    pub preferences: Preferences<FilePreferenceStore>,
    pub api_key: String,
    pub today: TradingDate,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let gateway = AlphaVantageGateway::default()
            .with_base_url(cli.upstream_base_url.as_str())
            .with_timeout(cli.upstream_timeout_ms.map(std::time::Duration::from_millis));

        let mut preferences = Preferences::new(FilePreferenceStore::open(cli.prefs_path())?);
        if let Some(locale) = locale_hint() {
            preferences = preferences.with_locale_hint(locale);
        }

        Ok(Self {
            gateway: Arc::new(gateway),
            preferences,
            api_key: cli.api_key.clone().unwrap_or_default(),
            today: TradingDate::today_utc(),
        })
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.preferences.language())
    }
}

fn locale_hint() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let context = Context::from_cli(cli)?;

    match &cli.command {
        Command::Quote(args) => quote::run(args, &context).await,
        Command::History(args) => history::run(args, &context).await,
        Command::Search(args) => search::run(args, &context).await,
        Command::Prefs(args) => prefs::run(&args.command, &context.preferences),
    }
}
