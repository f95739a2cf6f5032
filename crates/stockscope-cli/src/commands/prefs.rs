use serde_json::json;
use stockscope_core::preferences::{CHART_PERIOD_KEY, LANGUAGE_KEY, THEME_KEY};
use stockscope_core::{ChartPeriod, FilePreferenceStore, Language, Preferences, Theme};

use crate::cli::PrefsCommand;
use crate::error::CliError;

use super::CommandOutput;

pub fn run(
    command: &PrefsCommand,
    preferences: &Preferences<FilePreferenceStore>,
) -> Result<CommandOutput, CliError> {
    match command {
        PrefsCommand::Get => {}
        PrefsCommand::Set { key, value } => match key.as_str() {
            LANGUAGE_KEY => preferences.set_language(value.parse::<Language>()?)?,
            THEME_KEY => preferences.set_theme(value.parse::<Theme>()?)?,
            CHART_PERIOD_KEY => preferences.set_chart_period(value.parse::<ChartPeriod>()?)?,
            other => return Err(CliError::UnknownPreference(other.to_owned())),
        },
        PrefsCommand::ToggleLanguage => {
            preferences.toggle_language()?;
        }
        PrefsCommand::ToggleTheme => {
            preferences.toggle_theme()?;
        }
    }

    Ok(snapshot(preferences))
}

fn snapshot(preferences: &Preferences<FilePreferenceStore>) -> CommandOutput {
    let (language, theme, period) = (
        preferences.language(),
        preferences.theme(),
        preferences.chart_period(),
    );
    let text = format!(
        "{LANGUAGE_KEY:<12}{language}\n{THEME_KEY:<12}{theme}\n{CHART_PERIOD_KEY:<12}{period}"
    );
    CommandOutput::ok(
        json!({
            LANGUAGE_KEY: language,
            THEME_KEY: theme,
            CHART_PERIOD_KEY: period,
            "path": preferences.store().path().display().to_string(),
        }),
        text,
    )
}
