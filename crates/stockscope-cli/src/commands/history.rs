use serde_json::json;
use stockscope_core::ChartState;

use crate::cli::PeriodArgs;
use crate::error::CliError;
use crate::output::ChartSummary;

use super::{CommandOutput, Context};

pub async fn run(args: &PeriodArgs, context: &Context) -> Result<CommandOutput, CliError> {
    let renderer = context.renderer();
    let period = match args.period {
        Some(period) => {
            context.preferences.set_chart_period(period)?;
            period
        }
        None => context.preferences.chart_period(),
    };

    let history = match context.gateway.history(&args.symbol, &context.api_key).await {
        Ok(history) => history,
        Err(error) => return Ok(CommandOutput::failed(error, &renderer)),
    };

    let windowed = period.window(&history.bars, context.today);
    let state = if history.bars.is_empty() {
        ChartState::NoDataFetched
    } else if windowed.is_empty() {
        ChartState::NoDataInWindow
    } else {
        ChartState::Points(windowed.clone())
    };

    let json = json!({
        "symbol": history.symbol,
        "lastRefreshed": history.last_refreshed,
        "period": period,
        "data": windowed,
        "summary": ChartSummary::from_bars(&windowed),
    });
    let text = renderer.chart(&history.symbol, period, &state);
    Ok(CommandOutput::ok(json, text))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use stockscope_core::{ChartPeriod, ScriptedHttpClient};
    use tempfile::tempdir;

    use super::*;
    use crate::commands::test_support::{context, series_body};

    #[tokio::test]
    async fn explicit_period_is_used_and_saved() {
        let dir = tempdir().expect("temp dir");
        let context = context(&dir, Arc::new(ScriptedHttpClient::always_json(series_body())));
        let args = PeriodArgs {
            symbol: String::from("IBM"),
            period: Some(ChartPeriod::OneWeek),
        };

        let output = run(&args, &context).await.expect("command runs");

        assert!(output.failure.is_none());
        assert_eq!(output.json["period"], "1W");
        assert_eq!(output.json["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(output.json["summary"]["points"], 1);
        assert_eq!(context.preferences.chart_period(), ChartPeriod::OneWeek);
    }

    #[tokio::test]
    async fn saved_period_applies_when_none_is_given() {
        let dir = tempdir().expect("temp dir");
        let context = context(&dir, Arc::new(ScriptedHttpClient::always_json(series_body())));
        context
            .preferences
            .set_chart_period(ChartPeriod::ThreeMonths)
            .expect("save");
        let args = PeriodArgs {
            symbol: String::from("IBM"),
            period: None,
        };

        let output = run(&args, &context).await.expect("command runs");

        assert_eq!(output.json["period"], "3M");
        let dates = output.json["data"]
            .as_array()
            .expect("data array")
            .iter()
            .map(|bar| bar["date"].as_str().unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2024-04-01", "2024-06-03", "2024-06-14"]);
    }
}
