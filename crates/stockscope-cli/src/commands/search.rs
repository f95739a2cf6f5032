use std::time::Duration;

use serde_json::{json, Value};
use stockscope_core::{ChartState, SearchOrchestrator, SearchView};

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::{ChartSummary, Renderer};

use super::{error_json, CommandOutput, Context};

pub async fn run(args: &SearchArgs, context: &Context) -> Result<CommandOutput, CliError> {
    let renderer = context.renderer();
    let period = match args.target.period {
        Some(period) => {
            context.preferences.set_chart_period(period)?;
            period
        }
        None => context.preferences.chart_period(),
    };

    let orchestrator = SearchOrchestrator::new(context.gateway.clone())
        .with_history_delay(Duration::from_secs(args.delay_secs));

    let follower = args.follow.then(|| {
        let mut display = orchestrator.subscribe();
        tokio::spawn(async move {
            while display.changed().await.is_ok() {
                let (symbol, phase) = {
                    let view = display.borrow_and_update();
                    (view.symbol.clone(), view.phase)
                };
                eprintln!("[{symbol}] {phase:?}");
            }
        })
    });

    let view = orchestrator.search(&args.target.symbol, &context.api_key).await;
    if let Some(follower) = follower {
        follower.abort();
    }

    let state = view.chart(period, context.today);
    let json = search_json(&view, period, &state, &renderer);
    let text = renderer.search(&view, period, &state);
    let failure = view.quote_error.clone().or_else(|| view.history_error.clone());

    Ok(CommandOutput {
        json,
        text,
        failure,
    })
}

fn search_json(
    view: &SearchView,
    period: stockscope_core::ChartPeriod,
    state: &ChartState,
    renderer: &Renderer,
) -> Value {
    let error = |error: &stockscope_core::GatewayError| error_json(error, &renderer.error(error));
    let chart = match state {
        ChartState::Points(bars) => json!({
            "period": period,
            "data": bars,
            "summary": ChartSummary::from_bars(bars),
        }),
        ChartState::NoDataInWindow | ChartState::NoDataFetched => json!({
            "period": period,
            "data": [],
            "noDataFetched": matches!(state, ChartState::NoDataFetched),
        }),
        _ => Value::Null,
    };

    json!({
        "symbol": view.symbol,
        "phase": view.phase,
        "quote": view.quote,
        "quoteError": view.quote_error.as_ref().map(error),
        "chart": chart,
        "historyError": view.history_error.as_ref().map(error),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use stockscope_core::{ChartPeriod, GatewayErrorKind, ScriptedHttpClient};
    use tempfile::tempdir;

    use super::*;
    use crate::cli::PeriodArgs;
    use crate::commands::test_support::{context, series_body};

    const QUOTE_BODY: &str = r#"{"Global Quote": {
        "01. symbol": "IBM", "03. high": "2", "04. low": "1", "05. price": "1.5",
        "06. volume": "10", "07. latest trading day": "2024-06-14",
        "09. change": "0.1", "10. change percent": "7.1%"
    }}"#;

    fn args(period: ChartPeriod) -> SearchArgs {
        SearchArgs {
            target: PeriodArgs {
                symbol: String::from("IBM"),
                period: Some(period),
            },
            follow: false,
            delay_secs: 1,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn quote_and_windowed_chart_are_returned_together() {
        let dir = tempdir().expect("temp dir");
        let client = Arc::new(
            ScriptedHttpClient::always_json(series_body()).then_json(QUOTE_BODY),
        );
        let context = context(&dir, client.clone());

        let output = run(&args(ChartPeriod::OneMonth), &context)
            .await
            .expect("command runs");

        assert!(output.failure.is_none());
        assert_eq!(output.json["phase"], "history_ready");
        assert_eq!(output.json["quote"]["symbol"], "IBM");
        assert_eq!(output.json["chart"]["summary"]["points"], 2);
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn history_failure_keeps_the_quote() {
        let dir = tempdir().expect("temp dir");
        let client = Arc::new(
            ScriptedHttpClient::always_json(r#"{"Information": "1 request per second"}"#)
                .then_json(QUOTE_BODY),
        );
        let context = context(&dir, client);

        let output = run(&args(ChartPeriod::OneMonth), &context)
            .await
            .expect("command runs");

        assert_eq!(
            output.failure.as_ref().map(|error| error.kind()),
            Some(GatewayErrorKind::RateLimited)
        );
        assert_eq!(output.json["phase"], "history_failed");
        assert_eq!(output.json["quote"]["symbol"], "IBM");
        assert!(output.text.contains("IBM"));
        assert!(output.text.contains("1 request per second"));
    }
}
