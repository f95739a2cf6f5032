//! Terminal and JSON rendering.

use std::fmt::Write as _;
use std::io::Write as _;

use serde::Serialize;
use stockscope_core::{
    Bar, BuiltinCatalog, ChartPeriod, ChartState, GatewayError, Language, MessageCatalog,
    QuoteRecord, SearchView,
};

use crate::error::CliError;

/// Writes `value` to stdout as JSON.
pub fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    write_text(&rendered)
}

pub fn write_text(text: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

/// Aggregates of a windowed bar set shown under the chart table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSummary {
    pub points: usize,
    pub first_date: String,
    pub last_date: String,
    pub latest_close: f64,
    pub high: f64,
    pub low: f64,
}

impl ChartSummary {
    /// `bars` must be oldest first. Returns `None` for an empty window.
    pub fn from_bars(bars: &[Bar]) -> Option<Self> {
        let first = bars.first()?;
        let last = bars.last()?;
        Some(Self {
            points: bars.len(),
            first_date: first.date.to_string(),
            last_date: last.date.to_string(),
            latest_close: last.close,
            high: bars.iter().map(|bar| bar.high).fold(f64::MIN, f64::max),
            low: bars.iter().map(|bar| bar.low).fold(f64::MAX, f64::min),
        })
    }
}

/// Human-readable rendering in one language.
pub struct Renderer<C = BuiltinCatalog> {
    language: Language,
    catalog: C,
}

impl Renderer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            catalog: BuiltinCatalog,
        }
    }
}

impl<C: MessageCatalog> Renderer<C> {
    fn t(&self, key: &str) -> String {
        self.catalog.text(self.language, key)
    }

    pub fn error(&self, error: &GatewayError) -> String {
        self.t(error.message_key())
    }

    pub fn quote(&self, quote: &QuoteRecord) -> String {
        let sign = if quote.change >= 0.0 { "+" } else { "" };
        let mut out = String::new();
        let _ = writeln!(out, "{}", quote.symbol);
        let _ = writeln!(out, "  {:<14}{:.2}", self.t("quotePrice"), quote.price);
        let _ = writeln!(
            out,
            "  {:<14}{sign}{:.2} ({sign}{:.2}%)",
            self.t("quoteChange"),
            quote.change,
            quote.change_percent
        );
        let _ = writeln!(out, "  {:<14}{:.2}", self.t("quoteHigh"), quote.high);
        let _ = writeln!(out, "  {:<14}{:.2}", self.t("quoteLow"), quote.low);
        let _ = writeln!(out, "  {:<14}{}", self.t("quoteVolume"), quote.volume);
        let _ = write!(out, "  {:<14}{}", self.t("quoteUpdated"), quote.timestamp);
        out
    }

    /// Chart heading plus either the bar table or the reason there is none.
    pub fn chart(&self, symbol: &str, period: ChartPeriod, state: &ChartState) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{symbol} - {} ({})",
            self.t("chartTitle"),
            self.t(period.label_key())
        );

        match state {
            ChartState::NotRequested => {}
            ChartState::Loading => out.push_str(&self.t("chartLoading")),
            ChartState::Failed(error) => out.push_str(&self.error(error)),
            ChartState::NoDataFetched => out.push_str(&self.t("chartNoData")),
            ChartState::NoDataInWindow => out.push_str(&self.t("chartNoDataInWindow")),
            ChartState::Points(bars) => out.push_str(&self.bars(bars)),
        }
        out.trim_end().to_owned()
    }

    pub fn bars(&self, bars: &[Bar]) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<12}{:>12}{:>12}{:>12}",
            self.t("chartDate"),
            self.t("chartClose"),
            self.t("chartHigh"),
            self.t("chartLow")
        );
        for bar in bars {
            let _ = writeln!(
                out,
                "{:<12}{:>12.2}{:>12.2}{:>12.2}",
                bar.date.to_string(),
                bar.close,
                bar.high,
                bar.low
            );
        }
        if let Some(summary) = ChartSummary::from_bars(bars) {
            let _ = write!(out, "{}: {}", self.t("chartDataPoints"), summary.points);
        }
        out
    }

    /// Full search result: quote (or its error) followed by the chart.
    pub fn search(&self, view: &SearchView, period: ChartPeriod, state: &ChartState) -> String {
        let mut out = match (&view.quote, &view.quote_error) {
            (Some(quote), _) => self.quote(quote),
            (None, Some(error)) => return self.error(error),
            (None, None) => return self.t("chartLoading"),
        };
        if !matches!(state, ChartState::NotRequested) {
            out.push_str("\n\n");
            out.push_str(&self.chart(&view.symbol, period, state));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use stockscope_core::TradingDate;

    use super::*;

    fn bar(date: &str, close: f64) -> Bar {
        Bar::new(
            TradingDate::parse(date).expect("date"),
            close,
            close + 2.0,
            close - 2.0,
            close,
            100,
        )
        .expect("bar")
    }

    fn quote() -> QuoteRecord {
        QuoteRecord {
            symbol: String::from("AAPL"),
            price: 150.25,
            change: -1.25,
            change_percent: -0.82,
            high: 151.0,
            low: 149.5,
            volume: 1_000,
            timestamp: String::from("2024-05-01"),
        }
    }

    #[test]
    fn summary_spans_the_window() {
        let summary = ChartSummary::from_bars(&[bar("2024-05-01", 10.0), bar("2024-05-02", 12.0)])
            .expect("non-empty");

        assert_eq!(summary.points, 2);
        assert_eq!(summary.first_date, "2024-05-01");
        assert_eq!(summary.latest_close, 12.0);
        assert_eq!(summary.high, 14.0);
        assert_eq!(summary.low, 8.0);
        assert!(ChartSummary::from_bars(&[]).is_none());
    }

    #[test]
    fn quote_is_rendered_with_translated_labels() {
        let rendered = Renderer::new(Language::Ja).quote(&quote());

        assert!(rendered.contains("株価"));
        assert!(rendered.contains("-1.25 (-0.82%)"));
        assert!(rendered.contains("2024-05-01"));
    }

    #[test]
    fn empty_window_and_empty_fetch_render_differently() {
        let renderer = Renderer::new(Language::En);

        let window = renderer.chart("IBM", ChartPeriod::OneWeek, &ChartState::NoDataInWindow);
        let fetch = renderer.chart("IBM", ChartPeriod::OneWeek, &ChartState::NoDataFetched);

        assert!(window.starts_with("IBM - Price History (1 Week)"));
        assert!(window.ends_with("No data in the selected period"));
        assert!(fetch.ends_with("No chart data available"));
    }

    #[test]
    fn chart_table_lists_bars_and_point_count() {
        let renderer = Renderer::new(Language::En);
        let state = ChartState::Points(vec![bar("2024-05-01", 10.0), bar("2024-05-02", 12.0)]);

        let rendered = renderer.chart("IBM", ChartPeriod::OneMonth, &state);

        assert!(rendered.contains("2024-05-02"));
        assert!(rendered.ends_with("Data points: 2"));
    }
}
