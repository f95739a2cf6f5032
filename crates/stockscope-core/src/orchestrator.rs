//! Search sequencing: quote first, history after a fixed delay.
//!
//! ```text
//! Idle ─▶ QuoteLoading ─┬─▶ QuoteFailed                       (terminal)
//!                       └─▶ QuoteReady ─▶ HistoryScheduled ─(delay)─▶ HistoryLoading ─┬─▶ HistoryReady
//!                                                                                    └─▶ HistoryFailed
//! ```
//!
//! Each call to [`SearchOrchestrator::search`] gets a fresh search id. Only the
//! most recent search may write the display slot; results of a superseded
//! search are dropped, and a superseded search does not issue its history
//! request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::{
    Bar, ChartPeriod, GatewayError, HistoryResult, MarketDataSource, QuoteRecord, TradingDate,
};

/// Pause between a successful quote and the history request.
pub const MIN_HISTORY_DELAY: Duration = Duration::from_secs(1);

/// Phase of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    QuoteLoading,
    QuoteReady,
    QuoteFailed,
    HistoryScheduled,
    HistoryLoading,
    HistoryReady,
    HistoryFailed,
}

impl SearchPhase {
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::QuoteLoading)
                | (Self::QuoteLoading, Self::QuoteReady)
                | (Self::QuoteLoading, Self::QuoteFailed)
                | (Self::QuoteReady, Self::HistoryScheduled)
                | (Self::HistoryScheduled, Self::HistoryLoading)
                | (Self::HistoryLoading, Self::HistoryReady)
                | (Self::HistoryLoading, Self::HistoryFailed)
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::QuoteFailed | Self::HistoryReady | Self::HistoryFailed
        )
    }

    pub const fn is_loading(self) -> bool {
        matches!(
            self,
            Self::QuoteLoading | Self::HistoryScheduled | Self::HistoryLoading
        )
    }
}

/// What the chart area should show for a search.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    /// The quote has not succeeded, so no history was or will be requested.
    NotRequested,
    Loading,
    Failed(GatewayError),
    /// History came back without any bars.
    NoDataFetched,
    /// History has bars, none inside the selected window.
    NoDataInWindow,
    /// Windowed bars, oldest first.
    Points(Vec<Bar>),
}

/// State of one search as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub search_id: u64,
    pub symbol: String,
    pub phase: SearchPhase,
    /// Every phase this search has passed through, in order.
    pub phases: Vec<SearchPhase>,
    pub quote: Option<QuoteRecord>,
    pub quote_error: Option<GatewayError>,
    pub history: Option<HistoryResult>,
    pub history_error: Option<GatewayError>,
}

impl SearchView {
    pub fn idle() -> Self {
        Self {
            search_id: 0,
            symbol: String::new(),
            phase: SearchPhase::Idle,
            phases: vec![SearchPhase::Idle],
            quote: None,
            quote_error: None,
            history: None,
            history_error: None,
        }
    }

    fn started(search_id: u64, symbol: &str) -> Self {
        let mut view = Self {
            search_id,
            symbol: symbol.trim().to_uppercase(),
            ..Self::idle()
        };
        view.advance(SearchPhase::QuoteLoading);
        view
    }

    fn advance(&mut self, next: SearchPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal search transition {:?} -> {next:?}",
            self.phase
        );
        tracing::debug!(
            search_id = self.search_id,
            symbol = %self.symbol,
            from = ?self.phase,
            to = ?next,
            "search transition"
        );
        self.phase = next;
        self.phases.push(next);
    }

    /// Chart content for `period`, windowed relative to `today`.
    pub fn chart(&self, period: ChartPeriod, today: TradingDate) -> ChartState {
        match self.phase {
            SearchPhase::Idle | SearchPhase::QuoteFailed | SearchPhase::QuoteReady => {
                ChartState::NotRequested
            }
            SearchPhase::QuoteLoading
            | SearchPhase::HistoryScheduled
            | SearchPhase::HistoryLoading => ChartState::Loading,
            SearchPhase::HistoryFailed => match &self.history_error {
                Some(error) => ChartState::Failed(error.clone()),
                None => ChartState::NotRequested,
            },
            SearchPhase::HistoryReady => match &self.history {
                Some(history) if history.bars.is_empty() => ChartState::NoDataFetched,
                Some(history) => {
                    let points = period.window(&history.bars, today);
                    if points.is_empty() {
                        ChartState::NoDataInWindow
                    } else {
                        ChartState::Points(points)
                    }
                }
                None => ChartState::NoDataFetched,
            },
        }
    }
}

/// Runs searches against a [`MarketDataSource`] and publishes the current one.
pub struct SearchOrchestrator {
    source: Arc<dyn MarketDataSource>,
    history_delay: Duration,
    last_search_id: AtomicU64,
    display: watch::Sender<SearchView>,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        let (display, _) = watch::channel(SearchView::idle());
        Self {
            source,
            history_delay: MIN_HISTORY_DELAY,
            last_search_id: AtomicU64::new(0),
            display,
        }
    }

    /// Sets the quote→history delay. Values below [`MIN_HISTORY_DELAY`] are raised to it.
    pub fn with_history_delay(mut self, delay: Duration) -> Self {
        self.history_delay = delay.max(MIN_HISTORY_DELAY);
        self
    }

    pub fn history_delay(&self) -> Duration {
        self.history_delay
    }

    /// Receiver that observes the display slot.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.display.subscribe()
    }

    /// Snapshot of the display slot.
    pub fn current(&self) -> SearchView {
        self.display.borrow().clone()
    }

    pub fn is_current(&self, search_id: u64) -> bool {
        self.last_search_id.load(Ordering::SeqCst) == search_id
    }

    /// Runs one search to completion and returns its own final view.
    ///
    /// The returned view always describes this search, even if a newer search
    /// has since taken over the display slot.
    pub async fn search(&self, symbol: &str, api_key: &str) -> SearchView {
        // Id allocation and the slot claim happen under the slot's write lock.
        let mut view = SearchView::idle();
        self.display.send_modify(|slot| {
            let search_id = self.last_search_id.fetch_add(1, Ordering::SeqCst) + 1;
            view = SearchView::started(search_id, symbol);
            *slot = view.clone();
        });
        let search_id = view.search_id;

        match self.source.quote(symbol, api_key).await {
            Ok(quote) => {
                view.quote = Some(quote);
                view.advance(SearchPhase::QuoteReady);
                self.publish(&view);
            }
            Err(error) => {
                tracing::warn!(search_id, %error, "quote failed; history will not be requested");
                view.quote_error = Some(error);
                view.advance(SearchPhase::QuoteFailed);
                self.publish(&view);
                return view;
            }
        }

        view.advance(SearchPhase::HistoryScheduled);
        self.publish(&view);
        tokio::time::sleep(self.history_delay).await;

        if !self.is_current(search_id) {
            tracing::info!(search_id, "search superseded before its history request");
            return view;
        }

        view.advance(SearchPhase::HistoryLoading);
        self.publish(&view);

        match self.source.history(symbol, api_key).await {
            Ok(history) => {
                view.history = Some(history);
                view.advance(SearchPhase::HistoryReady);
            }
            Err(error) => {
                tracing::warn!(search_id, %error, "history failed; quote stays visible");
                view.history_error = Some(error);
                view.advance(SearchPhase::HistoryFailed);
            }
        }
        self.publish(&view);
        view
    }

    /// Writes `view` to the display slot unless a newer search owns it.
    fn publish(&self, view: &SearchView) {
        self.display.send_if_modified(|slot| {
            if slot.search_id != view.search_id {
                tracing::info!(
                    stale_search_id = view.search_id,
                    current_search_id = slot.search_id,
                    "discarding result of superseded search"
                );
                return false;
            }
            *slot = view.clone();
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_documented_transitions_are_allowed() {
        use SearchPhase::*;

        assert!(Idle.can_advance_to(QuoteLoading));
        assert!(QuoteReady.can_advance_to(HistoryScheduled));
        assert!(!QuoteFailed.can_advance_to(HistoryScheduled));
        assert!(!QuoteReady.can_advance_to(HistoryLoading));
        assert!(!HistoryFailed.can_advance_to(QuoteFailed));
        assert!(QuoteFailed.is_terminal());
        assert!(HistoryScheduled.is_loading());
    }

    #[test]
    fn chart_distinguishes_empty_window_from_empty_fetch() {
        let today = TradingDate::parse("2024-06-01").expect("date");
        let old_bar = Bar::new(
            TradingDate::parse("2023-01-03").expect("date"),
            1.0,
            2.0,
            0.5,
            1.5,
            10,
        )
        .expect("bar");

        let mut view = SearchView::started(1, "ibm");
        view.advance(SearchPhase::QuoteReady);
        view.advance(SearchPhase::HistoryScheduled);
        assert_eq!(view.chart(ChartPeriod::OneWeek, today), ChartState::Loading);

        view.advance(SearchPhase::HistoryLoading);
        view.advance(SearchPhase::HistoryReady);
        view.history = Some(HistoryResult {
            symbol: String::from("IBM"),
            bars: vec![old_bar],
            last_refreshed: String::from("2023-01-03"),
        });
        assert_eq!(view.chart(ChartPeriod::OneWeek, today), ChartState::NoDataInWindow);

        if let Some(history) = view.history.as_mut() {
            history.bars.clear();
        }
        assert_eq!(view.chart(ChartPeriod::OneWeek, today), ChartState::NoDataFetched);
        assert_eq!(view.symbol, "IBM");
    }
}
