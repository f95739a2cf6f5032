//! Trailing-period windowing of daily bars for charting.

use std::str::FromStr;

use crate::{Bar, ChartPeriod, GatewayError, Outcome, TradingDate};

impl ChartPeriod {
    /// Earliest date kept by this period relative to `today`.
    pub fn cutoff(self, today: TradingDate) -> TradingDate {
        today.minus_days(self.days())
    }

    /// Bars dated on or after the cutoff, oldest first.
    ///
    /// `bars` is expected newest first, as returned by the history gateway.
    /// An empty result is a valid answer, not an error.
    pub fn window(self, bars: &[Bar], today: TradingDate) -> Vec<Bar> {
        let cutoff = self.cutoff(today);
        let mut windowed = bars
            .iter()
            .filter(|bar| bar.date >= cutoff)
            .cloned()
            .collect::<Vec<_>>();
        windowed.reverse();
        windowed
    }
}

/// Windows `bars` by a raw period key. Unknown keys are `Invalid`; there is no
/// fallback to the full series.
pub fn window_by_period(bars: &[Bar], period_key: &str, today: TradingDate) -> Outcome<Vec<Bar>> {
    let period = ChartPeriod::from_str(period_key).map_err(GatewayError::from)?;
    Ok(period.window(bars, today))
}
