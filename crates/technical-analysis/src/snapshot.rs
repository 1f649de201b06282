use std::borrow::Cow;

use analysis_core::{checked_div, AnalysisError, Bar, EarningsCalendar, IndicatorSnapshot, Reading};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::{rsi, sma, trix};

/// Moving-average windows reported in every snapshot.
pub const MA_WINDOWS: [usize; 3] = [20, 60, 120];

/// Tunable indicator windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub trix_period: usize,
    pub trix_signal_period: usize,
    pub volume_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            trix_period: 30,
            trix_signal_period: 9,
            volume_window: 20,
        }
    }
}

pub struct TechnicalAnalysisEngine {
    params: IndicatorParams,
}

impl TechnicalAnalysisEngine {
    pub fn new() -> Self {
        Self::with_params(IndicatorParams::default())
    }

    pub fn with_params(params: IndicatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Latest value of every indicator for a daily series.
    ///
    /// Each indicator degrades to N/A on its own when the series is too short
    /// or the arithmetic is undefined.
    pub fn get_technical_snapshot(
        &self,
        bars: &[Bar],
        calendar: &EarningsCalendar,
        as_of: NaiveDate,
    ) -> IndicatorSnapshot {
        let bars = ascending(bars);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

        let (trix, trix_signal) = self.latest_trix(&closes);
        let earnings_date = calendar.next_on_or_after(as_of);

        let snapshot = IndicatorSnapshot {
            rsi: reading("rsi", self.latest_rsi(&closes)),
            trix: reading("trix", trix),
            trix_signal: reading("trix_signal", trix_signal),
            ma_20: reading("ma_20", latest_sma(&closes, MA_WINDOWS[0])),
            ma_60: reading("ma_60", latest_sma(&closes, MA_WINDOWS[1])),
            ma_120: reading("ma_120", latest_sma(&closes, MA_WINDOWS[2])),
            volume_ratio: reading("volume_ratio", self.latest_volume_ratio(&volumes)),
            earnings_date,
            earnings_d_day: reading("earnings_d_day", d_day(earnings_date, as_of)),
        };

        tracing::debug!(
            "Technical snapshot over {} bars: rsi={} trix={} volume_ratio={}",
            closes.len(),
            snapshot.rsi,
            snapshot.trix,
            snapshot.volume_ratio
        );
        snapshot
    }

    fn latest_rsi(&self, closes: &[f64]) -> Result<f64, AnalysisError> {
        let period = self.params.rsi_period;
        let values = rsi(closes, period);
        latest(&values, period.saturating_add(1), closes.len(), "rsi")
    }

    fn latest_trix(
        &self,
        closes: &[f64],
    ) -> (Result<f64, AnalysisError>, Result<f64, AnalysisError>) {
        let period = self.params.trix_period;
        let signal_period = self.params.trix_signal_period;
        let result = trix(closes, period, signal_period);

        let required = period.saturating_add(1);
        let trix = latest(&result.trix, required, closes.len(), "trix");
        let signal = if result.trix.is_empty() {
            Err(AnalysisError::history(required, closes.len()))
        } else {
            latest(&result.signal, signal_period, result.trix.len(), "trix signal")
        };
        (trix, signal)
    }

    fn latest_volume_ratio(&self, volumes: &[f64]) -> Result<f64, AnalysisError> {
        let window = self.params.volume_window;
        let average = latest(&sma(volumes, window), window, volumes.len(), "average volume")?;
        let today = volumes
            .last()
            .copied()
            .ok_or_else(|| AnalysisError::history(window, 0))?;
        checked_div(today, average, "volume ratio")
    }
}

impl Default for TechnicalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Bars sorted oldest-first. Out-of-order input is sorted on a copy.
fn ascending(bars: &[Bar]) -> Cow<'_, [Bar]> {
    if bars.windows(2).all(|w| w[0].date <= w[1].date) {
        return Cow::Borrowed(bars);
    }
    tracing::warn!("Price series is not in ascending date order; sorting {} bars", bars.len());
    let mut sorted = bars.to_vec();
    sorted.sort_by_key(|b| b.date);
    Cow::Owned(sorted)
}

fn latest_sma(closes: &[f64], window: usize) -> Result<f64, AnalysisError> {
    latest(&sma(closes, window), window, closes.len(), "moving average")
}

/// Last element of an indicator series, or InsufficientHistory if the series
/// is empty. Non-finite values are InvalidArithmetic.
fn latest(
    series: &[f64],
    required: usize,
    available: usize,
    what: &str,
) -> Result<f64, AnalysisError> {
    match series.last() {
        Some(v) if v.is_finite() => Ok(*v),
        Some(v) => Err(AnalysisError::arithmetic(format!("{what} is not finite ({v})"))),
        None => Err(AnalysisError::history(required, available)),
    }
}

/// Calendar days until the earnings date. Past dates never reach here; the
/// calendar lookup only returns dates on or after `as_of`.
fn d_day(earnings_date: Option<NaiveDate>, as_of: NaiveDate) -> Result<i64, AnalysisError> {
    let date = earnings_date.ok_or_else(|| AnalysisError::missing("next earnings date"))?;
    Ok((date - as_of).num_days())
}

fn reading<T>(indicator: &str, result: Result<T, AnalysisError>) -> Reading<T> {
    if let Err(e) = &result {
        tracing::debug!("{} unavailable: {}", indicator, e);
    }
    result.into()
}

