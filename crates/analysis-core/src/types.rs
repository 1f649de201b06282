use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::reading::{Absence, Reading};

/// Daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Income,
    BalanceSheet,
    CashFlow,
}

impl StatementKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatementKind::Income => "income statement",
            StatementKind::BalanceSheet => "balance sheet",
            StatementKind::CashFlow => "cash flow statement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Annual,
    Quarterly,
}

impl Granularity {
    /// Number of periods kept per statement kind.
    pub fn max_periods(&self) -> usize {
        match self {
            Granularity::Annual => 3,
            Granularity::Quarterly => 12,
        }
    }
}

/// One column of a financial statement: every line item reported for a
/// single period end. `None` marks an item the vendor listed without a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub period_end: NaiveDate,
    #[serde(default)]
    pub items: BTreeMap<String, Option<f64>>,
}

impl StatementPeriod {
    pub fn new(period_end: NaiveDate) -> Self {
        Self {
            period_end,
            items: BTreeMap::new(),
        }
    }

    pub fn with_item(mut self, label: impl Into<String>, value: f64) -> Self {
        self.items.insert(label.into(), Some(value));
        self
    }
}

/// Periods of one statement kind, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StatementPeriod>", into = "Vec<StatementPeriod>")]
pub struct StatementTable {
    periods: Vec<StatementPeriod>,
}

impl StatementTable {
    pub fn new(periods: Vec<StatementPeriod>, granularity: Granularity) -> Self {
        Self::from(periods).truncated(granularity)
    }

    /// Keep only the most recent periods allowed for `granularity`.
    pub fn truncated(mut self, granularity: Granularity) -> Self {
        self.periods.truncate(granularity.max_periods());
        self
    }

    pub fn periods(&self) -> &[StatementPeriod] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Period by recency: 0 is the latest.
    pub fn period(&self, index: usize) -> Option<&StatementPeriod> {
        self.periods.get(index)
    }

    pub fn find(&self, period_end: NaiveDate) -> Option<&StatementPeriod> {
        self.periods.iter().find(|p| p.period_end == period_end)
    }
}

impl From<Vec<StatementPeriod>> for StatementTable {
    fn from(mut periods: Vec<StatementPeriod>) -> Self {
        periods.sort_by(|a, b| b.period_end.cmp(&a.period_end));
        // one column per period end; the first reported wins
        periods.dedup_by_key(|p| p.period_end);
        Self { periods }
    }
}

impl From<StatementTable> for Vec<StatementPeriod> {
    fn from(table: StatementTable) -> Self {
        table.periods
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementSet {
    #[serde(default)]
    pub income: StatementTable,
    #[serde(default)]
    pub balance_sheet: StatementTable,
    #[serde(default)]
    pub cash_flow: StatementTable,
}

impl StatementSet {
    pub fn table(&self, kind: StatementKind) -> &StatementTable {
        match kind {
            StatementKind::Income => &self.income,
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    pub fn truncated(&self, granularity: Granularity) -> Self {
        Self {
            income: self.income.clone().truncated(granularity),
            balance_sheet: self.balance_sheet.clone().truncated(granularity),
            cash_flow: self.cash_flow.clone().truncated(granularity),
        }
    }
}

/// Annual and quarterly statements as retrieved for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    #[serde(default)]
    pub annual: StatementSet,
    #[serde(default)]
    pub quarterly: StatementSet,
}

impl FinancialStatements {
    pub fn normalized(&self) -> Self {
        Self {
            annual: self.annual.truncated(Granularity::Annual),
            quarterly: self.quarterly.truncated(Granularity::Quarterly),
        }
    }
}

/// Company profile and quote fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub ticker: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl CompanyProfile {
    /// Day change in percent against the previous close.
    pub fn change_percent(&self) -> Reading {
        let (Some(current), Some(previous)) = (self.current_price, self.previous_close) else {
            return Reading::Absent(Absence::MissingField);
        };
        crate::error::checked_div(current - previous, previous, "change percent")
            .map(|ratio| ratio * 100.0)
            .into()
    }
}

/// Upcoming earnings dates supplied by the calendar collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsCalendar {
    #[serde(default)]
    pub earnings_dates: Vec<NaiveDate>,
}

impl EarningsCalendar {
    /// Earliest earnings date on or after `as_of`.
    pub fn next_on_or_after(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        self.earnings_dates.iter().copied().filter(|d| *d >= as_of).min()
    }
}

/// Direction of a metric between consecutive periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    Expanding,
    Contracting,
    #[serde(rename = "N/A")]
    NotAvailable,
}

/// Threshold label for a single-period value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Strong,
    Weak,
    Critical,
    Positive,
    Negative,
    Neutral,
    #[serde(rename = "N/A")]
    NotAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricResult {
    pub value: Reading,
    pub trend: Trend,
    pub status: Status,
    pub warning: bool,
}

impl MetricResult {
    pub fn unavailable(reason: Absence) -> Self {
        Self {
            value: Reading::Absent(reason),
            trend: Trend::NotAvailable,
            status: Status::NotAvailable,
            warning: false,
        }
    }

    pub fn value(value: f64) -> Self {
        Self {
            value: Reading::Value(value),
            trend: Trend::NotAvailable,
            status: Status::NotAvailable,
            warning: false,
        }
    }
}

/// The six forensic ratios for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForensicMetrics {
    pub quality_of_earnings: MetricResult,
    pub receivables_turnover: MetricResult,
    pub inventory_turnover: MetricResult,
    pub interest_coverage: MetricResult,
    pub capex_growth: MetricResult,
    pub net_buyback_yield: MetricResult,
}

impl ForensicMetrics {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MetricResult)> {
        [
            ("quality_of_earnings", &self.quality_of_earnings),
            ("receivables_turnover", &self.receivables_turnover),
            ("inventory_turnover", &self.inventory_turnover),
            ("interest_coverage", &self.interest_coverage),
            ("capex_growth", &self.capex_growth),
            ("net_buyback_yield", &self.net_buyback_yield),
        ]
        .into_iter()
    }
}

/// Latest technical indicator values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi: Reading,
    pub trix: Reading,
    pub trix_signal: Reading,
    pub ma_20: Reading,
    pub ma_60: Reading,
    pub ma_120: Reading,
    pub volume_ratio: Reading,
    pub earnings_date: Option<NaiveDate>,
    pub earnings_d_day: Reading<i64>,
}

/// A day with an unusually large open-to-close move
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatileDay {
    pub date: NaiveDate,
    pub change_pct: f64,
    pub close: f64,
    pub volume: f64,
}

/// Investment style used to pick the strategy-specific score adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Growth,
    Value,
}

impl FromStr for Strategy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if lower.contains("growth") {
            Ok(Strategy::Growth)
        } else if lower.contains("value") {
            Ok(Strategy::Value)
        } else {
            Err(AnalysisError::Config(format!("unknown strategy: {s}")))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    StrongBuy,
    Buy,
    Hold,
    Sell,
}

impl Verdict {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => Verdict::StrongBuy,
            s if s >= 65 => Verdict::Buy,
            s if s >= 45 => Verdict::Hold,
            _ => Verdict::Sell,
        }
    }

    /// Human-readable label for the verdict
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::StrongBuy => "STRONG BUY",
            Verdict::Buy => "BUY",
            Verdict::Hold => "HOLD",
            Verdict::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreAdjustment {
    pub label: &'static str,
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub verdict: Verdict,
    pub adjustments: Vec<ScoreAdjustment>,
}
