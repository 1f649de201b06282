pub mod fields;


pub use fields::*;

use analysis_core::{
    checked_div, classify_change, classify_growth, coverage_status, earnings_warning, sign_status,
    AnalysisError, FinancialStatements, ForensicMetrics, MetricResult, Reading, StatementKind,
    StatementSet, Status, Trend, DEFAULT_TREND_TOLERANCE,
};
use chrono::NaiveDate;

/// Ratio function evaluated against one aligned period.
type RatioFn = fn(&PeriodView<'_>) -> Result<f64, AnalysisError>;

/// Field lookups across all three statements for a single period end.
///
/// Periods are aligned by date, not position: the anchor statement supplies
/// the period end and the other statements must report the same date.
pub struct PeriodView<'a> {
    statements: &'a StatementSet,
    period_end: NaiveDate,
}

impl<'a> PeriodView<'a> {
    /// View of the `index`-th most recent period of the `anchor` statement.
    pub fn at(
        statements: &'a StatementSet,
        anchor: StatementKind,
        index: usize,
    ) -> Result<Self, AnalysisError> {
        let table = statements.table(anchor);
        let period = table
            .period(index)
            .ok_or_else(|| AnalysisError::history(index + 1, table.len()))?;
        Ok(Self {
            statements,
            period_end: period.period_end,
        })
    }

    pub fn field(&self, field: CanonicalField) -> Result<f64, AnalysisError> {
        let kind = field.statement();
        let period = self.statements.table(kind).find(self.period_end).ok_or_else(|| {
            AnalysisError::missing(format!("{} for {} ({})", field.name(), self.period_end, kind.name()))
        })?;
        try_resolve(period, field)
    }

    /// Like [`field`](Self::field) but a missing line item is `None`.
    pub fn optional_field(&self, field: CanonicalField) -> Result<Option<f64>, AnalysisError> {
        match self.field(field) {
            Ok(v) => Ok(Some(v)),
            Err(AnalysisError::MissingField { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn positive(value: f64, what: &str) -> Result<f64, AnalysisError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(AnalysisError::arithmetic(format!("{what} must be positive, got {value}")))
    }
}

fn quality_of_earnings_ratio(view: &PeriodView<'_>) -> Result<f64, AnalysisError> {
    let ocf = view.field(CanonicalField::OperatingCashFlow)?;
    let net_income = view.field(CanonicalField::NetIncome)?;
    checked_div(ocf, net_income, "quality of earnings")
}

fn receivables_turnover_ratio(view: &PeriodView<'_>) -> Result<f64, AnalysisError> {
    let revenue = view.field(CanonicalField::Revenue)?;
    let receivables = positive(view.field(CanonicalField::Receivables)?, "receivables")?;
    checked_div(revenue, receivables, "receivables turnover")
}

fn inventory_turnover_ratio(view: &PeriodView<'_>) -> Result<f64, AnalysisError> {
    let cogs = view.field(CanonicalField::CostOfGoodsSold)?;
    let inventory = positive(view.field(CanonicalField::Inventory)?, "inventory")?;
    checked_div(cogs, inventory, "inventory turnover")
}

fn interest_coverage_ratio(view: &PeriodView<'_>) -> Result<f64, AnalysisError> {
    let ebit = view.field(CanonicalField::Ebit)?;
    // vendors report interest expense with either sign
    let interest = view.field(CanonicalField::InterestExpense)?.abs();
    checked_div(ebit, interest, "interest coverage")
}

fn capex_growth_pct(annual: &StatementSet) -> Result<f64, AnalysisError> {
    let latest = PeriodView::at(annual, StatementKind::CashFlow, 0)?;
    let prior = PeriodView::at(annual, StatementKind::CashFlow, 1)?;
    // capex is reported as an outflow; compare spending magnitudes
    let current = latest.field(CanonicalField::CapitalExpenditure)?.abs();
    let previous = prior.field(CanonicalField::CapitalExpenditure)?.abs();
    Ok(checked_div(current - previous, previous, "capex growth")? * 100.0)
}

/// Yield in percent and the net amount bought back.
fn buyback_yield(annual: &StatementSet, market_cap: Option<f64>) -> Result<(f64, f64), AnalysisError> {
    let view = PeriodView::at(annual, StatementKind::CashFlow, 0)?;
    let repurchase = view.optional_field(CanonicalField::ShareRepurchase)?;
    let issuance = view.optional_field(CanonicalField::ShareIssuance)?;
    if repurchase.is_none() && issuance.is_none() {
        return Err(AnalysisError::missing("share repurchase and issuance"));
    }
    let net = repurchase.map_or(0.0, f64::abs) - issuance.map_or(0.0, f64::abs);

    let market_cap = market_cap.ok_or_else(|| AnalysisError::missing("market cap"))?;
    let market_cap = positive(market_cap, "market cap")?;
    let yield_pct = checked_div(net, market_cap, "net buyback yield")? * 100.0;
    Ok((yield_pct, net))
}

pub struct ForensicAnalysisEngine {
    trend_tolerance: f64,
}

impl ForensicAnalysisEngine {
    pub fn new() -> Self {
        Self {
            trend_tolerance: DEFAULT_TREND_TOLERANCE,
        }
    }

    pub fn with_trend_tolerance(mut self, tolerance: f64) -> Self {
        self.trend_tolerance = tolerance;
        self
    }

    /// All six forensic ratios from the annual statements.
    ///
    /// Each metric is derived on its own; one failing never affects another.
    pub fn get_forensic_metrics(
        &self,
        statements: &FinancialStatements,
        market_cap: Option<f64>,
    ) -> ForensicMetrics {
        let annual = &statements.annual;
        let metrics = ForensicMetrics {
            quality_of_earnings: self.quality_of_earnings(annual),
            receivables_turnover: self.receivables_turnover(annual),
            inventory_turnover: self.inventory_turnover(annual),
            interest_coverage: self.interest_coverage(annual),
            capex_growth: self.capex_growth(annual),
            net_buyback_yield: self.net_buyback_yield(annual, market_cap),
        };

        let available = metrics.iter().filter(|(_, m)| m.value.is_available()).count();
        tracing::debug!("Forensic metrics computed: {}/6 available", available);
        metrics
    }

    /// Operating cash flow / net income, warning below 1.0.
    pub fn quality_of_earnings(&self, annual: &StatementSet) -> MetricResult {
        match self.trended_ratio(annual, StatementKind::CashFlow, quality_of_earnings_ratio) {
            Ok((ratio, trend)) => MetricResult {
                value: Reading::Value(ratio),
                trend,
                status: Status::NotAvailable,
                warning: earnings_warning(ratio),
            },
            Err(e) => unavailable("quality_of_earnings", e),
        }
    }

    /// Revenue / receivables.
    pub fn receivables_turnover(&self, annual: &StatementSet) -> MetricResult {
        match self.trended_ratio(annual, StatementKind::Income, receivables_turnover_ratio) {
            Ok((ratio, trend)) => MetricResult {
                trend,
                ..MetricResult::value(ratio)
            },
            Err(e) => unavailable("receivables_turnover", e),
        }
    }

    /// Cost of goods sold / inventory.
    pub fn inventory_turnover(&self, annual: &StatementSet) -> MetricResult {
        match self.trended_ratio(annual, StatementKind::Income, inventory_turnover_ratio) {
            Ok((ratio, trend)) => MetricResult {
                trend,
                ..MetricResult::value(ratio)
            },
            Err(e) => unavailable("inventory_turnover", e),
        }
    }

    /// EBIT / interest expense with a Strong/Weak/Critical status.
    pub fn interest_coverage(&self, annual: &StatementSet) -> MetricResult {
        let ratio = PeriodView::at(annual, StatementKind::Income, 0)
            .and_then(|view| interest_coverage_ratio(&view));
        match ratio {
            Ok(ratio) => MetricResult {
                status: coverage_status(ratio),
                ..MetricResult::value(ratio)
            },
            Err(e) => unavailable("interest_coverage", e),
        }
    }

    /// Year-over-year change in capital expenditure, in percent.
    pub fn capex_growth(&self, annual: &StatementSet) -> MetricResult {
        let growth = capex_growth_pct(annual);
        match growth {
            Ok(growth) => MetricResult {
                trend: classify_growth(growth),
                ..MetricResult::value(growth)
            },
            Err(e) => unavailable("capex_growth", e),
        }
    }

    /// (Repurchases - issuance) / market cap, in percent.
    pub fn net_buyback_yield(&self, annual: &StatementSet, market_cap: Option<f64>) -> MetricResult {
        let result = buyback_yield(annual, market_cap);
        match result {
            Ok((yield_pct, net)) => MetricResult {
                status: sign_status(net),
                ..MetricResult::value(yield_pct)
            },
            Err(e) => unavailable("net_buyback_yield", e),
        }
    }

    /// Latest ratio plus its trend against the prior period. A missing prior
    /// period only costs the trend, never the value.
    fn trended_ratio(
        &self,
        annual: &StatementSet,
        anchor: StatementKind,
        ratio: RatioFn,
    ) -> Result<(f64, Trend), AnalysisError> {
        let latest = ratio(&PeriodView::at(annual, anchor, 0)?)?;
        let trend = match PeriodView::at(annual, anchor, 1).and_then(|view| ratio(&view)) {
            Ok(prior) => classify_change(latest, prior, self.trend_tolerance),
            Err(e) => {
                tracing::debug!("Trend unavailable: {}", e);
                Trend::NotAvailable
            }
        };
        Ok((latest, trend))
    }
}

fn unavailable(metric: &str, err: AnalysisError) -> MetricResult {
    tracing::debug!("{} unavailable: {}", metric, err);
    MetricResult::unavailable(err.absence())
}

impl Default for ForensicAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
