use analysis_core::{
    Bar, CompanyProfile, EarningsCalendar, FinancialStatements, ForensicMetrics,
    IndicatorSnapshot, ScoreResult, StatementSet, VolatileDay,
};
use chrono::NaiveDate;
use fundamental_analysis::ForensicAnalysisEngine;
use serde::{Deserialize, Serialize};
use technical_analysis::{volatile_days, TechnicalAnalysisEngine, DEFAULT_VOLATILE_DAYS};

pub mod config;
pub mod scorer;

pub use config::AnalysisConfig;
pub use scorer::{calculate_score, BASELINE_SCORE};

/// Everything the pipeline needs, already fetched by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub profile: CompanyProfile,
    #[serde(default)]
    pub statements: FinancialStatements,
    #[serde(default)]
    pub prices: Vec<Bar>,
    #[serde(default)]
    pub calendar: EarningsCalendar,
    /// Reference date for the earnings countdown
    pub as_of: NaiveDate,
}

/// One completed analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub as_of: NaiveDate,
    pub profile: CompanyProfile,
    pub metrics: ForensicMetrics,
    pub indicators: IndicatorSnapshot,
    pub volatile_days: Vec<VolatileDay>,
    pub quarterly: StatementSet,
    pub score: ScoreResult,
}

pub struct Orchestrator {
    config: AnalysisConfig,
    forensic_analyzer: ForensicAnalysisEngine,
    technical_analyzer: TechnicalAnalysisEngine,
}

impl Orchestrator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            forensic_analyzer: ForensicAnalysisEngine::new()
                .with_trend_tolerance(config.trend_tolerance),
            technical_analyzer: TechnicalAnalysisEngine::with_params(config.indicators),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the ratio and indicator engines, then score.
    ///
    /// Never fails: missing inputs surface as N/A readings inside the result.
    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisResult {
        let ticker = input.profile.ticker.clone();
        tracing::info!("Analyzing {} as of {}", ticker, input.as_of);

        let statements = input.statements.normalized();
        let market_cap = input.profile.market_cap;

        let forensic = || {
            self.forensic_analyzer
                .get_forensic_metrics(&statements, market_cap)
        };
        let technical = || {
            self.technical_analyzer
                .get_technical_snapshot(&input.prices, &input.calendar, input.as_of)
        };

        let (metrics, indicators) = if self.config.parallel {
            rayon::join(forensic, technical)
        } else {
            (forensic(), technical())
        };

        let score = calculate_score(&metrics, &indicators, self.config.strategy);
        tracing::info!(
            "Analysis complete for {}: score={} verdict={}",
            ticker,
            score.score,
            score.verdict.label()
        );

        AnalysisResult {
            ticker,
            as_of: input.as_of,
            profile: input.profile.clone(),
            metrics,
            indicators,
            volatile_days: volatile_days(&input.prices, DEFAULT_VOLATILE_DAYS),
            quarterly: statements.quarterly,
            score,
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
