use analysis_core::{
    coverage_status, rsi_zone, ForensicMetrics, IndicatorSnapshot, RsiZone, ScoreAdjustment,
    ScoreResult, Status, Strategy, Verdict, EARNINGS_IMMINENT_DAYS, QOE_HIGH, QOE_POOR_BELOW,
    QOE_WARNING_BELOW,
};

pub const BASELINE_SCORE: i32 = 50;

/// Fold the forensic metrics and indicator snapshot into a 0-100 score.
///
/// Starts at 50 and applies each rule in table order; an unavailable input
/// contributes nothing. Every non-zero delta is recorded in `adjustments`.
pub fn calculate_score(
    metrics: &ForensicMetrics,
    indicators: &IndicatorSnapshot,
    strategy: Strategy,
) -> ScoreResult {
    let mut adjustments = Vec::new();
    let mut apply = |label: &'static str, delta: i32| {
        if delta != 0 {
            adjustments.push(ScoreAdjustment { label, delta });
        }
    };

    if let Some(qoe) = metrics.quality_of_earnings.value.get() {
        if qoe >= QOE_HIGH {
            apply("Quality of earnings >= 1.2", 10);
        } else if qoe >= QOE_WARNING_BELOW {
            apply("Quality of earnings >= 1.0", 5);
        } else if qoe < QOE_POOR_BELOW {
            apply("Quality of earnings < 0.8", -10);
        }
    }

    if let Some(coverage) = metrics.interest_coverage.value.get() {
        match coverage_status(coverage) {
            Status::Strong => apply("Interest coverage >= 5", 10),
            Status::Weak => apply("Interest coverage >= 1", 5),
            Status::Critical => apply("Interest coverage < 1", -10),
            _ => {}
        }
    }

    if let Some(rsi) = indicators.rsi.get() {
        match rsi_zone(rsi) {
            RsiZone::Neutral => apply("RSI between 30 and 70", 5),
            RsiZone::Oversold => apply("RSI oversold (< 30)", 10),
            RsiZone::Overbought => apply("RSI overbought (> 70)", -5),
        }
    }

    if let Some(days) = indicators.earnings_d_day.get() {
        if days > EARNINGS_IMMINENT_DAYS {
            apply("Earnings more than 7 days out", 5);
        } else {
            apply("Earnings within 7 days", -5);
        }
    }

    match strategy {
        Strategy::Growth => {
            if metrics.capex_growth.value.get().is_some_and(|g| g > 0.0) {
                apply("Growth: capex expanding", 5);
            }
        }
        Strategy::Value => {
            if metrics.net_buyback_yield.status == Status::Positive {
                apply("Value: net buyback positive", 5);
            }
        }
    }

    let total = BASELINE_SCORE + adjustments.iter().map(|a| a.delta).sum::<i32>();
    let (score, verdict) = finalize(total);

    ScoreResult {
        score,
        verdict,
        adjustments,
    }
}

/// Clamp a raw total to 0-100 and map it to a verdict.
fn finalize(total: i32) -> (u8, Verdict) {
    let score = total.clamp(0, 100) as u8;
    (score, Verdict::from_score(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{Absence, MetricResult, Reading, Trend};

    fn na_metrics() -> ForensicMetrics {
        let na = MetricResult::unavailable(Absence::MissingField);
        ForensicMetrics {
            quality_of_earnings: na,
            receivables_turnover: na,
            inventory_turnover: na,
            interest_coverage: na,
            capex_growth: na,
            net_buyback_yield: na,
        }
    }

    fn na_indicators() -> IndicatorSnapshot {
        let na = Reading::Absent(Absence::InsufficientHistory);
        IndicatorSnapshot {
            rsi: na,
            trix: na,
            trix_signal: na,
            ma_20: na,
            ma_60: na,
            ma_120: na,
            volume_ratio: na,
            earnings_date: None,
            earnings_d_day: Reading::Absent(Absence::MissingField),
        }
    }

    fn with_qoe(qoe: f64) -> ForensicMetrics {
        ForensicMetrics {
            quality_of_earnings: MetricResult::value(qoe),
            ..na_metrics()
        }
    }

    #[test]
    fn test_all_unavailable_is_baseline() {
        let result = calculate_score(&na_metrics(), &na_indicators(), Strategy::Growth);
        assert_eq!(result.score, 50);
        assert_eq!(result.verdict, Verdict::Hold);
        assert!(result.adjustments.is_empty());
    }

    #[test]
    fn test_qoe_bands() {
        let score = |qoe| calculate_score(&with_qoe(qoe), &na_indicators(), Strategy::Growth).score;
        assert_eq!(score(1.2), 60);
        assert_eq!(score(1.19), 55);
        assert_eq!(score(1.0), 55);
        assert_eq!(score(0.9), 50);
        assert_eq!(score(0.8), 50);
        assert_eq!(score(0.79), 40);
    }

    #[test]
    fn test_coverage_bands() {
        let score = |coverage| {
            let metrics = ForensicMetrics {
                interest_coverage: MetricResult::value(coverage),
                ..na_metrics()
            };
            calculate_score(&metrics, &na_indicators(), Strategy::Growth).score
        };
        assert_eq!(score(5.0), 60);
        assert_eq!(score(4.999), 55);
        assert_eq!(score(1.0), 55);
        assert_eq!(score(0.999), 40);
    }

    #[test]
    fn test_rsi_bands() {
        let score = |rsi| {
            let indicators = IndicatorSnapshot {
                rsi: Reading::Value(rsi),
                ..na_indicators()
            };
            calculate_score(&na_metrics(), &indicators, Strategy::Growth).score
        };
        assert_eq!(score(30.0), 55);
        assert_eq!(score(70.0), 55);
        assert_eq!(score(29.9), 60);
        assert_eq!(score(70.1), 45);
    }

    #[test]
    fn test_earnings_d_day_bands() {
        let score = |days| {
            let indicators = IndicatorSnapshot {
                earnings_d_day: Reading::Value(days),
                ..na_indicators()
            };
            calculate_score(&na_metrics(), &indicators, Strategy::Growth).score
        };
        assert_eq!(score(8), 55);
        assert_eq!(score(7), 45);
        assert_eq!(score(0), 45);
    }

    #[test]
    fn test_strategy_bonus_only_for_matching_strategy() {
        let metrics = ForensicMetrics {
            capex_growth: MetricResult {
                trend: Trend::Expanding,
                ..MetricResult::value(12.0)
            },
            net_buyback_yield: MetricResult {
                status: Status::Positive,
                ..MetricResult::value(1.5)
            },
            ..na_metrics()
        };
        let growth = calculate_score(&metrics, &na_indicators(), Strategy::Growth);
        let value = calculate_score(&metrics, &na_indicators(), Strategy::Value);
        assert_eq!(growth.score, 55);
        assert_eq!(value.score, 55);
        assert_eq!(growth.adjustments[0].label, "Growth: capex expanding");
        assert_eq!(value.adjustments[0].label, "Value: net buyback positive");

        let flat = ForensicMetrics {
            capex_growth: MetricResult::value(0.0),
            ..na_metrics()
        };
        assert_eq!(calculate_score(&flat, &na_indicators(), Strategy::Growth).score, 50);
    }

    #[test]
    fn test_adjustments_follow_table_order() {
        let metrics = ForensicMetrics {
            quality_of_earnings: MetricResult::value(1.3),
            interest_coverage: MetricResult::value(0.5),
            ..na_metrics()
        };
        let indicators = IndicatorSnapshot {
            rsi: Reading::Value(80.0),
            earnings_d_day: Reading::Value(3),
            ..na_indicators()
        };
        let result = calculate_score(&metrics, &indicators, Strategy::Value);
        let deltas: Vec<i32> = result.adjustments.iter().map(|a| a.delta).collect();
        assert_eq!(deltas, vec![10, -10, -5, -5]);
        assert_eq!(result.score, 40);
        assert_eq!(result.verdict, Verdict::Sell);
    }

    #[test]
    fn test_finalize_clamps_out_of_range_totals() {
        assert_eq!(finalize(130), (100, Verdict::StrongBuy));
        assert_eq!(finalize(-40), (0, Verdict::Sell));
        assert_eq!(finalize(100), (100, Verdict::StrongBuy));
        assert_eq!(finalize(0), (0, Verdict::Sell));
        assert_eq!(finalize(65), (65, Verdict::Buy));
    }

    #[test]
    fn test_verdict_boundaries() {
        assert_eq!(Verdict::from_score(80), Verdict::StrongBuy);
        assert_eq!(Verdict::from_score(79), Verdict::Buy);
        assert_eq!(Verdict::from_score(65), Verdict::Buy);
        assert_eq!(Verdict::from_score(64), Verdict::Hold);
        assert_eq!(Verdict::from_score(45), Verdict::Hold);
        assert_eq!(Verdict::from_score(44), Verdict::Sell);
    }
}
