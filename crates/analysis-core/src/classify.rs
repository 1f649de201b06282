//! Fixed-threshold mapping from numbers to trend and status labels.
//!
//! The breakpoints are part of the scoring contract: moving any of them
//! changes verdicts.

use crate::types::{Status, Trend};

/// Quality of earnings below this sets the warning flag.
pub const QOE_WARNING_BELOW: f64 = 1.0;
pub const QOE_HIGH: f64 = 1.2;
pub const QOE_POOR_BELOW: f64 = 0.8;

pub const COVERAGE_STRONG: f64 = 5.0;
pub const COVERAGE_WEAK: f64 = 1.0;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Earnings this many days out or closer count as imminent.
pub const EARNINGS_IMMINENT_DAYS: i64 = 7;

/// Default relative tolerance for treating two consecutive values as equal.
pub const DEFAULT_TREND_TOLERANCE: f64 = 1e-9;

/// True when `a` and `b` differ by no more than `tolerance` relative to the
/// larger magnitude (floored at 1 so values near zero compare absolutely).
pub fn approximately_equal(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = 1.0_f64.max(a.abs()).max(b.abs());
    (a - b).abs() <= tolerance * scale
}

/// Improving / Declining / Stable from the latest and prior period values.
pub fn classify_change(latest: f64, prior: f64, tolerance: f64) -> Trend {
    if approximately_equal(latest, prior, tolerance) {
        Trend::Stable
    } else if latest > prior {
        Trend::Improving
    } else {
        Trend::Declining
    }
}

/// Expanding / Contracting / Stable from a growth rate.
pub fn classify_growth(growth_pct: f64) -> Trend {
    if growth_pct > 0.0 {
        Trend::Expanding
    } else if growth_pct < 0.0 {
        Trend::Contracting
    } else {
        Trend::Stable
    }
}

pub fn coverage_status(ratio: f64) -> Status {
    if ratio >= COVERAGE_STRONG {
        Status::Strong
    } else if ratio >= COVERAGE_WEAK {
        Status::Weak
    } else {
        Status::Critical
    }
}

pub fn sign_status(value: f64) -> Status {
    if value > 0.0 {
        Status::Positive
    } else if value < 0.0 {
        Status::Negative
    } else {
        Status::Neutral
    }
}

pub fn earnings_warning(quality_of_earnings: f64) -> bool {
    quality_of_earnings < QOE_WARNING_BELOW
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

/// 30 and 70 both fall inside the neutral band.
pub fn rsi_zone(rsi: f64) -> RsiZone {
    if rsi < RSI_OVERSOLD {
        RsiZone::Oversold
    } else if rsi > RSI_OVERBOUGHT {
        RsiZone::Overbought
    } else {
        RsiZone::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_classification() {
        assert_eq!(classify_change(1.3, 1.1, DEFAULT_TREND_TOLERANCE), Trend::Improving);
        assert_eq!(classify_change(0.9, 1.1, DEFAULT_TREND_TOLERANCE), Trend::Declining);
        assert_eq!(classify_change(1.1, 1.1, DEFAULT_TREND_TOLERANCE), Trend::Stable);
        // rounding noise from two different divisions
        assert_eq!(
            classify_change(0.1 + 0.2, 0.3, DEFAULT_TREND_TOLERANCE),
            Trend::Stable
        );
    }

    #[test]
    fn test_coverage_breakpoints() {
        assert_eq!(coverage_status(5.0), Status::Strong);
        assert_eq!(coverage_status(4.999), Status::Weak);
        assert_eq!(coverage_status(1.0), Status::Weak);
        assert_eq!(coverage_status(0.999), Status::Critical);
        assert_eq!(coverage_status(-3.0), Status::Critical);
    }

    #[test]
    fn test_growth_and_sign() {
        assert_eq!(classify_growth(12.5), Trend::Expanding);
        assert_eq!(classify_growth(-0.1), Trend::Contracting);
        assert_eq!(classify_growth(0.0), Trend::Stable);
        assert_eq!(sign_status(0.01), Status::Positive);
        assert_eq!(sign_status(-0.01), Status::Negative);
        assert_eq!(sign_status(0.0), Status::Neutral);
    }

    #[test]
    fn test_rsi_zone_edges() {
        assert_eq!(rsi_zone(30.0), RsiZone::Neutral);
        assert_eq!(rsi_zone(70.0), RsiZone::Neutral);
        assert_eq!(rsi_zone(29.99), RsiZone::Oversold);
        assert_eq!(rsi_zone(70.01), RsiZone::Overbought);
    }

    #[test]
    fn test_earnings_warning() {
        assert!(earnings_warning(0.99));
        assert!(!earnings_warning(1.0));
    }
}
