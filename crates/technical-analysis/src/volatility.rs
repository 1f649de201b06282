use analysis_core::{Bar, VolatileDay};

pub const DEFAULT_VOLATILE_DAYS: usize = 5;

/// The `n` sessions with the largest open-to-close move, biggest first.
///
/// Bars with a non-positive or non-finite open, or a non-finite close, are
/// skipped. Ties keep chronological order.
pub fn volatile_days(bars: &[Bar], n: usize) -> Vec<VolatileDay> {
    let mut days: Vec<VolatileDay> = bars
        .iter()
        .filter(|b| b.open.is_finite() && b.open > 0.0 && b.close.is_finite())
        .map(|b| VolatileDay {
            date: b.date,
            change_pct: (b.close - b.open) / b.open * 100.0,
            close: b.close,
            volume: b.volume,
        })
        .collect();

    days.sort_by(|a, b| b.change_pct.abs().total_cmp(&a.change_pct.abs()));
    days.truncate(n);
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, open: f64, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            volume: 1_000.0 * day as f64,
        }
    }

    #[test]
    fn test_largest_moves_first() {
        let bars = vec![
            bar(1, 100.0, 101.0),
            bar(2, 100.0, 92.0),
            bar(3, 100.0, 105.0),
            bar(4, 100.0, 100.5),
        ];
        let days = volatile_days(&bars, 2);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert!((days[0].change_pct - -8.0).abs() < 1e-9);
        assert!((days[1].change_pct - 5.0).abs() < 1e-9);
        assert_eq!(days[1].volume, 3_000.0);
    }

    #[test]
    fn test_skips_non_positive_open() {
        let bars = vec![bar(1, 0.0, 10.0), bar(2, -5.0, 10.0), bar(3, 10.0, 11.0)];
        let days = volatile_days(&bars, DEFAULT_VOLATILE_DAYS);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].close, 11.0);
    }

    #[test]
    fn test_fewer_bars_than_requested() {
        assert!(volatile_days(&[], DEFAULT_VOLATILE_DAYS).is_empty());
        let bars = vec![bar(1, 10.0, 11.0), bar(2, 10.0, 9.0)];
        assert_eq!(volatile_days(&bars, DEFAULT_VOLATILE_DAYS).len(), 2);
    }
}
