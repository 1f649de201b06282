use std::fmt::Write;

use analysis_core::{format_compact, Absence, MetricResult, Reading, Status, Trend};
use analysis_orchestrator::AnalysisResult;

/// Plain-text report for terminals.
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let profile = &result.profile;

    let _ = writeln!(
        out,
        "{} ({}) as of {}",
        profile.long_name.as_deref().unwrap_or(&result.ticker),
        result.ticker,
        result.as_of
    );
    let _ = writeln!(
        out,
        "Price {} {}  change {}%  market cap {}",
        reading_2dp(optional(profile.current_price)),
        profile.currency,
        reading_2dp(profile.change_percent()),
        format_compact(optional(profile.market_cap)),
    );

    let _ = writeln!(out, "\nForensic metrics");
    for (name, metric) in result.metrics.iter() {
        let _ = writeln!(out, "  {:<22} {}", name, metric_line(metric));
    }

    let ind = &result.indicators;
    let _ = writeln!(out, "\nIndicators");
    let _ = writeln!(
        out,
        "  rsi {}  trix {} / signal {}",
        reading_2dp(ind.rsi),
        reading_2dp(ind.trix),
        reading_2dp(ind.trix_signal)
    );
    let _ = writeln!(
        out,
        "  ma20 {}  ma60 {}  ma120 {}  volume ratio {}",
        reading_2dp(ind.ma_20),
        reading_2dp(ind.ma_60),
        reading_2dp(ind.ma_120),
        reading_2dp(ind.volume_ratio)
    );
    match ind.earnings_date {
        Some(date) => {
            let _ = writeln!(out, "  earnings {} (D-{})", date, ind.earnings_d_day);
        }
        None => {
            let _ = writeln!(out, "  earnings N/A");
        }
    }

    if !result.volatile_days.is_empty() {
        let _ = writeln!(out, "\nMost volatile sessions");
        for day in &result.volatile_days {
            let _ = writeln!(
                out,
                "  {}  {:+.2}%  close {:.2}  volume {}",
                day.date,
                day.change_pct,
                day.close,
                format_compact(Reading::Value(day.volume))
            );
        }
    }

    let _ = writeln!(out, "\nScore {} / 100: {}", result.score.score, result.score.verdict.label());
    for adj in &result.score.adjustments {
        let _ = writeln!(out, "  {:+} {}", adj.delta, adj.label);
    }
    out
}

fn optional(value: Option<f64>) -> Reading {
    value.map_or(Reading::Absent(Absence::MissingField), Reading::Value)
}

fn reading_2dp(value: Reading) -> String {
    match value {
        Reading::Value(v) => format!("{v:.2}"),
        absent => absent.to_string(),
    }
}

fn metric_line(metric: &MetricResult) -> String {
    let mut line = reading_2dp(metric.value);
    if metric.trend != Trend::NotAvailable {
        let _ = write!(line, "  {:?}", metric.trend);
    }
    if metric.status != Status::NotAvailable {
        let _ = write!(line, "  {:?}", metric.status);
    }
    if metric.warning {
        line.push_str("  WARNING");
    }
    line
}
