use crate::reading::{Reading, NOT_AVAILABLE};

/// Render a large number with a T/B/M/K suffix and two decimals.
pub fn format_compact(value: Reading) -> String {
    let Some(num) = value.get().filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };
    let abs = num.abs();
    if abs >= 1e12 {
        format!("{:.2}T", num / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", num / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", num / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", num / 1e3)
    } else {
        format!("{num:.2}")
    }
}
