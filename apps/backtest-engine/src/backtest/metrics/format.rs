//! Formatting utilities for performance metrics display.

/// Format a fraction as a percentage string.
#[must_use]
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a number with 2 decimal places.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a ratio, or `N/A` if it is not finite.
#[must_use]
pub fn format_ratio(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "N/A".to_string()
    }
}
