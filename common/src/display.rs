//! Presentation rounding. Stored figures stay unrounded; only these helpers round.

use crate::metrics::CatalogStats;

/// Format a monetary value as dollars with two decimals, e.g. "$125.00".
pub fn format_money(value: f64) -> String {
    format!("${value:.2}")
}

/// Format a unit total rounded to whole units.
pub fn format_units(value: f64) -> String {
    format!("{value:.0}")
}

/// "5 days", "1 day", "-2 days".
pub fn format_days(days: i64) -> String {
    if days.abs() == 1 {
        format!("{days} day")
    } else {
        format!("{days} days")
    }
}

/// One-line summary: "2 listings · $425.00 total value · 150 total units".
pub fn format_stats(stats: &CatalogStats) -> String {
    let noun = if stats.count == 1 { "listing" } else { "listings" };
    format!(
        "{} {noun} · {} total value · {} total units",
        stats.count,
        format_money(stats.total_value),
        format_units(stats.total_units)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(125.0), "$125.00");
        assert_eq!(format_money(2.5), "$2.50");
        assert_eq!(format_money(134.999_999_9), "$135.00");
    }

    #[test]
    fn units_round_to_whole() {
        assert_eq!(format_units(935.0), "935");
        assert_eq!(format_units(12.4), "12");
    }

    #[test]
    fn days_pluralise() {
        assert_eq!(format_days(5), "5 days");
        assert_eq!(format_days(1), "1 day");
        assert_eq!(format_days(-1), "-1 day");
        assert_eq!(format_days(0), "0 days");
    }

    #[test]
    fn stats_line() {
        let stats = CatalogStats {
            count: 2,
            total_value: 425.0,
            total_units: 150.0,
        };
        assert_eq!(
            format_stats(&stats),
            "2 listings · $425.00 total value · 150 total units"
        );
    }
}
