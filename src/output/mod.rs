pub mod json;
pub mod text;

use chrono::{DateTime, SecondsFormat, Utc};

pub(crate) fn iso(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Days rounded to two decimals for display.
pub(crate) fn round_days(days: f64) -> f64 {
    (days * 100.0).round() / 100.0
}
