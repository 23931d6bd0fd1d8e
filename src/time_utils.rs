// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timestamps stored on expenses.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with a `Z` suffix and whole seconds.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Creation time for a newly stored expense.
pub fn created_at_now() -> String {
    format_utc_rfc3339(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_uses_z_suffix() {
        let date = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2026-03-14T09:26:53Z");
    }

    #[test]
    fn test_created_at_now_parses_back() {
        let stamp = created_at_now();
        assert!(stamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
