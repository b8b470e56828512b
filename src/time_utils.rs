// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and timezone mapping.
//!
//! Peloton reports workout timezones as fixed-offset labels like
//! `Etc/GMT+8` rather than civil IANA zones. `civil_zone_for_label` maps
//! the offsets we know about to US civil zones so dates render with
//! correct daylight-saving rules. The table is a US-centric
//! approximation: `Etc/GMT+5` could be CDT or EST, and non-US offsets
//! never map. Unknown labels pass through unchanged.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Zone assumed when a workout carries no timezone label.
pub const DEFAULT_WORKOUT_ZONE: &str = "America/Los_Angeles";

/// Zone the studio records classes in; class dates always render here.
pub const STUDIO_ZONE: Tz = chrono_tz::America::New_York;

/// Map an upstream fixed-offset zone label to a civil zone name.
///
/// Keep this a lookup separate from the normalizer so new offsets can be
/// added without touching its control flow.
pub fn civil_zone_for_label(label: Option<&str>) -> String {
    match label {
        None => DEFAULT_WORKOUT_ZONE,
        Some("Etc/GMT+8") | Some("Etc/GMT+7") => "America/Los_Angeles",
        Some("Etc/GMT+6") | Some("Etc/GMT+5") => "America/Chicago",
        Some("Etc/GMT+4") => "America/New_York",
        Some(other) => other,
    }
    .to_string()
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render an epoch timestamp as a local date-time in the given zone.
///
/// Labels that are not parseable IANA zones (pass-through labels the
/// mapping did not recognize) render as UTC rather than failing.
pub fn format_workout_datetime(epoch_secs: i64, zone_name: &str) -> String {
    let utc = DateTime::from_timestamp(epoch_secs, 0).unwrap_or_default();
    let pattern = "%a, %b %-d, %Y, %-I:%M %p";

    match zone_name.parse::<Tz>() {
        Ok(tz) => utc.with_timezone(&tz).format(pattern).to_string(),
        Err(_) => utc.format(pattern).to_string(),
    }
}

/// Render an epoch timestamp as a class recording date in studio time.
pub fn format_class_date(epoch_secs: i64) -> String {
    let utc = DateTime::from_timestamp(epoch_secs, 0).unwrap_or_default();
    utc.with_timezone(&STUDIO_ZONE).format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_offsets_map_to_civil_zones() {
        assert_eq!(civil_zone_for_label(Some("Etc/GMT+8")), "America/Los_Angeles");
        assert_eq!(civil_zone_for_label(Some("Etc/GMT+7")), "America/Los_Angeles");
        assert_eq!(civil_zone_for_label(Some("Etc/GMT+6")), "America/Chicago");
        assert_eq!(civil_zone_for_label(Some("Etc/GMT+5")), "America/Chicago");
        assert_eq!(civil_zone_for_label(Some("Etc/GMT+4")), "America/New_York");
    }

    #[test]
    fn test_unknown_label_passes_through() {
        assert_eq!(civil_zone_for_label(Some("Foo/Bar")), "Foo/Bar");
        assert_eq!(civil_zone_for_label(Some("Europe/London")), "Europe/London");
    }

    #[test]
    fn test_absent_label_defaults_to_los_angeles() {
        assert_eq!(civil_zone_for_label(None), "America/Los_Angeles");
    }

    #[test]
    fn test_workout_datetime_renders_standard_time() {
        // 2023-11-14T22:13:20Z is 2:13 PM PST
        let formatted = format_workout_datetime(1_700_000_000, "America/Los_Angeles");
        assert_eq!(formatted, "Tue, Nov 14, 2023, 2:13 PM");
    }

    #[test]
    fn test_workout_datetime_renders_daylight_time() {
        // 2024-07-03T09:46:40Z is 2:46 AM PDT
        let formatted = format_workout_datetime(1_720_000_000, "America/Los_Angeles");
        assert_eq!(formatted, "Wed, Jul 3, 2024, 2:46 AM");
    }

    #[test]
    fn test_unparsable_zone_renders_as_utc() {
        let formatted = format_workout_datetime(1_700_000_000, "Foo/Bar");
        assert_eq!(formatted, "Tue, Nov 14, 2023, 10:13 PM");
    }

    #[test]
    fn test_class_date_renders_in_studio_time() {
        // 2023-11-14T22:13:20Z is 5:13 PM EST
        assert_eq!(format_class_date(1_700_000_000), "Nov 14, 2023");
    }
}
