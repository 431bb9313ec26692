//! Weekday-pattern expansion for recurring shift series.
//!
//! This module provides the pure function that turns a recurring series
//! request into an ordered sequence of concrete (start, end) occurrence
//! pairs. Persistence of the resulting rows is the caller's concern.

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{ShiftSeries, Termination};

/// One concrete occurrence produced by expanding a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftOccurrence {
    /// The start of the occurrence.
    pub start: NaiveDateTime,
    /// The end of the occurrence (start plus the series duration).
    pub end: NaiveDateTime,
    /// The weekday of the occurrence's start.
    pub weekday: Weekday,
}

/// Expands a recurring series into its concrete occurrences.
///
/// Walks calendar weeks forward from the Monday-start week containing the
/// series start, stepping 7 days for weekly and 14 days for fortnightly
/// cadence. Within each visited week one occurrence is emitted per selected
/// weekday (in Monday-to-Sunday order) whose computed start falls on or
/// after the series start and, for date-bounded series, on or before the
/// boundary date. Every occurrence spans the same duration as the anchor,
/// anchored at the series start's time of day.
///
/// # Guarantees
///
/// - Every occurrence's start is on or after the series start.
/// - Occurrences are strictly ordered by start time (for a duplicate-free
///   weekday set).
/// - With [`Termination::Count`] the output length never exceeds the count.
/// - With [`Termination::Until`] no occurrence's date exceeds the boundary.
///
/// # Edge cases
///
/// - Selected weekdays that fall earlier in the first week than the series
///   start are skipped, never emitted retroactively.
/// - An empty weekday set yields an empty sequence.
/// - A boundary date before the series start yields an empty sequence.
/// - Duplicate weekday entries are NOT deduplicated here; callers are
///   expected to deduplicate before expanding.
///
/// An empty result is a valid outcome, not an error; the API surface
/// reports the created count so callers can see a zero-shift expansion.
///
/// # Example
///
/// ```
/// use roster_engine::models::{Recurrence, ShiftSeries, Termination};
/// use roster_engine::rostering::expand_series;
/// use chrono::{NaiveDateTime, Weekday};
///
/// // Monday 2024-01-01, 09:00-17:00, Mon+Wed weekly, four occurrences.
/// let series = ShiftSeries {
///     title: "Community access".to_string(),
///     start: NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: Some(NaiveDateTime::parse_from_str("2024-01-01 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap()),
///     weekdays: vec![Weekday::Mon, Weekday::Wed],
///     recurrence: Recurrence::Weekly,
///     termination: Termination::Count(4),
///     user_id: None,
///     client_id: None,
/// };
///
/// let occurrences = expand_series(&series);
/// let dates: Vec<String> = occurrences.iter().map(|o| o.start.date().to_string()).collect();
/// assert_eq!(dates, ["2024-01-01", "2024-01-03", "2024-01-08", "2024-01-10"]);
/// ```
pub fn expand_series(series: &ShiftSeries) -> Vec<ShiftOccurrence> {
    let mut occurrences = Vec::new();

    if series.weekdays.is_empty() {
        return occurrences;
    }

    // Monday-to-Sunday order within each week; duplicates are preserved.
    let mut weekdays = series.weekdays.clone();
    weekdays.sort_by_key(|w| w.num_days_from_monday());

    let duration = series.duration();
    let anchor_time = series.start.time();
    let week_step = Duration::days(series.recurrence.week_step_days());

    // Monday of the calendar week containing the series start.
    let mut week_start = series.start.date()
        - Duration::days(i64::from(series.start.date().weekday().num_days_from_monday()));

    loop {
        match series.termination {
            Termination::Count(cap) => {
                if occurrences.len() >= cap as usize {
                    break;
                }
            }
            Termination::Until(boundary) => {
                if week_start > boundary {
                    break;
                }
            }
        }

        for weekday in &weekdays {
            let date = week_start + Duration::days(i64::from(weekday.num_days_from_monday()));
            let start = date.and_time(anchor_time);

            // Never emit before the series start (weekday wrap in the
            // first week) or past the boundary date.
            if start < series.start {
                continue;
            }
            if let Termination::Until(boundary) = series.termination {
                if date > boundary {
                    continue;
                }
            }
            if let Termination::Count(cap) = series.termination {
                if occurrences.len() >= cap as usize {
                    break;
                }
            }

            occurrences.push(ShiftOccurrence {
                start,
                end: start + duration,
                weekday: *weekday,
            });
        }

        week_start += week_step;
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;
    use chrono::NaiveDate;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_series(
        start: &str,
        end: Option<&str>,
        weekdays: Vec<Weekday>,
        recurrence: Recurrence,
        termination: Termination,
    ) -> ShiftSeries {
        ShiftSeries {
            title: "Community access".to_string(),
            start: make_datetime(start),
            end: end.map(make_datetime),
            weekdays,
            recurrence,
            termination,
            user_id: None,
            client_id: None,
        }
    }

    fn starts(occurrences: &[ShiftOccurrence]) -> Vec<String> {
        occurrences.iter().map(|o| o.start.to_string()).collect()
    }

    // ==========================================================================
    // EX-001: reference scenario - Mon+Wed weekly, count 4
    // ==========================================================================
    #[test]
    fn test_ex_001_monday_wednesday_weekly_count_4() {
        // 2024-01-01 is a Monday
        let series = make_series(
            "2024-01-01 09:00:00",
            Some("2024-01-01 17:00:00"),
            vec![Weekday::Mon, Weekday::Wed],
            Recurrence::Weekly,
            Termination::Count(4),
        );

        let occurrences = expand_series(&series);
        assert_eq!(
            starts(&occurrences),
            [
                "2024-01-01 09:00:00",
                "2024-01-03 09:00:00",
                "2024-01-08 09:00:00",
                "2024-01-10 09:00:00",
            ]
        );
        for occurrence in &occurrences {
            assert_eq!(occurrence.end, occurrence.start + Duration::hours(8));
        }
    }

    // ==========================================================================
    // EX-002: weekday earlier in the first week than the start is skipped
    // ==========================================================================
    #[test]
    fn test_ex_002_no_retroactive_emission_in_first_week() {
        // 2024-01-03 is a Wednesday; Monday of that week must not be emitted.
        let series = make_series(
            "2024-01-03 09:00:00",
            Some("2024-01-03 17:00:00"),
            vec![Weekday::Mon, Weekday::Wed],
            Recurrence::Weekly,
            Termination::Count(3),
        );

        let occurrences = expand_series(&series);
        assert_eq!(
            starts(&occurrences),
            [
                "2024-01-03 09:00:00",
                "2024-01-08 09:00:00",
                "2024-01-10 09:00:00",
            ]
        );
    }

    // ==========================================================================
    // EX-003: fortnightly cadence skips alternate weeks
    // ==========================================================================
    #[test]
    fn test_ex_003_fortnightly_skips_alternate_weeks() {
        let series = make_series(
            "2024-01-01 09:00:00",
            Some("2024-01-01 17:00:00"),
            vec![Weekday::Mon],
            Recurrence::Fortnightly,
            Termination::Count(3),
        );

        let occurrences = expand_series(&series);
        assert_eq!(
            starts(&occurrences),
            [
                "2024-01-01 09:00:00",
                "2024-01-15 09:00:00",
                "2024-01-29 09:00:00",
            ]
        );
    }

    // ==========================================================================
    // EX-004: date-bounded termination
    // ==========================================================================
    #[test]
    fn test_ex_004_until_boundary_is_inclusive() {
        let series = make_series(
            "2024-01-01 09:00:00",
            Some("2024-01-01 17:00:00"),
            vec![Weekday::Mon, Weekday::Wed],
            Recurrence::Weekly,
            Termination::Until(make_date("2024-01-10")),
        );

        let occurrences = expand_series(&series);
        // Jan 10 itself qualifies; nothing after it does.
        assert_eq!(
            starts(&occurrences),
            [
                "2024-01-01 09:00:00",
                "2024-01-03 09:00:00",
                "2024-01-08 09:00:00",
                "2024-01-10 09:00:00",
            ]
        );
    }

    // ==========================================================================
    // EX-005: boundary before start yields empty
    // ==========================================================================
    #[test]
    fn test_ex_005_boundary_before_start_yields_empty() {
        let series = make_series(
            "2024-01-08 09:00:00",
            None,
            vec![Weekday::Mon],
            Recurrence::Weekly,
            Termination::Until(make_date("2024-01-01")),
        );

        assert!(expand_series(&series).is_empty());
    }

    // ==========================================================================
    // EX-006: empty weekday set yields empty
    // ==========================================================================
    #[test]
    fn test_ex_006_empty_weekday_set_yields_empty() {
        let series = make_series(
            "2024-01-01 09:00:00",
            None,
            vec![],
            Recurrence::Weekly,
            Termination::Count(10),
        );

        assert!(expand_series(&series).is_empty());
    }

    // ==========================================================================
    // EX-007: zero count yields empty
    // ==========================================================================
    #[test]
    fn test_ex_007_zero_count_yields_empty() {
        let series = make_series(
            "2024-01-01 09:00:00",
            None,
            vec![Weekday::Mon],
            Recurrence::Weekly,
            Termination::Count(0),
        );

        assert!(expand_series(&series).is_empty());
    }

    // ==========================================================================
    // EX-008: missing end defaults to eight hours
    // ==========================================================================
    #[test]
    fn test_ex_008_default_duration_is_eight_hours() {
        let series = make_series(
            "2024-01-01 09:00:00",
            None,
            vec![Weekday::Mon],
            Recurrence::Weekly,
            Termination::Count(1),
        );

        let occurrences = expand_series(&series);
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].end, make_datetime("2024-01-01 17:00:00"));
    }

    // ==========================================================================
    // EX-009: overnight duration carries across occurrences
    // ==========================================================================
    #[test]
    fn test_ex_009_overnight_duration_carries() {
        // Sleepover 22:00 to 06:00 next day.
        let series = make_series(
            "2024-01-01 22:00:00",
            Some("2024-01-02 06:00:00"),
            vec![Weekday::Mon, Weekday::Fri],
            Recurrence::Weekly,
            Termination::Count(2),
        );

        let occurrences = expand_series(&series);
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].start, make_datetime("2024-01-01 22:00:00"));
        assert_eq!(occurrences[0].end, make_datetime("2024-01-02 06:00:00"));
        // Friday of the same week.
        assert_eq!(occurrences[1].start, make_datetime("2024-01-05 22:00:00"));
        assert_eq!(occurrences[1].end, make_datetime("2024-01-06 06:00:00"));
    }

    // ==========================================================================
    // EX-010: weekdays emitted in Monday-to-Sunday order regardless of input order
    // ==========================================================================
    #[test]
    fn test_ex_010_weekdays_emitted_in_week_order() {
        let series = make_series(
            "2024-01-01 09:00:00",
            None,
            vec![Weekday::Fri, Weekday::Mon, Weekday::Wed],
            Recurrence::Weekly,
            Termination::Count(3),
        );

        let occurrences = expand_series(&series);
        assert_eq!(
            starts(&occurrences),
            [
                "2024-01-01 09:00:00",
                "2024-01-03 09:00:00",
                "2024-01-05 09:00:00",
            ]
        );
    }

    // ==========================================================================
    // EX-011: count cap cuts mid-week
    // ==========================================================================
    #[test]
    fn test_ex_011_count_cap_cuts_mid_week() {
        let series = make_series(
            "2024-01-01 09:00:00",
            None,
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed],
            Recurrence::Weekly,
            Termination::Count(5),
        );

        let occurrences = expand_series(&series);
        assert_eq!(occurrences.len(), 5);
        // Second Tuesday is the fifth occurrence; Wednesday is cut.
        assert_eq!(
            occurrences.last().unwrap().start,
            make_datetime("2024-01-09 09:00:00")
        );
    }

    // ==========================================================================
    // EX-012: sub-day anchor time respected on the first day
    // ==========================================================================
    #[test]
    fn test_ex_012_anchor_day_occurrence_not_before_start() {
        // Start mid-Monday; that Monday's occurrence is the start itself.
        let series = make_series(
            "2024-01-01 14:30:00",
            Some("2024-01-01 18:30:00"),
            vec![Weekday::Mon],
            Recurrence::Weekly,
            Termination::Count(2),
        );

        let occurrences = expand_series(&series);
        assert_eq!(
            starts(&occurrences),
            ["2024-01-01 14:30:00", "2024-01-08 14:30:00"]
        );
    }

    // ==========================================================================
    // EX-013: start on a Sunday, weeks still anchor on Monday
    // ==========================================================================
    #[test]
    fn test_ex_013_sunday_start_week_anchor() {
        // 2024-01-07 is a Sunday. Mon+Sun selected: the first week
        // contributes only the Sunday; following weeks contribute both.
        let series = make_series(
            "2024-01-07 10:00:00",
            Some("2024-01-07 14:00:00"),
            vec![Weekday::Mon, Weekday::Sun],
            Recurrence::Weekly,
            Termination::Count(4),
        );

        let occurrences = expand_series(&series);
        assert_eq!(
            starts(&occurrences),
            [
                "2024-01-07 10:00:00",
                "2024-01-08 10:00:00",
                "2024-01-14 10:00:00",
                "2024-01-15 10:00:00",
            ]
        );
    }

    // ==========================================================================
    // EX-014: duplicate weekday entries are preserved, not deduplicated
    // ==========================================================================
    #[test]
    fn test_ex_014_duplicate_weekdays_not_deduplicated() {
        let series = make_series(
            "2024-01-01 09:00:00",
            None,
            vec![Weekday::Mon, Weekday::Mon],
            Recurrence::Weekly,
            Termination::Count(2),
        );

        let occurrences = expand_series(&series);
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].start, occurrences[1].start);
    }

    // ==========================================================================
    // Property tests
    // ==========================================================================
    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn weekday_from_index(index: u8) -> Weekday {
            match index % 7 {
                0 => Weekday::Mon,
                1 => Weekday::Tue,
                2 => Weekday::Wed,
                3 => Weekday::Thu,
                4 => Weekday::Fri,
                5 => Weekday::Sat,
                _ => Weekday::Sun,
            }
        }

        fn arb_series() -> impl Strategy<Value = ShiftSeries> {
            (
                0i64..=1460,                              // start day offset from 2020-01-01
                0u32..24,                                 // start hour
                1i64..=24,                                // duration hours
                proptest::collection::vec(0u8..7, 0..=7), // weekday indices (may repeat)
                prop_oneof![Just(Recurrence::Weekly), Just(Recurrence::Fortnightly)],
                prop_oneof![
                    (0u32..=60).prop_map(Termination::Count),
                    (-30i64..=120).prop_map(|d| Termination::Until(
                        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(d)
                    )),
                ],
            )
                .prop_map(|(day_offset, hour, duration, indices, recurrence, termination)| {
                    let start = (NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
                        + Duration::days(day_offset))
                    .and_hms_opt(hour, 0, 0)
                    .unwrap();
                    // Deduplicate as the API layer does, preserving coverage of
                    // varied set sizes.
                    let mut weekdays: Vec<Weekday> =
                        indices.into_iter().map(weekday_from_index).collect();
                    weekdays.sort_by_key(|w| w.num_days_from_monday());
                    weekdays.dedup();
                    ShiftSeries {
                        title: "prop".to_string(),
                        start,
                        end: Some(start + Duration::hours(duration)),
                        weekdays,
                        recurrence,
                        termination,
                        user_id: None,
                        client_id: None,
                    }
                })
        }

        // Termination::Until is clamped relative to the start above, so the
        // walk always terminates within a bounded number of weeks.
        proptest! {
            #[test]
            fn prop_no_occurrence_before_start(series in arb_series()) {
                for occurrence in expand_series(&series) {
                    prop_assert!(occurrence.start >= series.start);
                }
            }

            #[test]
            fn prop_count_cap_respected(series in arb_series()) {
                if let Termination::Count(cap) = series.termination {
                    prop_assert!(expand_series(&series).len() <= cap as usize);
                }
            }

            #[test]
            fn prop_until_boundary_respected(series in arb_series()) {
                if let Termination::Until(boundary) = series.termination {
                    for occurrence in expand_series(&series) {
                        prop_assert!(occurrence.start.date() <= boundary);
                    }
                }
            }

            #[test]
            fn prop_occurrences_strictly_ordered(series in arb_series()) {
                let occurrences = expand_series(&series);
                for pair in occurrences.windows(2) {
                    prop_assert!(pair[0].start < pair[1].start);
                }
            }

            #[test]
            fn prop_weekdays_respected(series in arb_series()) {
                for occurrence in expand_series(&series) {
                    prop_assert!(series.weekdays.contains(&occurrence.start.date().weekday()));
                    prop_assert_eq!(occurrence.weekday, occurrence.start.date().weekday());
                }
            }

            #[test]
            fn prop_length_bounded_by_weekdays_times_weeks(series in arb_series()) {
                if let Termination::Until(boundary) = series.termination {
                    let occurrences = expand_series(&series);
                    if series.weekdays.is_empty() {
                        prop_assert!(occurrences.is_empty());
                    } else {
                        let span_days = (boundary - series.start.date()).num_days();
                        if span_days >= 0 {
                            let weeks = span_days / series.recurrence.week_step_days() + 1;
                            let cap = series.weekdays.len() as i64 * weeks;
                            prop_assert!(occurrences.len() as i64 <= cap);
                        } else {
                            prop_assert!(occurrences.is_empty());
                        }
                    }
                }
            }

            #[test]
            fn prop_duration_constant(series in arb_series()) {
                let duration = series.duration();
                for occurrence in expand_series(&series) {
                    prop_assert_eq!(occurrence.end - occurrence.start, duration);
                }
            }
        }
    }
}
