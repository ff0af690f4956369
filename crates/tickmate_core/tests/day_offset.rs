use chrono::{NaiveDate, NaiveDateTime};
use tickmate_core::{CalendarConfig, DayOffsetCalculator, DayOffsetError, WeekInset};

fn calculator(rollover: u32, week_start: u8) -> DayOffsetCalculator {
    DayOffsetCalculator::new(CalendarConfig {
        rollover_minutes_after_midnight: rollover,
        week_start_day: week_start,
    })
    .unwrap()
}

fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hh, mm, 0)
        .unwrap()
}

#[test]
fn date_for_offset_is_strictly_decreasing() {
    for rollover in [0, 60, 180, 1439] {
        let calc = calculator(rollover, 1);
        let now = at(2024, 5, 20, 14, 30);
        let mut previous = calc.date_for_offset(0, now).unwrap();
        for offset in 1..60 {
            let date = calc.date_for_offset(offset, now).unwrap();
            assert!(
                date < previous,
                "offset {offset} with rollover {rollover} did not move into the past"
            );
            previous = date;
        }
    }
}

#[test]
fn offset_roundtrip_holds_for_all_rollovers() {
    for rollover in [0, 1, 60, 180, 720, 1439] {
        let calc = calculator(rollover, 1);
        for now in [at(2024, 5, 20, 0, 0), at(2024, 5, 20, 2, 59), at(2024, 5, 20, 23, 59)] {
            for offset in [0, 1, 2, 7, 30, 365] {
                let date = calc.date_for_offset(offset, now).unwrap();
                assert_eq!(
                    calc.offset_for_date(date, now),
                    Ok(offset),
                    "roundtrip failed for offset {offset}, rollover {rollover}, now {now}"
                );
            }
        }
    }
}

#[test]
fn three_am_rollover_boundary() {
    // With a 3:00 AM rollover and "now" at 02:00 on day D, the previous
    // evening at 23:00 belongs to the same logical day as now.
    let calc = calculator(180, 1);
    let now = at(2024, 5, 20, 2, 0);
    assert_eq!(calc.offset_for_date(at(2024, 5, 19, 23, 0), now), Ok(0));
    // The first instant at/after the boundary opens the next logical day.
    assert_eq!(calc.offset_for_date(at(2024, 5, 19, 3, 0), now), Ok(0));
    assert_eq!(calc.offset_for_date(at(2024, 5, 19, 2, 59), now), Ok(1));
}

#[test]
fn rollover_applies_to_reference_and_date_symmetrically() {
    let calc = calculator(180, 1);
    // Same wall-clock date, before vs after the boundary.
    let before_boundary = at(2024, 5, 20, 2, 0);
    let after_boundary = at(2024, 5, 20, 4, 0);
    let stored = at(2024, 5, 19, 12, 0);
    assert_eq!(calc.offset_for_date(stored, before_boundary), Ok(0));
    assert_eq!(calc.offset_for_date(stored, after_boundary), Ok(1));
}

#[test]
fn future_instant_is_invalid_input() {
    let calc = calculator(0, 1);
    let now = at(2024, 5, 20, 14, 0);
    let err = calc.offset_for_date(at(2024, 5, 21, 0, 0), now).unwrap_err();
    assert!(matches!(err, DayOffsetError::InvalidInput { .. }));
}

#[test]
fn week_insets_follow_configured_week_start() {
    // May 20, 2024 is a Monday.
    let now = at(2024, 5, 20, 9, 0);

    let monday_weeks = calculator(0, 1);
    assert_eq!(monday_weeks.week_inset(0, now), WeekInset::Top);
    assert_eq!(monday_weeks.week_inset(1, now), WeekInset::Bottom);
    assert!(monday_weeks.is_weekend_boundary(1, now));

    let sunday_weeks = calculator(0, 0);
    assert_eq!(sunday_weeks.week_inset(1, now), WeekInset::Top); // Sunday
    assert_eq!(sunday_weeks.week_inset(2, now), WeekInset::Bottom); // Saturday
    assert_eq!(sunday_weeks.week_inset(0, now), WeekInset::None); // Monday
    assert!(sunday_weeks.is_weekend_boundary(2, now));
    assert!(!sunday_weeks.is_weekend_boundary(0, now));
}

#[test]
fn rollover_shifts_the_weekday_a_day_belongs_to() {
    // At 01:00 Monday with a 3:00 AM rollover, "today" is still Sunday.
    let calc = calculator(180, 1);
    let now = at(2024, 5, 20, 1, 0);
    assert_eq!(calc.week_inset(0, now), WeekInset::Bottom);
    assert_eq!(calc.week_inset(6, now), WeekInset::Top);
}
