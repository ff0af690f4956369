use chrono::{NaiveDate, NaiveDateTime};
use tickmate_core::display::{effective_color, is_light_text, is_marked, is_valid_day};
use tickmate_core::{CalendarConfig, DayOffsetCalculator, Rgb, TickAggregator, Track};

fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hh, mm, 0)
        .unwrap()
}

#[test]
fn reversed_default_state_is_marked() {
    assert!(is_marked(0, true));
    assert!(!is_marked(0, false));
    assert!(is_marked(2, false));
    assert!(!is_marked(2, true));
}

#[test]
fn validity_window_for_reversed_tracks() {
    assert!(!is_valid_day(6, true, 5));
    assert!(is_valid_day(5, true, 5));
    assert!(is_valid_day(0, true, 5));
    assert!(is_valid_day(6, false, 5));
}

#[test]
fn luma_thresholds_match_reference_vectors() {
    assert!(!is_light_text(Rgb::new(255, 255, 255)));
    assert!(is_light_text(Rgb::new(0, 0, 0)));
    assert!(is_light_text(Rgb::from_packed(0x336699)));
    assert!(!is_light_text(Rgb::from_packed(0xFFEE88)));
}

// Grid-level scenario: a reversed track renders untouched days as marked in
// the track color, and ticked days as unmarked in the neutral token.
#[test]
fn reversed_track_cell_state_end_to_end() {
    let calculator = DayOffsetCalculator::new(CalendarConfig::default()).unwrap();
    let now = at(2024, 5, 20, 9, 0);

    let mut no_smoking = Track::new("no smoking", NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
    no_smoking.reversed = true;
    no_smoking.color = 0x2E7D32;

    let today_offset = calculator.offset_for_calendar_day(no_smoking.start_date, now);
    assert_eq!(today_offset, 6);

    let mut agg = TickAggregator::new();
    // Smoked two days ago.
    agg.tick(&no_smoking, 2, today_offset, 1).unwrap();

    let track_color = Rgb::from_packed(no_smoking.color);
    let neutral = Rgb::new(0xE0, 0xE0, 0xE0);

    for offset in 0..=today_offset {
        let marked = is_marked(agg.tick_count(offset), no_smoking.reversed);
        assert!(is_valid_day(offset, no_smoking.reversed, today_offset));
        let color = effective_color(marked, track_color, neutral);
        if offset == 2 {
            assert!(!marked);
            assert_eq!(color, neutral);
        } else {
            assert!(marked);
            assert_eq!(color, track_color);
        }
    }

    // A day beyond today is disabled for this reversed track.
    assert!(!is_valid_day(today_offset + 1, true, today_offset));
}
