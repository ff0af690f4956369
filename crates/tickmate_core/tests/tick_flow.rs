use chrono::NaiveDate;
use tickmate_core::{TickAggregator, TickError, TickMutation, Track};

fn track(multiple: bool, reversed: bool) -> Track {
    let mut track = Track::new("habit", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    track.multiple = multiple;
    track.reversed = reversed;
    track
}

const TODAY: i64 = 30;

#[test]
fn tick_then_untick_restores_empty_state() {
    let single = track(false, false);
    let mut agg = TickAggregator::new();

    assert!(matches!(
        agg.tick(&single, 4, TODAY, 1).unwrap(),
        TickMutation::Created(_)
    ));
    assert!(agg.untick(&single, 4, TODAY, 2).unwrap());
    assert!(agg.is_empty());
    assert_eq!(agg.oldest_tick_day_offset(), None);
}

#[test]
fn multiple_track_n_ticks_then_n_unticks_removes_entry() {
    let multi = track(true, false);
    let mut agg = TickAggregator::new();
    let n = 5;

    for i in 0..n {
        agg.tick(&multi, 2, TODAY, i).unwrap();
    }
    assert_eq!(agg.tick_count(2), n as u32);

    for i in 0..n {
        assert!(agg.untick(&multi, 2, TODAY, 100 + i).unwrap());
    }
    assert_eq!(agg.tick_count(2), 0);
    assert!(agg.get(2).is_none());
    assert!(!agg.untick(&multi, 2, TODAY, 200).unwrap());
}

#[test]
fn single_track_double_tap_is_noop_and_untick_removes() {
    let single = track(false, false);
    let mut agg = TickAggregator::new();

    agg.tick(&single, 3, TODAY, 1).unwrap();
    assert_eq!(agg.tick_count(3), 1);
    assert_eq!(agg.tick(&single, 3, TODAY, 2).unwrap(), TickMutation::Unchanged);
    assert_eq!(agg.tick_count(3), 1);

    assert!(agg.untick(&single, 3, TODAY, 3).unwrap());
    assert_eq!(agg.tick_count(3), 0);
    assert!(agg.get(3).is_none());
}

#[test]
fn tap_three_untick_once_keeps_two() {
    let multi = track(true, false);
    let mut agg = TickAggregator::new();

    for i in 0..3 {
        agg.tick(&multi, 0, TODAY, i).unwrap();
    }
    assert_eq!(agg.tick_count(0), 3);
    assert!(agg.untick(&multi, 0, TODAY, 10).unwrap());
    assert_eq!(agg.tick_count(0), 2);
    assert_eq!(agg.oldest_tick_day_offset(), Some(0));
}

#[test]
fn reversed_track_cannot_touch_days_beyond_today() {
    let reversed = track(false, true);
    let mut agg = TickAggregator::new();

    assert!(agg.tick(&reversed, TODAY, TODAY, 1).is_ok());
    let err = agg.tick(&reversed, TODAY + 1, TODAY, 2).unwrap_err();
    assert_eq!(
        err,
        TickError::InvalidDay {
            day_offset: TODAY + 1,
            today_offset: TODAY
        }
    );
    assert!(agg.untick(&reversed, TODAY + 1, TODAY, 3).is_err());
    // Forward tracks have no such bound.
    let forward = track(false, false);
    assert!(agg.tick(&forward, TODAY + 1, TODAY, 4).is_ok());
}

#[test]
fn modified_stamp_follows_every_mutation() {
    let multi = track(true, false);
    let mut agg = TickAggregator::new();

    agg.tick(&multi, 1, TODAY, 100).unwrap();
    assert_eq!(agg.get(1).unwrap().modified, 100);
    agg.tick(&multi, 1, TODAY, 200).unwrap();
    assert_eq!(agg.get(1).unwrap().modified, 200);
    agg.tick(&multi, 1, TODAY, 300).unwrap();
    agg.untick(&multi, 1, TODAY, 400).unwrap();
    assert_eq!(agg.get(1).unwrap().modified, 400);
}
