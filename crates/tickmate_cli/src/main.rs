//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tickmate_core` linkage.
//! - Keep output deterministic enough for quick local sanity checks.

use chrono::Local;
use tickmate_core::{
    CalendarConfig, DayOffsetCalculator, MemoryTickRepository, SystemClock, Track, TrackService,
};

fn main() {
    println!("tickmate_core ping={}", tickmate_core::ping());
    println!("tickmate_core version={}", tickmate_core::core_version());

    // Why: drive one tap through the full service wiring so linkage problems
    // surface here instead of inside a host integration.
    let calculator = match DayOffsetCalculator::new(CalendarConfig::default()) {
        Ok(calculator) => calculator,
        Err(err) => {
            eprintln!("calendar config rejected: {err}");
            return;
        }
    };
    let mut service = TrackService::new(calculator, MemoryTickRepository::new(), SystemClock);

    let track = Track::new("smoke", Local::now().date_naive());
    let track_id = track.id;
    if let Err(err) = service.register_track(track) {
        eprintln!("track registration failed: {err}");
        return;
    }
    match service.tick_today(track_id) {
        Ok(_) => println!(
            "tick_today count={}",
            service.tick_count_at(track_id, 0).unwrap_or(0)
        ),
        Err(err) => eprintln!("tick failed: {err}"),
    }
}
