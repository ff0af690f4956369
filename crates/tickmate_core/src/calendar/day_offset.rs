//! Day-offset calculator.
//!
//! # Responsibility
//! - Convert instants to day offsets and back under the configured
//!   day-rollover shift.
//! - Classify calendar days against the configured logical week.
//!
//! # Invariants
//! - `offset_for_date(date_for_offset(o)) == o` for every valid offset.
//! - `date_for_offset` is strictly decreasing in the offset.
//! - Week classification never fails; out-of-range arithmetic degrades to
//!   "no boundary".

use crate::config::{CalendarConfig, ConfigError};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Offset computation failure. Local-recoverable; callers are expected to
/// reject the gesture rather than propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOffsetError {
    /// Queried instant lies after the injected reference instant.
    InvalidInput {
        date: NaiveDateTime,
        reference_now: NaiveDateTime,
    },
    /// Offset is negative or outside the representable calendar range.
    InvalidOffset(i64),
}

impl Display for DayOffsetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput {
                date,
                reference_now,
            } => write!(f, "date {date} lies after reference instant {reference_now}"),
            Self::InvalidOffset(offset) => write!(f, "day offset {offset} is not addressable"),
        }
    }
}

impl Error for DayOffsetError {}

/// Vertical inset a day row needs around logical-week separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekInset {
    None,
    /// Day begins a logical week.
    Top,
    /// Day ends a logical week.
    Bottom,
}

/// Deterministic mapping between wall-clock instants and day offsets.
#[derive(Debug, Clone, Copy)]
pub struct DayOffsetCalculator {
    config: CalendarConfig,
}

impl DayOffsetCalculator {
    /// Builds a calculator over validated preferences.
    ///
    /// # Errors
    /// Returns the underlying `ConfigError` for out-of-range preferences.
    pub fn new(config: CalendarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> CalendarConfig {
        self.config
    }

    /// Calendar day owning `instant` once the rollover shift is applied.
    ///
    /// Instants before the rollover boundary belong to the previous calendar
    /// day, which is exactly what subtracting the shift before truncation
    /// yields.
    fn logical_day(&self, instant: NaiveDateTime) -> NaiveDate {
        (instant - self.rollover()).date()
    }

    fn rollover(&self) -> Duration {
        Duration::minutes(i64::from(self.config.rollover_minutes_after_midnight))
    }

    /// Whole logical days between `date` and `reference_now`; 0 = today.
    ///
    /// # Errors
    /// - `InvalidInput` when `date` lies after `reference_now`.
    pub fn offset_for_date(
        &self,
        date: NaiveDateTime,
        reference_now: NaiveDateTime,
    ) -> Result<i64, DayOffsetError> {
        if date > reference_now {
            return Err(DayOffsetError::InvalidInput {
                date,
                reference_now,
            });
        }
        let day = self.logical_day(date);
        let today = self.logical_day(reference_now);
        Ok(today.signed_duration_since(day).num_days())
    }

    /// First instant of the logical day at `offset`.
    ///
    /// Inverse of `offset_for_date`: the returned instant maps back onto the
    /// same offset under the same rollover and reference.
    ///
    /// # Errors
    /// - `InvalidOffset` for negative or unrepresentable offsets.
    pub fn date_for_offset(
        &self,
        offset: i64,
        reference_now: NaiveDateTime,
    ) -> Result<NaiveDateTime, DayOffsetError> {
        let day = self.calendar_day_for_offset(offset, reference_now)?;
        Ok(day.and_time(NaiveTime::MIN) + self.rollover())
    }

    /// Calendar day label for the logical day at `offset`.
    ///
    /// # Errors
    /// - `InvalidOffset` for negative or unrepresentable offsets.
    pub fn calendar_day_for_offset(
        &self,
        offset: i64,
        reference_now: NaiveDateTime,
    ) -> Result<NaiveDate, DayOffsetError> {
        if offset < 0 {
            return Err(DayOffsetError::InvalidOffset(offset));
        }
        self.logical_day(reference_now)
            .checked_sub_signed(Duration::days(offset))
            .ok_or(DayOffsetError::InvalidOffset(offset))
    }

    /// Signed offset of a calendar day label relative to the current logical
    /// day. Negative when the day lies in the future; callers bound-check
    /// against it (e.g. track start anchors).
    pub fn offset_for_calendar_day(&self, day: NaiveDate, reference_now: NaiveDateTime) -> i64 {
        self.logical_day(reference_now)
            .signed_duration_since(day)
            .num_days()
    }

    /// Whether the day at `offset` is the last day of a logical week.
    ///
    /// Total function: unaddressable offsets report no boundary.
    pub fn is_weekend_boundary(&self, offset: i64, reference_now: NaiveDateTime) -> bool {
        match self.weekday_at(offset, reference_now) {
            Some(weekday) => (weekday + 1) % 7 == self.config.week_start_day,
            None => false,
        }
    }

    /// Separator inset for the day at `offset`.
    pub fn week_inset(&self, offset: i64, reference_now: NaiveDateTime) -> WeekInset {
        let Some(weekday) = self.weekday_at(offset, reference_now) else {
            return WeekInset::None;
        };
        if weekday == self.config.week_start_day {
            WeekInset::Top
        } else if (weekday + 1) % 7 == self.config.week_start_day {
            WeekInset::Bottom
        } else {
            WeekInset::None
        }
    }

    /// Sunday-based weekday index of the calendar day at `offset`.
    fn weekday_at(&self, offset: i64, reference_now: NaiveDateTime) -> Option<u8> {
        let day = self
            .logical_day(reference_now)
            .checked_sub_signed(Duration::days(offset))?;
        Some(day.weekday().num_days_from_sunday() as u8)
    }
}
