//! CSV date-by-track matrix export.
//!
//! # Responsibility
//! - Render per-day tick counts across tracks as CSV rows, one row per
//!   logical day from the oldest recorded tick up to today.
//!
//! # Invariants
//! - Non-multiple tracks emit `0`/`1`; multiple tracks emit the raw count.
//! - Rows are ordered by ascending calendar date.
//! - An empty registry produces a header-only document.

use crate::aggregate::TickAggregator;
use crate::calendar::{DayOffsetCalculator, DayOffsetError};
use crate::model::track::Track;
use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

/// Export failure.
#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
    Calendar(DayOffsetError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Calendar(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Calendar(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DayOffsetError> for ExportError {
    fn from(value: DayOffsetError) -> Self {
        Self::Calendar(value)
    }
}

/// One column of the export matrix.
pub struct ExportEntry<'a> {
    pub track: &'a Track,
    pub aggregator: &'a TickAggregator,
}

/// Writes the full matrix for the given tracks.
///
/// The day range is bounded by the oldest tick across all entries; the most
/// recent row is always the current logical day.
///
/// # Errors
/// - CSV/IO failures from the underlying writer.
/// - Calendar failures when a stored day offset is not addressable.
pub fn write_matrix<W: Write>(
    writer: W,
    entries: &[ExportEntry<'_>],
    calculator: &DayOffsetCalculator,
    reference_now: NaiveDateTime,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(entries.len() + 1);
    header.push("date".to_string());
    header.extend(entries.iter().map(|entry| entry.track.name.clone()));
    csv_writer.write_record(&header)?;

    let oldest = entries
        .iter()
        .filter_map(|entry| entry.aggregator.oldest_tick_day_offset())
        .max();

    if let Some(oldest) = oldest {
        // Ascending dates: walk offsets from the oldest day down to today.
        for offset in (0..=oldest).rev() {
            let day = calculator.calendar_day_for_offset(offset, reference_now)?;
            let mut row = Vec::with_capacity(entries.len() + 1);
            row.push(day.format("%Y-%m-%d").to_string());
            for entry in entries {
                let count = entry.aggregator.tick_count(offset);
                let cell = if entry.track.multiple {
                    count
                } else {
                    count.min(1)
                };
                row.push(cell.to_string());
            }
            csv_writer.write_record(&row)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
