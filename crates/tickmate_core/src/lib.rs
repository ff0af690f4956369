//! Day-offset and tick-aggregation engine for the Tickmate habit tracker.
//! This crate is the single source of truth for calendar and tick invariants;
//! persistence, sync and rendering live in external collaborators.

pub mod aggregate;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod display;
pub mod export;
pub mod logging;
pub mod model;
pub mod registry;
pub mod repo;
pub mod service;

pub use aggregate::{TickAggregator, TickError, TickMutation};
pub use calendar::{DayOffsetCalculator, DayOffsetError, WeekInset};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CalendarConfig, ConfigError};
pub use export::{write_matrix, ExportEntry, ExportError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::color::Rgb;
pub use model::tick::{Tick, TickValidationError};
pub use model::track::{Track, TrackId, TrackValidationError};
pub use registry::{GroupId, RegistryError, TrackRegistry};
pub use repo::{MemoryTickRepository, RepoError, RepoResult, TickRepository};
pub use service::{ServiceError, TrackService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
