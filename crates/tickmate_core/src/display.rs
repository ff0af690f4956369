//! Pure display-state derivation for the calendar grid.
//!
//! # Responsibility
//! - Compute marked/valid/color/contrast state from a day's tick count and
//!   the track's configuration flags.
//!
//! # Invariants
//! - Stateless and total: these functions never fail and never mutate.
//! - Reversed semantics live in exactly one XOR; no call site re-derives
//!   them with separate branches.

use crate::model::color::Rgb;

/// Luma coefficients match the host UI's contrast rule; changing them would
/// break visual parity with existing installs.
const LUMA_RED: f64 = 0.299;
const LUMA_GREEN: f64 = 0.587;
const LUMA_BLUE: f64 = 0.114;
const LIGHT_TEXT_THRESHOLD: f64 = 2.0 / 3.0;

/// Whether a day renders as marked.
///
/// For a reversed track the untouched state is the marked one, hence the
/// single XOR against the tick presence.
pub fn is_marked(tick_count: u32, reversed: bool) -> bool {
    (tick_count > 0) != reversed
}

/// Whether a day may be interacted with.
///
/// Reversed tracks are already in their positive state by default, so days
/// beyond today are disabled; forward tracks accept every day the grid shows.
pub fn is_valid_day(day_offset: i64, reversed: bool, today_offset: i64) -> bool {
    !reversed || day_offset <= today_offset
}

/// Background color for a day cell.
///
/// `unmarked_color` is the theme-neutral token owned by the UI layer.
pub fn effective_color(is_marked: bool, track_color: Rgb, unmarked_color: Rgb) -> Rgb {
    if is_marked {
        track_color
    } else {
        unmarked_color
    }
}

/// Whether text over `background` should be light (white) for contrast.
pub fn is_light_text(background: Rgb) -> bool {
    let luma = (LUMA_RED * f64::from(background.r)
        + LUMA_GREEN * f64::from(background.g)
        + LUMA_BLUE * f64::from(background.b))
        / 255.0;
    luma < LIGHT_TEXT_THRESHOLD
}
