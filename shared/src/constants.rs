use std::time::Duration;

// Reveal durations. The decision is made at spin start; these only delay
// its disclosure to the render layer.
pub const CASE_REVEAL_DURATION: Duration = Duration::from_secs(9);
pub const UPGRADE_REVEAL_DURATION: Duration = Duration::from_secs(6);

// Strip geometry defaults for the case-opening scroll.
pub const STRIP_REPEAT_COUNT: u32 = 20;
pub const DEFAULT_ITEM_WIDTH: f64 = 200.0;

pub const DEFAULT_UPGRADE_MULTIPLIER: f64 = 1.5;

pub const MAX_CHANCE: f64 = 100.0;

// Wheel geometry: three full turns for effect, then a stop inside one of
// two 180-degree zones. Jitter stays within the first 90 degrees of a zone
// so the stop is never on a zone boundary.
pub const FULL_SPINS: f64 = 3.0;
pub const FULL_SPIN_DEGREES: f64 = FULL_SPINS * 360.0;
pub const ZONE_SPAN_DEGREES: f64 = 180.0;
pub const ZONE_JITTER_SPAN: f64 = 90.0;
