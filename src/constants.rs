//! Thresholds, defaults, and sizing constants for the slider.

/// Significant digits kept after every arithmetic step.
pub const DEFAULT_PRECISION_LIMIT: usize = 12;

/// Gap (px) below which the two handle labels merge into the combined label.
pub const COMBINED_LABEL_GAP: f64 = 10.0;

/// Gap (px) below which a handle label hides the floor/ceil label it approaches.
pub const LIMIT_LABEL_GAP: f64 = 2.0;

/// Approximate width of one label character when the host measures nothing.
pub const LABEL_CHAR_WIDTH: f64 = 7.0;

/// Slider track thickness
#[cfg(feature = "view")]
pub const TRACK_THICKNESS: f64 = 4.0;

/// Overall slider height (cross axis)
#[cfg(feature = "view")]
pub const SLIDER_HEIGHT: f32 = 16.0;

/// Thumb radius
#[cfg(feature = "view")]
pub const THUMB_RADIUS: f64 = 7.0;

/// Tick mark radius
#[cfg(feature = "view")]
pub const TICK_RADIUS: f64 = 2.0;
