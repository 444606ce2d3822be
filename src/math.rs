//! Value math: scale transforms and rounding helpers.
//! Positions are normalized f64 in 0.0..=1.0; values live in the slider domain.

use std::fmt;
use std::rc::Rc;

/// `(value, floor, ceil) -> percent` or `(percent, floor, ceil) -> value`.
pub type MappingFn = Rc<dyn Fn(f64, f64, f64) -> f64>;

/// Converts between domain values and normalized positions.
///
/// Custom functions must be monotonic over `[floor, ceil]`; this is not checked.
#[derive(Clone, Default)]
pub enum ValueMapper {
    #[default]
    Linear,
    Logarithmic,
    Custom {
        to_position: MappingFn,
        to_value: MappingFn,
    },
}

impl fmt::Debug for ValueMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("Linear"),
            Self::Logarithmic => f.write_str("Logarithmic"),
            Self::Custom { .. } => f.write_str("Custom"),
        }
    }
}

impl ValueMapper {
    /// Value → percent in 0.0..=1.0. NaN (degenerate range, bad custom fn) maps to 0.
    pub fn value_to_position(&self, value: f64, floor: f64, ceil: f64) -> f64 {
        let percent = match self {
            Self::Linear => linear_value_to_position(value, floor, ceil),
            Self::Logarithmic => linear_value_to_position(value.ln(), floor.ln(), ceil.ln()),
            Self::Custom { to_position, .. } => to_position(value, floor, ceil),
        };
        if percent.is_nan() { 0.0 } else { percent }
    }

    /// Percent in 0.0..=1.0 → value. NaN maps to 0.
    pub fn position_to_value(&self, percent: f64, floor: f64, ceil: f64) -> f64 {
        let value = match self {
            Self::Linear => linear_position_to_value(percent, floor, ceil),
            Self::Logarithmic => {
                linear_position_to_value(percent, floor.ln(), ceil.ln()).exp()
            }
            Self::Custom { to_value, .. } => to_value(percent, floor, ceil),
        };
        if value.is_nan() { 0.0 } else { value }
    }
}

fn linear_value_to_position(value: f64, floor: f64, ceil: f64) -> f64 {
    let range = ceil - floor;
    if range == 0.0 {
        return 0.0;
    }
    (value - floor) / range
}

fn linear_position_to_value(percent: f64, floor: f64, ceil: f64) -> f64 {
    percent * (ceil - floor) + floor
}

/// Index of the entry closest to `value`. Ties keep the lower index.
///
/// Returns 0 when `steps` is empty.
pub fn find_step_index(value: f64, steps: impl IntoIterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, step) in steps.into_iter().enumerate() {
        let distance = (value - step).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

/// Round to `limit` significant digits.
pub fn round_to_precision_limit(value: f64, limit: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let digits = limit.clamp(1, 17);
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// True when `value % modulo` is within `10^-limit` of 0 or of `modulo`.
pub fn is_modulo_within_precision_limit(value: f64, modulo: f64, limit: usize) -> bool {
    if modulo == 0.0 {
        return false;
    }
    let epsilon = 10f64.powi(-i32::try_from(limit).unwrap_or(i32::MAX));
    let remainder = (value % modulo).abs();
    remainder <= epsilon || (remainder - modulo.abs()).abs() <= epsilon
}

pub fn clamp_to_range(value: f64, floor: f64, ceil: f64) -> f64 {
    value.max(floor).min(ceil)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_midpoint() {
        let m = ValueMapper::Linear;
        assert_eq!(m.value_to_position(50.0, 0.0, 100.0), 0.5);
        assert_eq!(m.position_to_value(0.25, 0.0, 100.0), 25.0);
    }

    #[test]
    fn log_scale_decades() {
        let m = ValueMapper::Logarithmic;
        let p = m.value_to_position(10.0, 1.0, 100.0);
        assert!((p - 0.5).abs() < 1e-12);
        let v = m.position_to_value(0.5, 1.0, 100.0);
        assert!((v - 10.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_range_is_zero() {
        assert_eq!(ValueMapper::Linear.value_to_position(3.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn custom_mapper_is_used() {
        let m = ValueMapper::Custom {
            to_position: Rc::new(|v, f, c| ((v - f) / (c - f)).sqrt()),
            to_value: Rc::new(|p, f, c| p * p * (c - f) + f),
        };
        assert_eq!(m.value_to_position(25.0, 0.0, 100.0), 0.5);
        assert_eq!(m.position_to_value(0.5, 0.0, 100.0), 25.0);
    }

    #[test]
    fn step_index_tie_goes_low() {
        assert_eq!(find_step_index(5.0, [0.0, 10.0]), 0);
        assert_eq!(find_step_index(6.0, [0.0, 10.0]), 1);
        assert_eq!(find_step_index(4.0, [1.0, 5.0, 9.0]), 1);
    }

    #[test]
    fn precision_limit_removes_drift() {
        assert_eq!(round_to_precision_limit(0.1 + 0.2, 12), 0.3);
        assert_eq!(round_to_precision_limit(123.456, 4), 123.5);
        assert_eq!(round_to_precision_limit(0.0, 12), 0.0);
    }

    #[test]
    fn modulo_within_precision() {
        assert!(is_modulo_within_precision_limit(30.0, 10.0, 12));
        assert!(!is_modulo_within_precision_limit(35.0, 10.0, 12));
        assert!(is_modulo_within_precision_limit(0.3, 0.1, 12));
    }
}
