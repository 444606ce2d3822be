//! Policy correction of model values.
//!
//! Out-of-policy values are never rejected: they are snapped, clamped and
//! reordered here, and the slider republishes the corrected pair.
//! `normalize` is idempotent as long as limits and ranges sit on the step grid.

use crate::math::{clamp_to_range, find_step_index, round_to_precision_limit};
use crate::model::ModelValue;
use crate::options::EffectiveOptions;

/// Round `value` to the nearest multiple of `step` measured from `floor`.
pub fn round_step(value: f64, floor: f64, step: f64, precision_limit: usize) -> f64 {
    let stepped =
        round_to_precision_limit(((value - floor) / step).round() * step, precision_limit);
    round_to_precision_limit(floor + stepped, precision_limit)
}

/// Correct a raw `(value, high_value)` pair against `options`.
pub fn normalize(input: ModelValue, options: &EffectiveOptions) -> ModelValue {
    if let Some(steps) = &options.steps_array {
        if !options.enforce_steps_array {
            return input;
        }
        let snap = |value: f64| {
            if options.bind_index_for_steps_array {
                clamp_to_range(value.round(), options.floor, options.ceil)
            } else {
                steps[find_step_index(value, steps.iter().map(|s| s.value))].value
            }
        };
        return ModelValue {
            value: snap(input.value),
            high_value: input.high_value.map(snap),
        };
    }

    let precision = options.precision_limit;
    let correct = |value: f64| {
        let mut value = value;
        if options.enforce_step {
            value = round_step(value, options.floor, options.step, precision);
        }
        if options.enforce_range {
            value = clamp_to_range(value, options.floor, options.ceil);
        }
        value
    };

    let mut low = correct(input.value);
    let Some(raw_high) = input.high_value else {
        if options.enforce_range {
            let (lower, upper) = limit_bounds(options);
            low = clamp_to_range(low, lower, upper);
        }
        return ModelValue::single(round_to_precision_limit(low, precision));
    };
    let mut high = correct(raw_high);

    if low > high {
        if options.no_switching {
            low = high;
        } else {
            // Swapping the raw pair and correcting again equals swapping the corrected pair.
            std::mem::swap(&mut low, &mut high);
        }
    }

    if options.enforce_range {
        (low, high) = enforce_limits_and_ranges(low, high, options);
    }

    ModelValue::range(
        round_to_precision_limit(low, precision),
        round_to_precision_limit(high, precision),
    )
}

/// `[floor, ceil]` narrowed by `min_limit` and `max_limit`.
fn limit_bounds(options: &EffectiveOptions) -> (f64, f64) {
    let lower = options.min_limit.map_or(options.floor, |l| l.max(options.floor));
    let upper = options.max_limit.map_or(options.ceil, |l| l.min(options.ceil));
    (lower, upper)
}

fn enforce_limits_and_ranges(low: f64, high: f64, options: &EffectiveOptions) -> (f64, f64) {
    let precision = options.precision_limit;
    let (lower, upper) = limit_bounds(options);
    let mut low = clamp_to_range(low, lower, upper);
    let mut high = clamp_to_range(high, lower, upper);
    let gap = |low: f64, high: f64| round_to_precision_limit(high - low, precision);

    if let Some(min_range) = options.min_range {
        if gap(low, high) < min_range {
            high = round_to_precision_limit((low + min_range).min(upper), precision);
            low = round_to_precision_limit((high - min_range).max(lower), precision);
        }
    }
    if let Some(max_range) = options.max_range {
        if gap(low, high) > max_range {
            high = round_to_precision_limit(low + max_range, precision);
        }
    }
    (low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Options, StepItem};

    fn eff(options: Options) -> EffectiveOptions {
        options.resolve().unwrap()
    }

    #[test]
    fn snaps_to_steps_array() {
        let options = eff(Options::with_steps(vec![
            StepItem::new(1.0),
            StepItem::new(5.0),
            StepItem::new(9.0),
        ]));
        assert_eq!(normalize(ModelValue::single(4.0), &options).value, 5.0);
        assert_eq!(
            normalize(ModelValue::range(100.0, -3.0), &options),
            ModelValue::range(9.0, 1.0)
        );
    }

    #[test]
    fn bound_index_is_rounded_and_clamped() {
        let options = eff(Options {
            bind_index_for_steps_array: true,
            ..Options::with_steps(vec![StepItem::new(1.0), StepItem::new(5.0)])
        });
        assert_eq!(normalize(ModelValue::single(7.3), &options).value, 1.0);
        assert_eq!(normalize(ModelValue::single(0.4), &options).value, 0.0);
    }

    #[test]
    fn steps_and_clamps() {
        let options = eff(Options {
            step: Some(5.0),
            ..Options::with_bounds(0.0, 100.0)
        });
        assert_eq!(normalize(ModelValue::single(12.0), &options).value, 10.0);
        assert_eq!(normalize(ModelValue::single(130.0), &options).value, 100.0);
        assert_eq!(normalize(ModelValue::single(-4.0), &options).value, 0.0);
    }

    #[test]
    fn step_measured_from_floor() {
        let options = eff(Options {
            step: Some(10.0),
            ..Options::with_bounds(3.0, 103.0)
        });
        assert_eq!(normalize(ModelValue::single(40.0), &options).value, 43.0);
    }

    #[test]
    fn decimal_steps_do_not_drift() {
        let options = eff(Options {
            step: Some(0.1),
            ..Options::with_bounds(0.0, 1.0)
        });
        assert_eq!(normalize(ModelValue::single(0.30000000000000004), &options).value, 0.3);
    }

    #[test]
    fn inverted_pair_is_swapped() {
        let options = eff(Options::with_bounds(0.0, 100.0));
        assert_eq!(
            normalize(ModelValue::range(70.0, 20.0), &options),
            ModelValue::range(20.0, 70.0)
        );
    }

    #[test]
    fn inverted_pair_collapses_without_switching() {
        let options = eff(Options {
            no_switching: true,
            ..Options::with_bounds(0.0, 100.0)
        });
        assert_eq!(
            normalize(ModelValue::range(70.0, 20.0), &options),
            ModelValue::range(20.0, 20.0)
        );
    }

    #[test]
    fn min_range_widens_pair() {
        let options = eff(Options {
            min_range: Some(10.0),
            ..Options::with_bounds(0.0, 100.0)
        });
        assert_eq!(
            normalize(ModelValue::range(45.0, 50.0), &options),
            ModelValue::range(45.0, 55.0)
        );
        // No room above: the low end gives way.
        assert_eq!(
            normalize(ModelValue::range(98.0, 100.0), &options),
            ModelValue::range(90.0, 100.0)
        );
    }

    #[test]
    fn max_range_narrows_pair() {
        let options = eff(Options {
            max_range: Some(20.0),
            ..Options::with_bounds(0.0, 100.0)
        });
        assert_eq!(
            normalize(ModelValue::range(10.0, 90.0), &options),
            ModelValue::range(10.0, 30.0)
        );
    }

    #[test]
    fn limits_narrow_the_domain() {
        let options = eff(Options {
            min_limit: Some(10.0),
            max_limit: Some(80.0),
            ..Options::with_bounds(0.0, 100.0)
        });
        assert_eq!(
            normalize(ModelValue::range(0.0, 100.0), &options),
            ModelValue::range(10.0, 80.0)
        );
    }

    #[test]
    fn limits_narrow_single_values() {
        let options = eff(Options {
            min_limit: Some(10.0),
            max_limit: Some(80.0),
            ..Options::with_bounds(0.0, 100.0)
        });
        assert_eq!(normalize(ModelValue::single(5.0), &options), ModelValue::single(10.0));
        assert_eq!(normalize(ModelValue::single(95.0), &options), ModelValue::single(80.0));
        assert_eq!(normalize(ModelValue::single(40.0), &options), ModelValue::single(40.0));
    }

    #[test]
    fn nothing_enforced() {
        let options = eff(Options {
            enforce_step: false,
            enforce_range: false,
            ..Options::with_bounds(0.0, 10.0)
        });
        assert_eq!(normalize(ModelValue::single(12.34), &options).value, 12.34);
    }

    #[test]
    fn idempotent_on_sample() {
        let options = eff(Options {
            min_range: Some(4.0),
            step: Some(2.0),
            ..Options::with_bounds(0.0, 50.0)
        });
        let once = normalize(ModelValue::range(33.0, 7.0), &options);
        assert_eq!(normalize(once, &options), once);
    }
}
