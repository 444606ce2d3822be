//! Property tests for slider invariants.
//!
//! 1. Normalization is idempotent
//! 2. Normalized range pairs stay ordered, bounded and separated
//! 3. Normalized values sit on the step grid
//! 4. Value → position → value round-trips for the built-in scales
//! 5. Dragging never leaves the domain

use std::rc::Rc;

use floem_range_slider::{
    DragTarget, ImmediateScheduler, Layout, ModelValue, Options, PointerRole, SliderCore,
    ValueMapper, normalize,
};
use proptest::prelude::*;

// ── Strategies ───────────────────────────────────────────────────────

fn arb_step() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(2.0), Just(5.0), Just(0.5)]
}

fn arb_raw() -> impl Strategy<Value = f64> {
    -50.0..150.0_f64
}

/// Options on `[0, 100]` whose ranges and limits are whole numbers of steps.
///
/// `max_range` is never below `min_range`, and the limits leave at least
/// half the track open.
fn arb_options() -> impl Strategy<Value = Options> {
    (
        arb_step(),
        0..5_u32,
        prop::option::of(1..10_u32),
        prop::option::of(0..=5_u32),
        prop::option::of(0..=5_u32),
        any::<bool>(),
    )
        .prop_map(|(step, steps, max_steps, min_limit, max_limit, no_switching)| {
            let min_range = (steps > 0).then(|| step * steps as f64);
            Options {
                step: Some(step),
                min_range,
                max_range: max_steps.map(|k| min_range.unwrap_or(0.0) + step * k as f64),
                min_limit: min_limit.map(|k| step * k as f64),
                max_limit: max_limit.map(|k| 100.0 - step * k as f64),
                no_switching,
                ..Options::with_bounds(0.0, 100.0)
            }
        })
}

/// `[floor, ceil]` narrowed by the limits.
fn limit_bounds(options: &Options) -> (f64, f64) {
    (
        options.min_limit.unwrap_or(0.0).max(0.0),
        options.max_limit.unwrap_or(100.0).min(100.0),
    )
}

fn on_grid(value: f64, floor: f64, step: f64) -> bool {
    let steps = (value - floor) / step;
    (steps - steps.round()).abs() < 1e-9
}

// ── 1-3. Normalization ───────────────────────────────────────────────

proptest! {
    #[test]
    fn normalize_is_idempotent(options in arb_options(), low in arb_raw(), high in arb_raw()) {
        let effective = options.resolve().unwrap();
        let once = normalize(ModelValue::range(low, high), &effective);
        let twice = normalize(once, &effective);
        prop_assert_eq!(once, twice);

        let single = normalize(ModelValue::single(low), &effective);
        prop_assert_eq!(normalize(single, &effective), single);
    }

    #[test]
    fn range_pairs_hold_invariants(options in arb_options(), low in arb_raw(), high in arb_raw()) {
        let (lower, upper) = limit_bounds(&options);
        let effective = options.resolve().unwrap();
        let model = normalize(ModelValue::range(low, high), &effective);
        let high = model.high_value.unwrap();
        prop_assert!(lower <= model.value);
        prop_assert!(model.value <= high);
        prop_assert!(high <= upper);
        if let Some(min_range) = effective.min_range {
            prop_assert!(high - model.value >= min_range - 1e-9);
        }
        if let Some(max_range) = effective.max_range {
            prop_assert!(high - model.value <= max_range + 1e-9);
        }
    }

    #[test]
    fn single_values_stay_within_limits(options in arb_options(), raw in arb_raw()) {
        let (lower, upper) = limit_bounds(&options);
        let effective = options.resolve().unwrap();
        let model = normalize(ModelValue::single(raw), &effective);
        prop_assert!(lower <= model.value && model.value <= upper, "{} escaped", model.value);
        prop_assert_eq!(model.high_value, None);
    }

    #[test]
    fn values_snap_to_step(step in arb_step(), floor in -20..20_i32, raw in arb_raw()) {
        let floor = floor as f64;
        let options = Options {
            step: Some(step),
            ..Options::with_bounds(floor, floor + 100.0)
        };
        let effective = options.resolve().unwrap();
        let model = normalize(ModelValue::single(raw), &effective);
        prop_assert!(on_grid(model.value, floor, step), "{} not on grid", model.value);
    }
}

// ── 4. Scale round trips ─────────────────────────────────────────────

proptest! {
    #[test]
    fn linear_round_trip(floor in -1000.0..1000.0_f64, span in 1.0..1000.0_f64, t in 0.0..1.0_f64) {
        let ceil = floor + span;
        let value = floor + t * span;
        let mapper = ValueMapper::Linear;
        let position = mapper.value_to_position(value, floor, ceil);
        let back = mapper.position_to_value(position, floor, ceil);
        prop_assert!((back - value).abs() <= 1e-9 * span.max(value.abs()));
    }

    #[test]
    fn log_round_trip(floor in 0.01..100.0_f64, factor in 2.0..1000.0_f64, t in 0.0..1.0_f64) {
        let ceil = floor * factor;
        let value = floor + t * (ceil - floor);
        let mapper = ValueMapper::Logarithmic;
        let position = mapper.value_to_position(value, floor, ceil);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&position));
        let back = mapper.position_to_value(position, floor, ceil);
        prop_assert!((back - value).abs() <= 1e-9 * value);
    }
}

// ── 5. Drag bounds ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn drags_stay_in_domain(
        options in arb_options(),
        moves in prop::collection::vec(-40.0..160.0_f64, 1..20),
    ) {
        let mut slider = SliderCore::new(
            options,
            ModelValue::range(30.0, 70.0),
            Rc::new(ImmediateScheduler),
        )
        .unwrap();
        slider.set_layout(Layout::new(110.0, 10.0));
        slider.pointer_down(DragTarget::Handle(PointerRole::Min), 35.0, None);
        for offset in moves {
            slider.pointer_move(offset, None);
            let model = slider.model();
            let high = model.high_value.unwrap();
            prop_assert!(0.0 <= model.value && model.value <= high && high <= 100.0);
        }
        slider.pointer_up(None);
        prop_assert!(!slider.is_dragging());
    }
}
