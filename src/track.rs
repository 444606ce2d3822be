//! View-side state shared by the drag and keyboard controllers.

use crate::math::{find_step_index, round_to_precision_limit};
use crate::model::{ModelValue, PointerRole};
use crate::normalize::round_step;
use crate::options::EffectiveOptions;
use crate::position::{Placed, PositionEngine};

/// View values, the tracked handle, and the element placement derived from them.
#[derive(Debug, Clone)]
pub struct TrackState {
    pub options: EffectiveOptions,
    pub low: f64,
    pub high: Option<f64>,
    pub tracking: Option<PointerRole>,
    pub engine: PositionEngine,
}

impl TrackState {
    pub fn new(options: EffectiveOptions) -> Self {
        Self {
            low: options.floor,
            high: None,
            tracking: None,
            engine: PositionEngine::default(),
            options,
        }
    }

    pub fn is_range(&self) -> bool {
        self.high.is_some()
    }

    /// Recompute element placement from the current view values.
    pub fn refresh(&mut self) {
        self.engine.update(&self.options, self.low, self.high);
    }

    pub fn model_to_view(&self, value: f64) -> f64 {
        match &self.options.steps_array {
            Some(steps) if !self.options.bind_index_for_steps_array => {
                find_step_index(value, steps.iter().map(|s| s.value)) as f64
            }
            _ => value,
        }
    }

    pub fn view_to_model(&self, value: f64) -> f64 {
        if self.options.uses_step_indices() {
            self.options.step_value(value)
        } else {
            value
        }
    }

    /// Rebuild view values from a model pair.
    pub fn set_model(&mut self, model: ModelValue) {
        self.low = self.model_to_view(model.value);
        self.high = model.high_value.map(|high| self.model_to_view(high));
        self.refresh();
    }

    pub fn model(&self) -> ModelValue {
        ModelValue {
            value: self.view_to_model(self.low),
            high_value: self.high.map(|high| self.view_to_model(high)),
        }
    }

    pub fn value_of(&self, role: PointerRole) -> f64 {
        match role {
            PointerRole::Min => self.low,
            PointerRole::Max => self.high.unwrap_or(self.low),
        }
    }

    /// Writes to `Max` are dropped in single mode.
    pub fn set_value_of(&mut self, role: PointerRole, value: f64) {
        match role {
            PointerRole::Min => self.low = value,
            PointerRole::Max => {
                if let Some(high) = self.high.as_mut() {
                    *high = value;
                }
            }
        }
    }

    pub fn handle_position(&self, role: PointerRole) -> f64 {
        match role {
            PointerRole::Min => self.engine.min_handle.position(),
            PointerRole::Max => self.engine.max_handle.position(),
        }
    }

    /// Change the tracked handle and its active flag.
    pub fn set_tracking(&mut self, role: Option<PointerRole>) {
        self.tracking = role;
        self.engine.min_handle.active = role == Some(PointerRole::Min);
        self.engine.max_handle.active = role == Some(PointerRole::Max);
    }

    pub fn position_to_value(&self, position: f64) -> f64 {
        self.engine.position_to_value(&self.options, position)
    }

    pub fn round_step(&self, value: f64) -> f64 {
        self.round_to(value, self.options.step)
    }

    pub fn round_to(&self, value: f64, step: f64) -> f64 {
        round_step(value, self.options.floor, step, self.options.precision_limit)
    }

    pub fn round_precision(&self, value: f64) -> f64 {
        round_to_precision_limit(value, self.options.precision_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Options, StepItem};

    #[test]
    fn step_indices_round_trip() {
        let options = Options::with_steps(vec![
            StepItem::new(1.0),
            StepItem::new(5.0),
            StepItem::new(9.0),
        ])
        .resolve()
        .unwrap();
        let mut track = TrackState::new(options);
        track.set_model(ModelValue::range(5.0, 9.0));
        assert_eq!((track.low, track.high), (1.0, Some(2.0)));
        assert_eq!(track.model(), ModelValue::range(5.0, 9.0));
    }

    #[test]
    fn tracking_marks_active_handle() {
        let options = Options::with_bounds(0.0, 10.0).resolve().unwrap();
        let mut track = TrackState::new(options);
        track.set_tracking(Some(PointerRole::Max));
        assert!(track.engine.max_handle.active);
        assert!(!track.engine.min_handle.active);
        track.set_tracking(None);
        assert!(!track.engine.max_handle.active);
    }

    #[test]
    fn max_writes_need_range_mode() {
        let options = Options::with_bounds(0.0, 10.0).resolve().unwrap();
        let mut track = TrackState::new(options);
        track.set_model(ModelValue::single(4.0));
        track.set_value_of(PointerRole::Max, 8.0);
        assert!(!track.is_range());
        assert_eq!(track.model(), ModelValue::single(4.0));

        track.set_model(ModelValue::range(4.0, 6.0));
        track.set_value_of(PointerRole::Max, 8.0);
        assert_eq!(track.high, Some(8.0));
    }
}
