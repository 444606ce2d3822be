//! Slider options and their resolved, immutable form.
//!
//! [`Options`] is what the host supplies (and can deserialize from JSON/TOML).
//! [`Options::resolve`] validates it and derives the flags and defaults the
//! rest of the crate reads, producing an [`EffectiveOptions`].

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::ConfigError;
use crate::math::{MappingFn, ValueMapper};

/// One entry of an explicit discrete domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepItem {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
}

impl StepItem {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            legend: None,
        }
    }

    pub fn with_legend(value: f64, legend: impl Into<String>) -> Self {
        Self {
            value,
            legend: Some(legend.into()),
        }
    }
}

/// Which label a display value is formatted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelType {
    Floor,
    Ceil,
    TickValue,
    Low,
    High,
}

pub type TranslateFn = Rc<dyn Fn(f64, LabelType) -> String>;
pub type CombineLabelsFn = Rc<dyn Fn(&str, &str) -> String>;
pub type LegendFn = Rc<dyn Fn(f64) -> Option<String>>;
pub type StepLegendFn = Rc<dyn Fn(&StepItem) -> Option<String>>;

/// Caller-supplied formatting and transform overrides.
#[derive(Clone, Default)]
pub struct Hooks {
    pub translate: Option<TranslateFn>,
    pub combine_labels: Option<CombineLabelsFn>,
    pub get_legend: Option<LegendFn>,
    pub get_step_legend: Option<StepLegendFn>,
    pub custom_value_to_position: Option<MappingFn>,
    pub custom_position_to_value: Option<MappingFn>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("translate", &self.translate.is_some())
            .field("combine_labels", &self.combine_labels.is_some())
            .field("get_legend", &self.get_legend.is_some())
            .field("get_step_legend", &self.get_step_legend.is_some())
            .field("custom_value_to_position", &self.custom_value_to_position.is_some())
            .field("custom_position_to_value", &self.custom_position_to_value.is_some())
            .finish()
    }
}

/// Slider configuration as supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub floor: Option<f64>,
    pub ceil: Option<f64>,
    pub step: Option<f64>,
    pub precision_limit: usize,
    pub min_range: Option<f64>,
    pub max_range: Option<f64>,
    pub push_range: bool,
    pub min_limit: Option<f64>,
    pub max_limit: Option<f64>,
    pub steps_array: Option<Vec<StepItem>>,
    pub bind_index_for_steps_array: bool,
    pub draggable_range: bool,
    pub draggable_range_only: bool,
    pub show_selection_bar: bool,
    pub show_selection_bar_end: bool,
    pub show_selection_bar_from_value: Option<f64>,
    pub hide_pointer_labels: bool,
    pub hide_limit_labels: bool,
    pub auto_hide_limit_labels: bool,
    pub bound_pointer_labels: bool,
    pub read_only: bool,
    pub disabled: bool,
    pub show_ticks: bool,
    pub show_ticks_values: bool,
    pub tick_step: Option<f64>,
    pub tick_value_step: Option<f64>,
    pub ticks_array: Option<Vec<f64>>,
    pub vertical: bool,
    /// Rotation of the whole slider in degrees; only affects key mapping.
    pub rotate: f64,
    pub keyboard_support: bool,
    pub only_bind_handles: bool,
    pub enforce_step: bool,
    pub enforce_range: bool,
    pub enforce_steps_array: bool,
    pub no_switching: bool,
    pub right_to_left: bool,
    pub reversed_controls: bool,
    pub log_scale: bool,
    #[serde(skip)]
    pub hooks: Hooks,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            floor: Some(0.0),
            ceil: None,
            step: Some(1.0),
            precision_limit: constants::DEFAULT_PRECISION_LIMIT,
            min_range: None,
            max_range: None,
            push_range: false,
            min_limit: None,
            max_limit: None,
            steps_array: None,
            bind_index_for_steps_array: false,
            draggable_range: false,
            draggable_range_only: false,
            show_selection_bar: false,
            show_selection_bar_end: false,
            show_selection_bar_from_value: None,
            hide_pointer_labels: false,
            hide_limit_labels: false,
            auto_hide_limit_labels: true,
            bound_pointer_labels: true,
            read_only: false,
            disabled: false,
            show_ticks: false,
            show_ticks_values: false,
            tick_step: None,
            tick_value_step: None,
            ticks_array: None,
            vertical: false,
            rotate: 0.0,
            keyboard_support: true,
            only_bind_handles: false,
            enforce_step: true,
            enforce_range: true,
            enforce_steps_array: true,
            no_switching: false,
            right_to_left: false,
            reversed_controls: false,
            log_scale: false,
            hooks: Hooks::default(),
        }
    }
}

impl Options {
    /// Linear `[floor, ceil]` domain with the default step.
    pub fn with_bounds(floor: f64, ceil: f64) -> Self {
        Self {
            floor: Some(floor),
            ceil: Some(ceil),
            ..Self::default()
        }
    }

    /// Discrete domain given by `steps`.
    pub fn with_steps(steps: Vec<StepItem>) -> Self {
        Self {
            steps_array: Some(steps),
            ..Self::default()
        }
    }

    /// Validate and derive the effective options.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn resolve(&self) -> Result<EffectiveOptions, ConfigError> {
        let (floor, ceil, step) = match &self.steps_array {
            Some(steps) => {
                if steps.is_empty() {
                    return Err(ConfigError::EmptyStepsArray);
                }
                (0.0, (steps.len() - 1) as f64, 1.0)
            }
            None => {
                let (Some(floor), Some(ceil)) = (self.floor, self.ceil) else {
                    return Err(ConfigError::MissingFloorOrCeil);
                };
                let step = match self.step {
                    Some(step) if step > 0.0 => step,
                    _ => 1.0,
                };
                (floor, ceil, step)
            }
        };
        if self.log_scale && floor == 0.0 {
            return Err(ConfigError::LogScaleWithZeroFloor);
        }

        let mapper = match (
            &self.hooks.custom_value_to_position,
            &self.hooks.custom_position_to_value,
        ) {
            (Some(to_position), Some(to_value)) => ValueMapper::Custom {
                to_position: to_position.clone(),
                to_value: to_value.clone(),
            },
            (to_position, to_value) => {
                let base = if self.log_scale {
                    ValueMapper::Logarithmic
                } else {
                    ValueMapper::Linear
                };
                if to_position.is_none() && to_value.is_none() {
                    base
                } else {
                    // One side overridden: the other falls back to the built-in transform.
                    let to_position = to_position.clone().unwrap_or_else(|| {
                        let base = base.clone();
                        let f: MappingFn = Rc::new(move |v, f, c| base.value_to_position(v, f, c));
                        f
                    });
                    let to_value = to_value.clone().unwrap_or_else(|| {
                        let f: MappingFn = Rc::new(move |p, f, c| base.position_to_value(p, f, c));
                        f
                    });
                    ValueMapper::Custom {
                        to_position,
                        to_value,
                    }
                }
            }
        };

        let show_ticks = self.show_ticks || self.show_ticks_values || self.ticks_array.is_some();
        let show_selection_bar = self.show_selection_bar
            || self.show_selection_bar_end
            || self.show_selection_bar_from_value.is_some();

        Ok(EffectiveOptions {
            floor,
            ceil,
            step,
            precision_limit: self.precision_limit,
            min_range: self.min_range,
            max_range: self.max_range,
            push_range: self.push_range,
            min_limit: self.min_limit,
            max_limit: self.max_limit,
            steps_array: self.steps_array.clone(),
            bind_index_for_steps_array: self.bind_index_for_steps_array,
            draggable_range: self.draggable_range || self.draggable_range_only,
            draggable_range_only: self.draggable_range_only,
            show_selection_bar,
            show_selection_bar_end: self.show_selection_bar_end,
            show_selection_bar_from_value: self.show_selection_bar_from_value,
            hide_pointer_labels: self.hide_pointer_labels,
            hide_limit_labels: self.hide_limit_labels,
            auto_hide_limit_labels: self.auto_hide_limit_labels,
            bound_pointer_labels: self.bound_pointer_labels,
            read_only: self.read_only,
            disabled: self.disabled,
            show_ticks,
            show_ticks_values: self.show_ticks_values,
            tick_step: self.tick_step.filter(|s| *s > 0.0),
            tick_value_step: self.tick_value_step.filter(|s| *s > 0.0),
            ticks_array: self.ticks_array.clone(),
            vertical: self.vertical,
            rotate: self.rotate,
            keyboard_support: self.keyboard_support,
            only_bind_handles: self.only_bind_handles,
            enforce_step: self.enforce_step,
            enforce_range: self.enforce_range,
            enforce_steps_array: self.enforce_steps_array,
            no_switching: self.no_switching,
            right_to_left: self.right_to_left,
            reversed_controls: self.reversed_controls,
            mapper,
            labels: LabelFormatter::resolve(
                &self.hooks,
                self.bind_index_for_steps_array,
                self.steps_array.as_deref(),
            ),
        })
    }
}

/// Options after validation and defaulting. Floor, ceil and step are in view
/// space: for a steps array they are `0`, `len - 1` and `1`.
#[derive(Debug, Clone)]
pub struct EffectiveOptions {
    pub floor: f64,
    pub ceil: f64,
    pub step: f64,
    pub precision_limit: usize,
    pub min_range: Option<f64>,
    pub max_range: Option<f64>,
    pub push_range: bool,
    pub min_limit: Option<f64>,
    pub max_limit: Option<f64>,
    pub steps_array: Option<Vec<StepItem>>,
    pub bind_index_for_steps_array: bool,
    pub draggable_range: bool,
    pub draggable_range_only: bool,
    pub show_selection_bar: bool,
    pub show_selection_bar_end: bool,
    pub show_selection_bar_from_value: Option<f64>,
    pub hide_pointer_labels: bool,
    pub hide_limit_labels: bool,
    pub auto_hide_limit_labels: bool,
    pub bound_pointer_labels: bool,
    pub read_only: bool,
    pub disabled: bool,
    pub show_ticks: bool,
    pub show_ticks_values: bool,
    pub tick_step: Option<f64>,
    pub tick_value_step: Option<f64>,
    pub ticks_array: Option<Vec<f64>>,
    pub vertical: bool,
    pub rotate: f64,
    pub keyboard_support: bool,
    pub only_bind_handles: bool,
    pub enforce_step: bool,
    pub enforce_range: bool,
    pub enforce_steps_array: bool,
    pub no_switching: bool,
    pub right_to_left: bool,
    pub reversed_controls: bool,
    pub mapper: ValueMapper,
    pub labels: LabelFormatter,
}

/// The option flags that decide which interactions are wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionFlags {
    pub disabled: bool,
    pub read_only: bool,
    pub draggable_range: bool,
    pub draggable_range_only: bool,
    pub keyboard_support: bool,
    pub only_bind_handles: bool,
}

impl EffectiveOptions {
    pub fn interaction_flags(&self) -> InteractionFlags {
        InteractionFlags {
            disabled: self.disabled,
            read_only: self.read_only,
            draggable_range: self.draggable_range,
            draggable_range_only: self.draggable_range_only,
            keyboard_support: self.keyboard_support,
            only_bind_handles: self.only_bind_handles,
        }
    }

    /// Model value stored at step index `index`, NaN when out of bounds.
    pub fn step_value(&self, index: f64) -> f64 {
        let Some(steps) = &self.steps_array else {
            return f64::NAN;
        };
        if index < 0.0 || index.is_nan() {
            return f64::NAN;
        }
        steps
            .get(index.round() as usize)
            .map_or(f64::NAN, |step| step.value)
    }

    /// True when view values are step indices rather than model values.
    pub fn uses_step_indices(&self) -> bool {
        self.steps_array.is_some() && !self.bind_index_for_steps_array
    }

    /// Vertical or rotated axes swap up/down in right-to-left mode.
    pub fn is_turned(&self) -> bool {
        self.vertical || self.rotate % 360.0 != 0.0
    }
}

/// Resolved label formatting hooks.
#[derive(Clone)]
pub struct LabelFormatter {
    translate: TranslateFn,
    combine: CombineLabelsFn,
    legend: Option<LegendFn>,
    step_legend: Option<StepLegendFn>,
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFormatter")
            .field("legend", &self.legend.is_some())
            .field("step_legend", &self.step_legend.is_some())
            .finish_non_exhaustive()
    }
}

impl LabelFormatter {
    fn resolve(hooks: &Hooks, bind_index: bool, steps: Option<&[StepItem]>) -> Self {
        let translate = hooks.translate.clone().unwrap_or_else(|| -> TranslateFn {
            match steps {
                Some(steps) if bind_index => {
                    let values: Vec<f64> = steps.iter().map(|s| s.value).collect();
                    Rc::new(move |index: f64, _: LabelType| {
                        let value = if index >= 0.0 {
                            values.get(index.round() as usize).copied()
                        } else {
                            None
                        };
                        value.map_or_else(String::new, |v| v.to_string())
                    })
                }
                _ => Rc::new(|value: f64, _: LabelType| value.to_string()),
            }
        });
        let combine = hooks.combine_labels.clone().unwrap_or_else(|| -> CombineLabelsFn {
            Rc::new(|low: &str, high: &str| format!("{low} - {high}"))
        });
        Self {
            translate,
            combine,
            legend: hooks.get_legend.clone(),
            step_legend: hooks.get_step_legend.clone(),
        }
    }

    pub fn translate(&self, value: f64, label: LabelType) -> String {
        (self.translate)(value, label)
    }

    pub fn combine(&self, low: &str, high: &str) -> String {
        (self.combine)(low, high)
    }

    pub fn legend(&self, value: f64) -> Option<String> {
        self.legend.as_ref().and_then(|legend| legend(value))
    }

    pub fn step_legend(&self, step: &StepItem) -> Option<String> {
        match &self.step_legend {
            Some(legend) => legend(step),
            None => step.legend.clone(),
        }
    }
}
