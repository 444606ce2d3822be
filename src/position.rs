//! Pixel placement of handles, labels, the selection bar and ticks.
//!
//! All positions are measured in pixels along the slider axis from its
//! origin. In right-to-left mode the origin holds the ceil value.

use crate::constants;
use crate::math::{clamp_to_range, is_modulo_within_precision_limit, round_to_precision_limit};
use crate::options::{EffectiveOptions, LabelType};

/// Track geometry supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub track_length: f64,
    pub handle_length: f64,
    pub label_char_width: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            track_length: 0.0,
            handle_length: 0.0,
            label_char_width: constants::LABEL_CHAR_WIDTH,
        }
    }
}

impl Layout {
    pub fn new(track_length: f64, handle_length: f64) -> Self {
        Self {
            track_length,
            handle_length,
            ..Self::default()
        }
    }

    /// Furthest position a handle's leading edge can reach.
    pub fn max_handle_position(&self) -> f64 {
        (self.track_length - self.handle_length).max(0.0)
    }

    pub fn handle_half(&self) -> f64 {
        self.handle_length / 2.0
    }

    fn measure(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.label_char_width
    }
}

/// Position, extent and visibility of one element on the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub position: f64,
    pub dimension: f64,
    pub visible: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            position: 0.0,
            dimension: 0.0,
            visible: true,
        }
    }
}

/// Shared behavior of everything placed on the axis.
pub trait Placed {
    fn element(&self) -> &Element;
    fn element_mut(&mut self) -> &mut Element;

    fn position(&self) -> f64 {
        self.element().position
    }

    fn dimension(&self) -> f64 {
        self.element().dimension
    }

    fn end(&self) -> f64 {
        self.position() + self.dimension()
    }

    fn is_visible(&self) -> bool {
        self.element().visible
    }

    fn set_position(&mut self, position: f64) {
        self.element_mut().position = position;
    }

    fn set_visible(&mut self, visible: bool) {
        self.element_mut().visible = visible;
    }
}

impl Placed for Element {
    fn element(&self) -> &Element {
        self
    }

    fn element_mut(&mut self) -> &mut Element {
        self
    }
}

/// A draggable handle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Handle {
    pub element: Element,
    pub active: bool,
}

impl Placed for Handle {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

/// A text label; its dimension follows its text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    pub element: Element,
    pub text: String,
}

impl Label {
    fn set_text(&mut self, text: String, layout: &Layout) {
        self.element.dimension = layout.measure(&text);
        self.text = text;
    }
}

impl Placed for Label {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

/// A marked position on the track.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// View value of the tick.
    pub value: f64,
    pub position: f64,
    pub selected: bool,
    pub display: Option<String>,
    pub legend: Option<String>,
}

/// Placement state for every element of the slider.
#[derive(Debug, Clone, Default)]
pub struct PositionEngine {
    layout: Layout,
    pub min_handle: Handle,
    pub max_handle: Handle,
    pub min_label: Label,
    pub max_label: Label,
    pub combined_label: Label,
    pub floor_label: Label,
    pub ceil_label: Label,
    pub selection_bar: Element,
}

impl PositionEngine {
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn max_handle_position(&self) -> f64 {
        self.layout.max_handle_position()
    }

    /// View value → handle position in pixels.
    pub fn value_to_position(&self, options: &EffectiveOptions, value: f64) -> f64 {
        let value = clamp_to_range(value, options.floor, options.ceil);
        let mut percent = options
            .mapper
            .value_to_position(value, options.floor, options.ceil);
        if options.right_to_left {
            percent = 1.0 - percent;
        }
        percent * self.max_handle_position()
    }

    /// Handle position in pixels → view value.
    pub fn position_to_value(&self, options: &EffectiveOptions, position: f64) -> f64 {
        let max = self.max_handle_position();
        let mut percent = if max > 0.0 { position / max } else { 0.0 };
        if options.right_to_left {
            percent = 1.0 - percent;
        }
        options
            .mapper
            .position_to_value(percent, options.floor, options.ceil)
    }

    /// Display text for a view value.
    pub fn display_value(options: &EffectiveOptions, value: f64, label: LabelType) -> String {
        let value = if options.uses_step_indices() {
            options.step_value(value)
        } else {
            value
        };
        options.labels.translate(value, label)
    }

    /// Recompute every element for the given view values.
    pub fn update(&mut self, options: &EffectiveOptions, low: f64, high: Option<f64>) {
        let layout = self.layout;
        self.update_limit_labels(options);

        let low_position = self.value_to_position(options, low);
        self.min_handle.set_position(low_position);
        self.min_handle.element.dimension = layout.handle_length;
        self.min_label
            .set_text(Self::display_value(options, low, LabelType::Low), &layout);
        let pos = self.handle_label_position(
            options,
            LabelType::Low,
            self.min_label.dimension(),
            low_position,
        );
        self.min_label.set_position(pos);
        self.min_label.set_visible(true);

        match high {
            Some(high) => {
                let high_position = self.value_to_position(options, high);
                self.max_handle.set_position(high_position);
                self.max_handle.element.dimension = layout.handle_length;
                self.max_handle.set_visible(true);
                self.max_label
                    .set_text(Self::display_value(options, high, LabelType::High), &layout);
                let pos = self.handle_label_position(
                    options,
                    LabelType::High,
                    self.max_label.dimension(),
                    high_position,
                );
                self.max_label.set_position(pos);
                self.max_label.set_visible(true);
            }
            None => {
                self.max_handle.set_visible(false);
                self.max_label.set_visible(false);
            }
        }

        self.update_selection_bar(options, low, high.is_some());

        if let Some(high) = high {
            self.update_combined_label(options, low, high);
        } else {
            self.combined_label.set_visible(false);
        }

        if options.hide_pointer_labels {
            self.min_label.set_visible(false);
            self.max_label.set_visible(false);
            self.combined_label.set_visible(false);
        } else if options.auto_hide_limit_labels && !options.hide_limit_labels {
            self.update_limit_labels_visibility(options, high.is_some());
        }
    }

    fn update_limit_labels(&mut self, options: &EffectiveOptions) {
        let layout = self.layout;
        self.floor_label
            .set_text(Self::display_value(options, options.floor, LabelType::Floor), &layout);
        self.ceil_label
            .set_text(Self::display_value(options, options.ceil, LabelType::Ceil), &layout);
        let (floor_position, ceil_position) = if options.right_to_left {
            (layout.track_length - self.floor_label.dimension(), 0.0)
        } else {
            (0.0, layout.track_length - self.ceil_label.dimension())
        };
        self.floor_label.set_position(floor_position);
        self.ceil_label.set_position(ceil_position);
        self.floor_label.set_visible(!options.hide_limit_labels);
        self.ceil_label.set_visible(!options.hide_limit_labels);
    }

    fn handle_label_position(
        &self,
        options: &EffectiveOptions,
        label: LabelType,
        dimension: f64,
        handle_position: f64,
    ) -> f64 {
        let near_handle = handle_position - dimension / 2.0 + self.layout.handle_half();
        let end_of_bar = self.layout.track_length - dimension;
        if !options.bound_pointer_labels {
            return near_handle;
        }
        let trailing = match label {
            LabelType::Low => options.right_to_left,
            _ => !options.right_to_left,
        };
        if trailing {
            near_handle.min(end_of_bar)
        } else {
            near_handle.max(0.0).min(end_of_bar)
        }
    }

    fn update_selection_bar(&mut self, options: &EffectiveOptions, low: f64, range: bool) {
        let half = self.layout.handle_half();
        let min_position = self.min_handle.position();
        let from_end = if options.right_to_left {
            !options.show_selection_bar_end
        } else {
            options.show_selection_bar_end
        };

        let (position, dimension) = if range {
            let max_position = self.max_handle.position();
            let start = if options.right_to_left { max_position } else { min_position };
            (start + half, (max_position - min_position).abs())
        } else if let Some(center) = options.show_selection_bar_from_value {
            let center_position = self.value_to_position(options, center);
            let past_center = if options.right_to_left {
                low <= center
            } else {
                low > center
            };
            if past_center {
                (center_position + half, min_position - center_position)
            } else {
                (min_position + half, center_position - min_position)
            }
        } else if from_end {
            (
                min_position + half,
                (self.max_handle_position() - min_position).abs() + half,
            )
        } else {
            (0.0, min_position + half)
        };

        self.selection_bar.position = position;
        self.selection_bar.dimension = dimension;
        self.selection_bar.visible = range || options.show_selection_bar;
    }

    fn update_combined_label(&mut self, options: &EffectiveOptions, low: f64, high: f64) {
        let overlap = if options.right_to_left {
            self.min_label.position() - constants::COMBINED_LABEL_GAP <= self.max_label.end()
        } else {
            self.min_label.end() + constants::COMBINED_LABEL_GAP >= self.max_label.position()
        };

        if !overlap {
            self.combined_label.set_visible(false);
            return;
        }

        let low_text = Self::display_value(options, low, LabelType::Low);
        let high_text = Self::display_value(options, high, LabelType::High);
        let text = if options.right_to_left {
            options.labels.combine(&high_text, &low_text)
        } else {
            options.labels.combine(&low_text, &high_text)
        };
        self.combined_label.set_text(text, &self.layout);

        let dimension = self.combined_label.dimension();
        let centered =
            self.selection_bar.position + self.selection_bar.dimension / 2.0 - dimension / 2.0;
        let position = if options.bound_pointer_labels {
            centered.max(0.0).min(self.layout.track_length - dimension)
        } else {
            centered
        };
        self.combined_label.set_position(position);
        self.combined_label.set_visible(true);
        self.min_label.set_visible(false);
        self.max_label.set_visible(false);
    }

    fn update_limit_labels_visibility(&mut self, options: &EffectiveOptions, range: bool) {
        let candidates: Vec<&Label> = if range && self.combined_label.is_visible() {
            vec![&self.combined_label]
        } else if range {
            vec![&self.min_label, &self.max_label]
        } else {
            vec![&self.min_label]
        };
        let rtl = options.right_to_left;
        let floor = &self.floor_label;
        let ceil = &self.ceil_label;
        let gap = constants::LIMIT_LABEL_GAP;

        let near_floor = candidates.iter().any(|label| {
            if rtl {
                label.end() >= floor.position() - gap
            } else {
                label.position() <= floor.end() + gap
            }
        });
        let near_ceil = candidates.iter().any(|label| {
            if rtl {
                label.position() <= ceil.end() + gap
            } else {
                label.end() >= ceil.position() - gap
            }
        });

        self.floor_label.set_visible(!near_floor);
        self.ceil_label.set_visible(!near_ceil);
    }

    /// Ticks for the current options, built on demand.
    pub fn ticks(&self, options: &EffectiveOptions, low: f64, high: Option<f64>) -> Vec<Tick> {
        if !options.show_ticks {
            return Vec::new();
        }
        let mut values = options
            .ticks_array
            .clone()
            .unwrap_or_else(|| tick_values(options));
        if options.right_to_left {
            values.reverse();
        }

        values
            .into_iter()
            .filter(|value| *value >= options.floor && *value <= options.ceil)
            .map(|value| {
                let display = (options.show_ticks_values
                    && options.tick_value_step.is_none_or(|step| {
                        is_modulo_within_precision_limit(value, step, options.precision_limit)
                    }))
                .then(|| Self::display_value(options, value, LabelType::TickValue));
                let legend = match &options.steps_array {
                    Some(steps) if value >= 0.0 => steps
                        .get(value.round() as usize)
                        .and_then(|step| options.labels.step_legend(step)),
                    Some(_) => None,
                    None => options.labels.legend(value),
                };
                Tick {
                    value,
                    position: self.value_to_position(options, value),
                    selected: is_tick_selected(options, value, low, high),
                    display,
                    legend,
                }
            })
            .collect()
    }
}

/// Evenly spaced tick values from floor.
fn tick_values(options: &EffectiveOptions) -> Vec<f64> {
    let step = options.tick_step.unwrap_or(options.step);
    let precision = options.precision_limit;
    let count = 1.0
        + round_to_precision_limit((options.ceil - options.floor).abs() / step, precision).floor();
    (0..count as usize)
        .map(|index| round_to_precision_limit(options.floor + step * index as f64, precision))
        .collect()
}

fn is_tick_selected(options: &EffectiveOptions, value: f64, low: f64, high: Option<f64>) -> bool {
    if let Some(high) = high {
        return value >= low && value <= high;
    }
    if let Some(center) = options.show_selection_bar_from_value {
        (low > center && value >= center && value <= low)
            || (low < center && value <= center && value >= low)
    } else if options.show_selection_bar_end {
        value >= low
    } else {
        options.show_selection_bar && value <= low
    }
}
