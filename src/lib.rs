//! # floem-range-slider
//!
//! A draggable single or dual-handle slider for [Floem](https://github.com/lapce/floem),
//! built on a headless core that can be driven without any UI.
//!
//! [`SliderCore`] owns the options, the model value, the pixel placement of
//! every element and the pointer/keyboard interaction state. Hosts feed it
//! events and paint from [`SliderCore::engine`]. The `view` feature adds
//! [`range_slider`], a ready-made Floem view.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use floem_range_slider::{ImmediateScheduler, ModelValue, Options, SliderCore, SliderEvent};
//!
//! let mut slider = SliderCore::new(
//!     Options::with_bounds(0.0, 100.0),
//!     ModelValue::range(20.0, 80.0),
//!     Rc::new(ImmediateScheduler),
//! )
//! .unwrap();
//! slider.subscribe(|event| {
//!     if let SliderEvent::ValueChange(model) = event {
//!         println!("{model:?}");
//!     }
//! });
//! slider.set_model_value(ModelValue::range(30.0, 70.0));
//! ```

mod channel;
mod constants;
mod drag;
mod error;
mod keyboard;
mod math;
mod model;
mod normalize;
mod options;
mod position;
#[cfg(feature = "view")]
mod range_slider;
mod scheduler;
mod slider;
mod track;

pub use channel::{InputChange, InputChannel, OutputChange, OutputChannel};
pub use drag::{DragTarget, DraggingState, TouchId};
pub use error::ConfigError;
pub use keyboard::{Key, key_target};
pub use math::{MappingFn, ValueMapper, find_step_index, round_to_precision_limit};
pub use model::{ChangeContext, ModelValue, PointerRole};
pub use normalize::{normalize, round_step};
pub use options::{
    CombineLabelsFn, EffectiveOptions, Hooks, InteractionFlags, LabelFormatter, LabelType,
    LegendFn, Options, StepItem, StepLegendFn, TranslateFn,
};
pub use position::{Element, Handle, Label, Layout, Placed, PositionEngine, Tick};
#[cfg(feature = "view")]
pub use range_slider::{RangeSlider, range_slider};
pub use scheduler::{ImmediateScheduler, QueueScheduler, Scheduler, Task};
pub use slider::{Listener, SliderCore, SliderEvent};
