//! Floem view hosting a [`SliderCore`].
//!
//! The view feeds pointer, focus and key events to the core, reports the
//! track geometry on layout and paints the track, selection bar, ticks and
//! handles from the core's placement state.

use std::rc::Rc;
use std::time::Duration;

use floem::keyboard::{Key as KeyCode, NamedKey};
use floem::kurbo::{Circle, Point, Rect, Stroke};
use floem::peniko::Color;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, create_effect};
use floem::views::Decorators;
use floem::{
    View, ViewId,
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
};
use floem_renderer::Renderer;
use tracing::trace;

use crate::constants;
use crate::drag::DragTarget;
use crate::error::ConfigError;
use crate::keyboard::Key;
use crate::model::{ModelValue, PointerRole};
use crate::options::Options;
use crate::position::{Layout, Placed};
use crate::scheduler::{Scheduler, Task};
use crate::slider::{SliderCore, SliderEvent};

fn accent() -> Color {
    Color::rgb8(59, 130, 246)
}

/// Delivers deferred changes on the next turn of the Floem event loop.
struct FloemScheduler;

impl Scheduler for FloemScheduler {
    fn schedule(&self, task: Task) {
        floem::action::exec_after(Duration::ZERO, move |_| task());
    }
}

enum SliderUpdate {
    Model(ModelValue),
}

pub struct RangeSlider {
    id: ViewId,
    core: SliderCore,
    size: floem::taffy::prelude::Size<f32>,
    /// Handle that receives keyboard focus.
    focus_role: PointerRole,
}

/// Creates a slider bound to `value`.
///
/// A `value` with a `high_value` makes it a range slider. User edits are
/// written back to the signal; external writes are normalized and applied.
pub fn range_slider(
    options: Options,
    value: RwSignal<ModelValue>,
) -> Result<RangeSlider, ConfigError> {
    let id = ViewId::new();
    let vertical = options.vertical;
    let core = SliderCore::new(options, value.get_untracked(), Rc::new(FloemScheduler))?;

    core.subscribe(move |event| {
        if let SliderEvent::ValueChange(model) = event {
            value.set(*model);
        }
    });

    create_effect(move |_| {
        let model = value.get();
        id.update_state(SliderUpdate::Model(model));
    });

    Ok(RangeSlider {
        id,
        core,
        size: Default::default(),
        focus_role: PointerRole::Min,
    }
    .keyboard_navigable()
    .style(move |s| {
        let s = if vertical {
            s.width(constants::SLIDER_HEIGHT)
        } else {
            s.height(constants::SLIDER_HEIGHT)
        };
        s.cursor(floem::style::CursorStyle::Pointer)
    }))
}

impl RangeSlider {
    /// Access the core, e.g. to subscribe to user change events.
    pub fn core(&self) -> &SliderCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut SliderCore {
        &mut self.core
    }

    fn vertical(&self) -> bool {
        self.core.effective_options().vertical
    }

    fn axis_length(&self) -> f64 {
        if self.vertical() {
            self.size.height as f64
        } else {
            self.size.width as f64
        }
    }

    fn cross_center(&self) -> f64 {
        if self.vertical() {
            self.size.width as f64 / 2.0
        } else {
            self.size.height as f64 / 2.0
        }
    }

    /// Offset along the axis from its origin; vertical sliders grow upwards.
    fn axis_offset(&self, point: Point) -> f64 {
        if self.vertical() {
            self.axis_length() - point.y
        } else {
            point.x
        }
    }

    fn point_at(&self, offset: f64) -> Point {
        if self.vertical() {
            Point::new(self.cross_center(), self.axis_length() - offset)
        } else {
            Point::new(offset, self.cross_center())
        }
    }

    /// Rectangle covering `[start, end]` along the axis, `thickness` across it.
    fn span_rect(&self, start: f64, end: f64, thickness: f64) -> Rect {
        let (a, b) = (self.point_at(start), self.point_at(end));
        let half = thickness / 2.0;
        if self.vertical() {
            Rect::new(a.x - half, b.y.min(a.y), a.x + half, b.y.max(a.y))
        } else {
            Rect::new(a.x, a.y - half, b.x, a.y + half)
        }
    }

    fn hit_test(&self, offset: f64) -> DragTarget {
        let engine = self.core.engine();
        let radius = constants::THUMB_RADIUS;
        let on_handle = |position: f64| (offset - (position + radius)).abs() <= radius;

        // The tracked handle wins when both sit under the pointer.
        let mut roles = vec![PointerRole::Min];
        if self.core.is_range() {
            roles.insert(0, PointerRole::Max);
            if self.core.tracking() == Some(PointerRole::Min) {
                roles.reverse();
            }
        }
        for role in roles {
            let handle = match role {
                PointerRole::Min => &engine.min_handle,
                PointerRole::Max => &engine.max_handle,
            };
            if on_handle(handle.position()) {
                return DragTarget::Handle(role);
            }
        }

        let bar = &engine.selection_bar;
        if bar.is_visible() && offset >= bar.position() && offset <= bar.end() {
            return DragTarget::SelectionBar;
        }
        if self.core.effective_options().show_ticks {
            let near_tick = self.core.ticks().iter().any(|tick| {
                (offset - (tick.position + radius)).abs() <= constants::TICK_RADIUS * 2.0
            });
            if near_tick {
                return DragTarget::Tick;
            }
        }
        DragTarget::FullBar
    }

    fn paint_handle(&self, cx: &mut PaintCx, position: f64, active: bool) {
        let radius = constants::THUMB_RADIUS;
        let center = self.point_at(position + radius);
        cx.fill(&Circle::new(center, radius), Color::WHITE, 0.0);
        cx.stroke(
            &Circle::new(center, radius),
            Color::rgba8(0, 0, 0, 80),
            &Stroke::new(1.0),
        );
        let ring = if active { accent() } else { Color::rgba8(0, 0, 0, 40) };
        cx.stroke(&Circle::new(center, radius - 3.0), ring, &Stroke::new(2.0));
    }
}

fn map_key(key: &KeyCode) -> Option<Key> {
    let KeyCode::Named(named) = key else {
        return None;
    };
    Some(match named {
        NamedKey::ArrowUp => Key::Up,
        NamedKey::ArrowDown => Key::Down,
        NamedKey::ArrowLeft => Key::Left,
        NamedKey::ArrowRight => Key::Right,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        _ => return None,
    })
}

impl View for RangeSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<SliderUpdate>() {
            match *update {
                SliderUpdate::Model(model) => self.core.set_model_value(model),
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                let offset = self.axis_offset(e.pos);
                let target = self.hit_test(offset);
                if let DragTarget::Handle(role) = target {
                    self.focus_role = role;
                }
                if self.core.pointer_down(target, offset, None) {
                    cx.update_active(self.id());
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerMove(e) => {
                let offset = self.axis_offset(e.pos);
                if self.core.pointer_move(offset, None) {
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) => {
                if self.core.pointer_up(None) {
                    if let Some(role) = self.core.tracking() {
                        self.focus_role = role;
                    }
                    self.id.request_layout();
                }
                EventPropagation::Continue
            }
            Event::FocusGained => {
                let role = if self.core.is_range() {
                    self.focus_role
                } else {
                    PointerRole::Min
                };
                self.core.focus(role);
                self.id.request_paint();
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.core.blur();
                self.id.request_paint();
                EventPropagation::Continue
            }
            Event::KeyDown(ke) => match map_key(&ke.key.logical_key) {
                Some(key) if self.core.key_down(key) => {
                    trace!(?key, "slider key");
                    if let Some(role) = self.core.tracking() {
                        self.focus_role = role;
                    }
                    self.id.request_layout();
                    EventPropagation::Stop
                }
                _ => EventPropagation::Continue,
            },
            Event::KeyUp(_) => {
                self.core.key_up();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        self.core.set_layout(Layout::new(
            self.axis_length(),
            constants::THUMB_RADIUS * 2.0,
        ));
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let length = self.axis_length();
        if length == 0.0 {
            return;
        }
        let radius = constants::THUMB_RADIUS;
        let thickness = constants::TRACK_THICKNESS;
        let inactive = {
            let options = self.core.effective_options();
            options.disabled || options.read_only
        };

        let track = self.span_rect(radius, length - radius, thickness);
        cx.fill(
            &track.to_rounded_rect(thickness / 2.0),
            Color::rgba8(0, 0, 0, 40),
            0.0,
        );

        let engine = self.core.engine();
        let bar = &engine.selection_bar;
        if bar.is_visible() && bar.dimension() > 0.0 {
            let rect = self.span_rect(bar.position(), bar.end(), thickness);
            let color = if inactive {
                Color::rgb8(160, 160, 160)
            } else {
                accent()
            };
            cx.fill(&rect.to_rounded_rect(thickness / 2.0), color, 0.0);
        }

        if self.core.effective_options().show_ticks {
            for tick in self.core.ticks() {
                let center = self.point_at(tick.position + radius);
                let color = if tick.selected {
                    accent()
                } else {
                    Color::rgb8(200, 200, 200)
                };
                cx.fill(&Circle::new(center, constants::TICK_RADIUS), color, 0.0);
            }
        }

        self.paint_handle(cx, engine.min_handle.position(), engine.min_handle.active);
        if self.core.is_range() {
            self.paint_handle(cx, engine.max_handle.position(), engine.max_handle.active);
        }
    }
}
