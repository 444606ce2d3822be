//! The slider core: options, model and view state, interaction controllers
//! and change propagation behind one owner.
//!
//! User-driven changes are delivered to listeners synchronously, as a
//! [`SliderEvent::ValueChange`] followed by [`SliderEvent::UserChange`].
//! Changes caused by the host (new options, a new model value) go through the
//! [`Scheduler`] so they land after the host's current update pass.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::channel::{InputChange, InputChannel, OutputChange, OutputChannel};
use crate::drag::{DragController, DragTarget, DraggingState, TouchId};
use crate::error::ConfigError;
use crate::keyboard::{Key, KeyboardController};
use crate::model::{ChangeContext, ModelValue, PointerRole};
use crate::normalize::normalize;
use crate::options::{EffectiveOptions, InteractionFlags, Options};
use crate::position::{Layout, PositionEngine, Tick};
use crate::scheduler::Scheduler;
use crate::track::TrackState;

#[derive(Debug, Clone, PartialEq)]
pub enum SliderEvent {
    ValueChange(ModelValue),
    UserChangeStart(ChangeContext),
    UserChange(ChangeContext),
    UserChangeEnd(ChangeContext),
}

pub type Listener = Rc<dyn Fn(&SliderEvent)>;

type Listeners = Rc<RefCell<Vec<Listener>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Follow {
    None,
    Jump,
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Start {
    role: Option<PointerRole>,
    bar: bool,
    follow: Follow,
}

/// Which targets start which kind of drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bindings {
    flags: InteractionFlags,
}

impl Bindings {
    fn start_for(&self, target: DragTarget, range: bool) -> Option<Start> {
        let flags = self.flags;
        if flags.disabled || flags.read_only {
            return None;
        }
        let jump = |follow| Start {
            role: None,
            bar: false,
            follow,
        };
        match target {
            DragTarget::Handle(PointerRole::Max) if !range => None,
            DragTarget::Handle(role) => Some(Start {
                role: Some(role),
                bar: flags.draggable_range_only,
                follow: Follow::None,
            }),
            DragTarget::SelectionBar if flags.only_bind_handles => None,
            DragTarget::SelectionBar if flags.draggable_range && range => Some(Start {
                role: None,
                bar: true,
                follow: Follow::None,
            }),
            DragTarget::SelectionBar => Some(jump(Follow::Jump)),
            _ if flags.only_bind_handles || flags.draggable_range_only => None,
            DragTarget::FullBar => Some(jump(Follow::Jump)),
            DragTarget::Tick => Some(jump(Follow::Tick)),
        }
    }

    fn keyboard(&self) -> bool {
        let flags = self.flags;
        flags.keyboard_support && !flags.disabled && !flags.read_only
    }
}

pub struct SliderCore {
    options: Options,
    model: ModelValue,
    track: TrackState,
    bindings: Bindings,
    drag: DragController,
    keyboard: KeyboardController,
    input: InputChannel,
    output: OutputChannel,
    listeners: Listeners,
    scheduler: Rc<dyn Scheduler>,
}

impl SliderCore {
    /// Build a slider. Fails when `options` cannot describe a value domain.
    pub fn new(
        options: Options,
        value: ModelValue,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<Self, ConfigError> {
        let effective = options.resolve()?;
        let flags = effective.interaction_flags();
        let mut slider = Self {
            options,
            model: value,
            track: TrackState::new(effective),
            bindings: Bindings { flags },
            drag: DragController::default(),
            keyboard: KeyboardController::default(),
            input: InputChannel::default(),
            output: OutputChannel::default(),
            listeners: Rc::default(),
            scheduler,
        };
        slider.renormalize();
        slider.track.set_model(slider.model);
        slider.input.push(InputChange::internal(slider.model));
        debug!(model = ?slider.model, "slider created");
        Ok(slider)
    }

    pub fn subscribe(&self, listener: impl Fn(&SliderEvent) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Replace the options. On error nothing changes.
    pub fn set_options(&mut self, options: Options) -> Result<(), ConfigError> {
        let effective = options.resolve()?;
        let flags = effective.interaction_flags();
        self.options = options;
        self.track.options = effective;
        self.renormalize();
        self.track.set_model(self.model);
        if flags != self.bindings.flags {
            self.rebind(flags);
        }
        debug!(model = ?self.model, "options applied");
        Ok(())
    }

    /// Accept a model value from the host.
    pub fn set_model_value(&mut self, value: ModelValue) {
        match self.input.push(InputChange::external(value)) {
            Some(value) => self.apply_input(value),
            None => trace!(?value, "duplicate model value dropped"),
        }
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.track.engine.set_layout(layout);
        self.track.refresh();
    }

    /// Pointer went down on `target` at `position` pixels along the axis.
    /// Returns whether a drag session started.
    pub fn pointer_down(
        &mut self,
        target: DragTarget,
        position: f64,
        touch: Option<TouchId>,
    ) -> bool {
        let Some(start) = self.bindings.start_for(target, self.track.is_range()) else {
            trace!(?target, "target not bound");
            return false;
        };
        let Some(role) = self
            .drag
            .start(&mut self.track, start.role, position, touch, start.bar)
        else {
            return false;
        };
        debug!(?target, ?role, "user change start");
        self.emit(&SliderEvent::UserChangeStart(self.change_context()));

        if start.follow != Follow::None {
            let from_tick = start.follow == Follow::Tick;
            if self.drag.move_to(&mut self.track, position, touch, from_tick) == Some(true) {
                self.apply_view_change();
            }
            if from_tick {
                self.pointer_up(touch);
            }
        }
        true
    }

    /// Returns whether the move belonged to the active session.
    pub fn pointer_move(&mut self, position: f64, touch: Option<TouchId>) -> bool {
        match self.drag.move_to(&mut self.track, position, touch, false) {
            Some(changed) => {
                if changed {
                    self.apply_view_change();
                }
                true
            }
            None => false,
        }
    }

    /// Returns whether a session ended.
    pub fn pointer_up(&mut self, touch: Option<TouchId>) -> bool {
        let context = self.change_context();
        if !self.drag.end(&self.track, touch) {
            return false;
        }
        self.track.set_tracking(self.keyboard.focused());
        self.emit(&SliderEvent::UserChangeEnd(context));
        true
    }

    /// A handle received keyboard focus.
    pub fn focus(&mut self, role: PointerRole) {
        if !self.bindings.keyboard() || (role == PointerRole::Max && !self.track.is_range()) {
            return;
        }
        self.keyboard.focus(&mut self.track, role);
        trace!(?role, "handle focused");
    }

    /// The slider lost focus. Ends the key session and any mouse drag.
    pub fn blur(&mut self) {
        let context = self.change_context();
        if self.keyboard.blur() {
            self.emit(&SliderEvent::UserChangeEnd(context));
        }
        if self.drag.is_active() && self.drag.touch().is_none() {
            self.pointer_up(None);
        }
        if !self.drag.is_active() {
            self.track.set_tracking(None);
        }
    }

    /// Returns whether the key was handled.
    pub fn key_down(&mut self, key: Key) -> bool {
        if !self.bindings.keyboard() || self.keyboard.focused().is_none() {
            return false;
        }
        let Some(outcome) = self.keyboard.key_down(&mut self.track, key) else {
            return false;
        };
        if outcome.started {
            debug!(?key, role = ?self.track.tracking, "key session started");
            self.emit(&SliderEvent::UserChangeStart(self.change_context()));
        }
        self.keyboard.follow(self.track.tracking);
        if outcome.changed {
            self.apply_view_change();
        }
        true
    }

    pub fn key_up(&mut self) {
        if self.keyboard.key_up() {
            debug!("key session ended");
            self.emit(&SliderEvent::UserChangeEnd(self.change_context()));
        }
    }

    pub fn value(&self) -> f64 {
        self.model.value
    }

    pub fn high_value(&self) -> Option<f64> {
        self.model.high_value
    }

    pub fn is_range(&self) -> bool {
        self.model.is_range()
    }

    pub fn model(&self) -> ModelValue {
        self.model
    }

    /// View values: step indices in steps-array mode, model values otherwise.
    pub fn view_values(&self) -> (f64, Option<f64>) {
        (self.track.low, self.track.high)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn effective_options(&self) -> &EffectiveOptions {
        &self.track.options
    }

    pub fn engine(&self) -> &PositionEngine {
        &self.track.engine
    }

    pub fn ticks(&self) -> Vec<Tick> {
        self.track
            .engine
            .ticks(&self.track.options, self.track.low, self.track.high)
    }

    pub fn tracking(&self) -> Option<PointerRole> {
        self.track.tracking
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn dragging_state(&self) -> DraggingState {
        self.drag.dragging()
    }

    fn change_context(&self) -> ChangeContext {
        ChangeContext {
            value: self.model.value,
            high_value: self.model.high_value,
            pointer: self.track.tracking,
        }
    }

    fn renormalize(&mut self) {
        let normalized = normalize(self.model, &self.track.options);
        if normalized != self.model {
            debug!(from = ?self.model, to = ?normalized, "model renormalized");
            self.model = normalized;
            self.publish(OutputChange {
                model: normalized,
                user_initiated: false,
                force_change: true,
            });
        }
    }

    fn apply_input(&mut self, value: ModelValue) {
        let normalized = normalize(value, &self.track.options);
        let corrected = normalized != value;
        if corrected {
            debug!(from = ?value, to = ?normalized, "model value corrected");
        }
        self.model = normalized;
        self.track.set_model(normalized);
        if !normalized.is_range() {
            self.release_max_handle();
        }
        self.publish(OutputChange {
            model: normalized,
            user_initiated: false,
            force_change: corrected,
        });
    }

    /// The model left range mode: nothing may keep driving the high handle.
    fn release_max_handle(&mut self) {
        let max = Some(PointerRole::Max);
        if self.drag.is_active() && (self.track.tracking == max || self.drag.dragging().active) {
            self.drag.cancel();
            self.track.set_tracking(self.keyboard.focused());
        }
        if self.keyboard.focused() == max {
            debug!("keyboard focus moved to low handle");
            self.keyboard.follow(Some(PointerRole::Min));
        }
        if self.track.tracking == max {
            self.track.set_tracking(self.keyboard.focused());
        }
    }

    fn apply_view_change(&mut self) {
        self.model = self.track.model();
        trace!(model = ?self.model, "view change");
        self.publish(OutputChange {
            model: self.model,
            user_initiated: true,
            force_change: false,
        });
        self.input.push(InputChange::internal(self.model));
    }

    fn publish(&mut self, change: OutputChange) {
        let Some(change) = self.output.push(change) else {
            return;
        };
        let event = SliderEvent::ValueChange(change.model);
        if change.user_initiated {
            self.emit(&event);
            self.emit(&SliderEvent::UserChange(self.change_context()));
        } else {
            let listeners = self.listeners.clone();
            self.scheduler
                .schedule(Box::new(move || dispatch(&listeners, &event)));
        }
    }

    fn emit(&self, event: &SliderEvent) {
        dispatch(&self.listeners, event);
    }

    fn rebind(&mut self, flags: InteractionFlags) {
        debug!(?flags, "rebinding interactions");
        self.bindings = Bindings { flags };
        self.drag.cancel();
        if !self.bindings.keyboard() {
            self.keyboard.reset();
        }
        self.track.set_tracking(self.keyboard.focused());
    }
}

fn dispatch(listeners: &Listeners, event: &SliderEvent) {
    let snapshot: Vec<Listener> = listeners.borrow().clone();
    for listener in snapshot {
        listener(event);
    }
}

impl fmt::Debug for SliderCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderCore")
            .field("model", &self.model)
            .field("view", &self.view_values())
            .field("tracking", &self.track.tracking)
            .field("dragging", &self.drag.is_active())
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}
