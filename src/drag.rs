//! Pointer and touch drag tracking.
//!
//! A session starts on pointer-down over a bound target and ends on
//! pointer-up, blur or cancellation. Handle sessions move the tracked handle
//! (switching roles or pushing the opposite handle as configured); bar
//! sessions move both handles together with their difference preserved.

use tracing::{debug, trace};

use crate::model::PointerRole;
use crate::track::TrackState;

/// Identifier of a touch point, as reported by the host.
pub type TouchId = u64;

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Handle(PointerRole),
    FullBar,
    SelectionBar,
    Tick,
}

/// Offsets captured when a bar drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DraggingState {
    pub active: bool,
    /// View value under the pointer at drag start.
    pub value: f64,
    /// `high - low` at drag start.
    pub difference: f64,
    /// Pointer distance past the low handle.
    pub low_limit: f64,
    /// Pointer distance short of the high handle.
    pub high_limit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Handle,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Session {
    mode: DragMode,
    touch: Option<TouchId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Below,
    Above,
    Inside,
}

#[derive(Debug, Default)]
pub struct DragController {
    session: Option<Session>,
    dragging: DraggingState,
}

impl DragController {
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Touch identifier owning the session, if it is a touch session.
    pub fn touch(&self) -> Option<TouchId> {
        self.session.and_then(|s| s.touch)
    }

    pub fn dragging(&self) -> DraggingState {
        self.dragging
    }

    /// Start a session. `role == None` picks the handle nearest to the pointer.
    ///
    /// Returns the tracked role, or `None` while another session is active.
    pub fn start(
        &mut self,
        track: &mut TrackState,
        role: Option<PointerRole>,
        raw_position: f64,
        touch: Option<TouchId>,
        bar: bool,
    ) -> Option<PointerRole> {
        if self.session.is_some() {
            trace!(?touch, "session already active");
            return None;
        }
        let position = event_position(track, raw_position);
        let role = role.unwrap_or_else(|| nearest_handle(track, position));
        let bar = bar && track.is_range();

        self.dragging = if bar {
            let min_position = track.handle_position(PointerRole::Min);
            let max_position = track.handle_position(PointerRole::Max);
            let rtl = track.options.right_to_left;
            DraggingState {
                active: true,
                value: track.position_to_value(position),
                difference: track.value_of(PointerRole::Max) - track.low,
                low_limit: if rtl {
                    min_position - position
                } else {
                    position - min_position
                },
                high_limit: if rtl {
                    position - max_position
                } else {
                    max_position - position
                },
            }
        } else {
            DraggingState::default()
        };

        track.set_tracking(Some(role));
        self.session = Some(Session {
            mode: if bar { DragMode::Bar } else { DragMode::Handle },
            touch,
        });
        debug!(?role, bar, ?touch, "drag started");
        Some(role)
    }

    /// Feed a pointer move. `None` when there is no session or the event
    /// belongs to another touch; otherwise whether any view value changed.
    pub fn move_to(
        &mut self,
        track: &mut TrackState,
        raw_position: f64,
        touch: Option<TouchId>,
        from_tick: bool,
    ) -> Option<bool> {
        let session = self.session?;
        if session.touch != touch {
            return None;
        }
        let position = event_position(track, raw_position);
        let changed = match session.mode {
            DragMode::Handle => self.move_handle(track, position, from_tick),
            DragMode::Bar => self.move_bar(track, position),
        };
        trace!(position, changed, low = track.low, high = ?track.high, "drag move");
        Some(changed)
    }

    /// End the session owned by `touch`. Returns whether a session ended.
    pub fn end(&mut self, track: &TrackState, touch: Option<TouchId>) -> bool {
        match self.session {
            Some(session) if session.touch == touch => {
                self.session = None;
                self.dragging = DraggingState::default();
                debug!(role = ?track.tracking, "drag ended");
                true
            }
            _ => false,
        }
    }

    /// Drop any session without notifying.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            debug!("drag cancelled");
        }
        self.dragging = DraggingState::default();
    }

    fn move_handle(&self, track: &mut TrackState, position: f64, from_tick: bool) -> bool {
        let options = &track.options;
        let (floor_value, ceil_value) = if options.right_to_left {
            (options.ceil, options.floor)
        } else {
            (options.floor, options.ceil)
        };

        let new_value = if position <= 0.0 {
            floor_value
        } else if position >= track.engine.max_handle_position() {
            ceil_value
        } else {
            let value = track.position_to_value(position);
            match options.tick_step {
                Some(tick_step) if from_tick => track.round_to(value, tick_step),
                _ => track.round_step(value),
            }
        };
        position_tracking_handle(track, new_value)
    }

    fn move_bar(&self, track: &mut TrackState, position: f64) -> bool {
        let rtl = track.options.right_to_left;
        let (floor_limit, ceil_limit) = if rtl {
            (self.dragging.high_limit, self.dragging.low_limit)
        } else {
            (self.dragging.low_limit, self.dragging.high_limit)
        };
        let (floor_handle, ceil_handle) = if rtl {
            (PointerRole::Max, PointerRole::Min)
        } else {
            (PointerRole::Min, PointerRole::Max)
        };
        let max_position = track.engine.max_handle_position();

        let bound = if position <= floor_limit {
            // Already pinned at the origin: nothing left to move.
            if track.handle_position(floor_handle) == 0.0 {
                return false;
            }
            Bound::Below
        } else if position >= max_position - ceil_limit {
            if track.handle_position(ceil_handle) == max_position {
                return false;
            }
            Bound::Above
        } else {
            Bound::Inside
        };

        let low = self.bar_low_value(track, position, bound);
        let high = self.bar_high_value(track, position, bound);
        position_tracking_bar(track, low, high, self.dragging.difference)
    }

    fn bar_low_value(&self, track: &TrackState, position: f64, bound: Bound) -> f64 {
        let options = &track.options;
        let rtl = options.right_to_left;
        let difference = self.dragging.difference;
        let value = match bound {
            Bound::Below if rtl => options.ceil - difference,
            Bound::Below => options.floor,
            Bound::Above if rtl => options.floor,
            Bound::Above => options.ceil - difference,
            Bound::Inside => self.pointer_low_value(track, position),
        };
        track.round_step(value)
    }

    fn bar_high_value(&self, track: &TrackState, position: f64, bound: Bound) -> f64 {
        let options = &track.options;
        let rtl = options.right_to_left;
        let difference = self.dragging.difference;
        let value = match bound {
            Bound::Below if rtl => options.ceil,
            Bound::Below => options.floor + difference,
            Bound::Above if rtl => options.floor + difference,
            Bound::Above => options.ceil,
            Bound::Inside => self.pointer_low_value(track, position) + difference,
        };
        track.round_step(value)
    }

    fn pointer_low_value(&self, track: &TrackState, position: f64) -> f64 {
        if track.options.right_to_left {
            track.position_to_value(position + self.dragging.low_limit)
        } else {
            track.position_to_value(position - self.dragging.low_limit)
        }
    }
}

/// Pointer offset along the axis → handle leading-edge position.
fn event_position(track: &TrackState, raw_position: f64) -> f64 {
    raw_position - track.engine.layout().handle_half()
}

fn nearest_handle(track: &TrackState, position: f64) -> PointerRole {
    if !track.is_range() {
        return PointerRole::Min;
    }
    let min_position = track.handle_position(PointerRole::Min);
    let distance_min = (position - min_position).abs();
    let distance_max = (position - track.handle_position(PointerRole::Max)).abs();
    if distance_min < distance_max {
        PointerRole::Min
    } else if distance_min > distance_max {
        PointerRole::Max
    } else if !track.options.right_to_left {
        if position < min_position {
            PointerRole::Min
        } else {
            PointerRole::Max
        }
    } else if position > min_position {
        PointerRole::Min
    } else {
        PointerRole::Max
    }
}

/// Move the tracked handle to `new_value`, applying limits, range bounds,
/// push and switching rules. Returns whether either view value changed.
pub(crate) fn position_tracking_handle(track: &mut TrackState, new_value: f64) -> bool {
    let Some(mut role) = track.tracking else {
        return false;
    };
    let before = (track.low, track.high);
    let mut new_value = apply_min_max_limit(track, new_value);

    if let Some(high) = track.high {
        let low = track.low;
        if track.options.push_range {
            new_value = apply_push_range(track, role, new_value);
        } else {
            if track.options.no_switching {
                if role == PointerRole::Min && new_value > high {
                    new_value = apply_min_max_range(track, role, high);
                } else if role == PointerRole::Max && new_value < low {
                    new_value = apply_min_max_range(track, role, low);
                }
            }
            new_value = apply_min_max_range(track, role, new_value);

            let crossed = match role {
                PointerRole::Min => new_value > high,
                PointerRole::Max => new_value < low,
            };
            if crossed {
                // Both handles meet at the crossing point, then tracking moves over.
                let meeting = track.value_of(role.opposite());
                track.set_value_of(role, meeting);
                role = role.opposite();
                track.set_tracking(Some(role));
                debug!(?role, "tracking switched handles");
            }
        }
    }

    if track.value_of(role) != new_value {
        track.set_value_of(role, new_value);
    }
    let changed = before != (track.low, track.high);
    if changed {
        track.refresh();
    }
    changed
}

/// Move both handles to `(low, high)`, shifting the pair together when a limit is hit.
pub(crate) fn position_tracking_bar(
    track: &mut TrackState,
    low: f64,
    high: f64,
    difference: f64,
) -> bool {
    let (mut low, mut high) = (low, high);
    if let Some(min_limit) = track.options.min_limit {
        if low < min_limit {
            low = min_limit;
            high = track.round_precision(low + difference);
        }
    }
    if let Some(max_limit) = track.options.max_limit {
        if high > max_limit {
            high = max_limit;
            low = track.round_precision(high - difference);
        }
    }

    let before = (track.low, track.high);
    track.low = low;
    track.high = Some(high);
    let changed = before != (track.low, track.high);
    if changed {
        track.refresh();
    }
    changed
}

fn apply_min_max_limit(track: &TrackState, value: f64) -> f64 {
    let options = &track.options;
    if let Some(min_limit) = options.min_limit {
        if value < min_limit {
            return min_limit;
        }
    }
    if let Some(max_limit) = options.max_limit {
        if value > max_limit {
            return max_limit;
        }
    }
    value
}

fn apply_min_max_range(track: &TrackState, role: PointerRole, value: f64) -> f64 {
    let low = track.low;
    let high = track.value_of(PointerRole::Max);
    let opposite = match role {
        PointerRole::Min => high,
        PointerRole::Max => low,
    };
    let difference = (value - opposite).abs();
    if let Some(min_range) = track.options.min_range {
        if difference < min_range {
            return match role {
                PointerRole::Min => track.round_precision(high - min_range),
                PointerRole::Max => track.round_precision(low + min_range),
            };
        }
    }
    if let Some(max_range) = track.options.max_range {
        if difference > max_range {
            // Stay on the side of the opposite handle the value is on.
            let reach = if value < opposite { -max_range } else { max_range };
            return track.round_precision(opposite + reach);
        }
    }
    value
}

/// Displace the opposite handle so the separation stays within range bounds.
fn apply_push_range(track: &mut TrackState, role: PointerRole, value: f64) -> f64 {
    let low = track.low;
    let high = track.value_of(PointerRole::Max);
    let options = &track.options;
    let difference = match role {
        PointerRole::Min => high - value,
        PointerRole::Max => value - low,
    };
    let min_range = options.min_range.unwrap_or(options.step);
    let (floor, ceil, max_range) = (options.floor, options.ceil, options.max_range);

    if difference < min_range {
        match role {
            PointerRole::Min => {
                let pushed = track.round_precision((value + min_range).min(ceil));
                track.high = Some(pushed);
                track.round_precision(pushed - min_range)
            }
            PointerRole::Max => {
                let pushed = track.round_precision((value - min_range).max(floor));
                track.low = pushed;
                track.round_precision(pushed + min_range)
            }
        }
    } else {
        if let Some(max_range) = max_range {
            if difference > max_range {
                match role {
                    PointerRole::Min => track.high = Some(track.round_precision(value + max_range)),
                    PointerRole::Max => track.low = track.round_precision(value - max_range),
                }
            }
        }
        value
    }
}
