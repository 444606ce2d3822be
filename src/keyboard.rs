//! Keyboard stepping for the focused handle.

use tracing::trace;

use crate::drag::{position_tracking_bar, position_tracking_handle};
use crate::math::clamp_to_range;
use crate::model::PointerRole;
use crate::options::EffectiveOptions;
use crate::track::TrackState;

/// Keys the slider reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Result of a handled key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    /// First key press since focus or the previous key release.
    pub started: bool,
    pub changed: bool,
}

#[derive(Debug, Default)]
pub struct KeyboardController {
    focused: Option<PointerRole>,
    session_open: bool,
}

impl KeyboardController {
    pub fn focused(&self) -> Option<PointerRole> {
        self.focused
    }

    pub fn focus(&mut self, track: &mut TrackState, role: PointerRole) {
        self.focused = Some(role);
        self.session_open = false;
        track.set_tracking(Some(role));
    }

    /// Drop focus. Returns whether a key session was open.
    pub fn blur(&mut self) -> bool {
        self.focused = None;
        std::mem::take(&mut self.session_open)
    }

    /// Follow a tracking switch made by a key press.
    pub fn follow(&mut self, role: Option<PointerRole>) {
        if self.focused.is_some() {
            self.focused = role;
        }
    }

    pub fn key_down(&mut self, track: &mut TrackState, key: Key) -> Option<KeyOutcome> {
        let role = track.tracking?;
        let options = &track.options;
        let target = key_target(options, track.value_of(role), key);
        let value = track.round_step(clamp_to_range(target, options.floor, options.ceil));
        trace!(?key, ?role, value, "key step");

        let started = !self.session_open;
        self.session_open = true;

        let changed = match track.high {
            Some(high) if options.draggable_range_only => {
                let (floor, ceil) = (options.floor, options.ceil);
                let difference = high - track.low;
                let (low, high) = match role {
                    PointerRole::Min => {
                        let high = value + difference;
                        if high > ceil {
                            (ceil - difference, ceil)
                        } else {
                            (value, high)
                        }
                    }
                    PointerRole::Max => {
                        let low = value - difference;
                        if low < floor {
                            (floor, floor + difference)
                        } else {
                            (low, value)
                        }
                    }
                };
                position_tracking_bar(track, low, high, difference)
            }
            _ => position_tracking_handle(track, value),
        };
        Some(KeyOutcome { started, changed })
    }

    /// Returns whether a key session was open and is now closed.
    pub fn key_up(&mut self) -> bool {
        std::mem::take(&mut self.session_open)
    }

    pub fn reset(&mut self) {
        self.focused = None;
        self.session_open = false;
    }
}

/// Target view value for `key` pressed while the handle sits at `current`.
pub fn key_target(options: &EffectiveOptions, current: f64, key: Key) -> f64 {
    let step = options.step;
    let page = (options.ceil - options.floor) / 10.0;
    let (mut increase_step, mut decrease_step) = (current + step, current - step);
    let (mut increase_page, mut decrease_page) = (current + page, current - page);
    let (mut home, mut end) = (options.floor, options.ceil);
    if options.reversed_controls {
        std::mem::swap(&mut increase_step, &mut decrease_step);
        std::mem::swap(&mut increase_page, &mut decrease_page);
        std::mem::swap(&mut home, &mut end);
    }

    let rtl = options.right_to_left;
    let flip_vertical = rtl && options.is_turned();
    match key {
        Key::Up if flip_vertical => decrease_step,
        Key::Up => increase_step,
        Key::Down if flip_vertical => increase_step,
        Key::Down => decrease_step,
        Key::Left if rtl => increase_step,
        Key::Left => decrease_step,
        Key::Right if rtl => decrease_step,
        Key::Right => increase_step,
        Key::PageUp => increase_page,
        Key::PageDown => decrease_page,
        Key::Home => home,
        Key::End => end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelValue;
    use crate::options::Options;
    use crate::position::Layout;

    fn track(options: Options, model: ModelValue) -> TrackState {
        let mut track = TrackState::new(options.resolve().unwrap());
        track.engine.set_layout(Layout::new(110.0, 10.0));
        track.set_model(model);
        track
    }

    #[test]
    fn arrow_and_page_targets() {
        let options = Options::with_bounds(0.0, 100.0).resolve().unwrap();
        assert_eq!(key_target(&options, 50.0, Key::Up), 51.0);
        assert_eq!(key_target(&options, 50.0, Key::Left), 49.0);
        assert_eq!(key_target(&options, 50.0, Key::PageUp), 60.0);
        assert_eq!(key_target(&options, 50.0, Key::PageDown), 40.0);
        assert_eq!(key_target(&options, 50.0, Key::Home), 0.0);
        assert_eq!(key_target(&options, 50.0, Key::End), 100.0);
    }

    #[test]
    fn reversed_controls_swap_directions() {
        let options = Options {
            reversed_controls: true,
            ..Options::with_bounds(0.0, 10.0)
        }
        .resolve()
        .unwrap();
        assert_eq!(key_target(&options, 5.0, Key::Right), 4.0);
        assert_eq!(key_target(&options, 5.0, Key::Home), 10.0);
        assert_eq!(key_target(&options, 5.0, Key::End), 0.0);
    }

    #[test]
    fn right_to_left_turned_flips_vertical_keys() {
        let options = Options {
            right_to_left: true,
            vertical: true,
            ..Options::with_bounds(0.0, 10.0)
        }
        .resolve()
        .unwrap();
        assert_eq!(key_target(&options, 5.0, Key::Up), 4.0);
        assert_eq!(key_target(&options, 5.0, Key::Down), 6.0);
        assert_eq!(key_target(&options, 5.0, Key::Left), 6.0);
    }

    #[test]
    fn session_start_is_reported_once() {
        let mut t = track(Options::with_bounds(0.0, 100.0), ModelValue::single(50.0));
        let mut keyboard = KeyboardController::default();
        assert!(keyboard.key_down(&mut t, Key::Up).is_none());

        keyboard.focus(&mut t, PointerRole::Min);
        let first = keyboard.key_down(&mut t, Key::Up).unwrap();
        let second = keyboard.key_down(&mut t, Key::Up).unwrap();
        assert!(first.started && first.changed);
        assert!(!second.started);
        assert_eq!(t.low, 52.0);
        assert!(keyboard.key_up());
        assert!(!keyboard.key_up());
    }

    #[test]
    fn clamps_at_bounds() {
        let mut t = track(Options::with_bounds(0.0, 100.0), ModelValue::single(99.5));
        let mut keyboard = KeyboardController::default();
        keyboard.focus(&mut t, PointerRole::Min);
        keyboard.key_down(&mut t, Key::PageUp);
        assert_eq!(t.low, 100.0);
        let outcome = keyboard.key_down(&mut t, Key::Up).unwrap();
        assert!(!outcome.changed);
    }

    #[test]
    fn range_only_moves_pair() {
        let options = Options {
            draggable_range_only: true,
            ..Options::with_bounds(0.0, 100.0)
        };
        let mut t = track(options, ModelValue::range(80.0, 95.0));
        let mut keyboard = KeyboardController::default();
        keyboard.focus(&mut t, PointerRole::Min);
        keyboard.key_down(&mut t, Key::PageUp);
        assert_eq!((t.low, t.high), (85.0, Some(100.0)));
        keyboard.key_down(&mut t, Key::Home);
        assert_eq!((t.low, t.high), (0.0, Some(15.0)));
    }
}
