//! Deduplicating propagation channels between the host and the slider.
//!
//! The input side drops repeated host values and the echoes of values the
//! slider itself published. The output side drops repeated publications
//! unless a correction forces them through.

use crate::model::ModelValue;

/// A model value arriving from the host, or the record of one the slider produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputChange {
    pub model: ModelValue,
    pub force_change: bool,
    /// Produced by the slider. Remembered for deduplication, never applied.
    pub internal_change: bool,
}

impl InputChange {
    pub fn external(model: ModelValue) -> Self {
        Self {
            model,
            force_change: false,
            internal_change: false,
        }
    }

    pub fn internal(model: ModelValue) -> Self {
        Self {
            model,
            force_change: false,
            internal_change: true,
        }
    }
}

/// A model value the slider wants to publish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputChange {
    pub model: ModelValue,
    pub user_initiated: bool,
    pub force_change: bool,
}

#[derive(Debug, Default)]
pub struct InputChannel {
    last: Option<(ModelValue, bool)>,
}

impl InputChannel {
    /// Returns the model to apply, or `None` when the change is dropped.
    pub fn push(&mut self, change: InputChange) -> Option<ModelValue> {
        let key = (change.model, change.force_change);
        let duplicate = !change.force_change && self.last == Some(key);
        self.last = Some(key);
        if duplicate || change.internal_change {
            None
        } else {
            Some(change.model)
        }
    }
}

#[derive(Debug, Default)]
pub struct OutputChannel {
    last: Option<OutputChange>,
}

impl OutputChannel {
    /// Returns the change to publish, or `None` when it repeats the previous one.
    pub fn push(&mut self, change: OutputChange) -> Option<OutputChange> {
        let duplicate = !change.force_change && self.last == Some(change);
        self.last = Some(change);
        (!duplicate).then_some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_drops_repeats_and_echoes() {
        let mut channel = InputChannel::default();
        let a = ModelValue::single(3.0);
        assert_eq!(channel.push(InputChange::external(a)), Some(a));
        assert_eq!(channel.push(InputChange::external(a)), None);

        let b = ModelValue::single(4.0);
        assert_eq!(channel.push(InputChange::internal(b)), None);
        // Host echoing the value the slider published.
        assert_eq!(channel.push(InputChange::external(b)), None);
        assert_eq!(channel.push(InputChange::external(a)), Some(a));
    }

    #[test]
    fn forced_input_bypasses_dedup() {
        let mut channel = InputChannel::default();
        let a = ModelValue::single(3.0);
        let forced = InputChange {
            force_change: true,
            ..InputChange::external(a)
        };
        assert_eq!(channel.push(forced), Some(a));
        assert_eq!(channel.push(forced), Some(a));
    }

    #[test]
    fn output_dedup_considers_origin() {
        let mut channel = OutputChannel::default();
        let change = OutputChange {
            model: ModelValue::range(1.0, 2.0),
            user_initiated: true,
            force_change: false,
        };
        assert!(channel.push(change).is_some());
        assert!(channel.push(change).is_none());
        let programmatic = OutputChange {
            user_initiated: false,
            ..change
        };
        assert!(channel.push(programmatic).is_some());
        let forced = OutputChange {
            force_change: true,
            ..programmatic
        };
        assert!(channel.push(forced).is_some());
        assert!(channel.push(forced).is_some());
    }
}
