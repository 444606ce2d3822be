//! Model-side value types shared by the controllers and the slider core.

use serde::{Deserialize, Serialize};

/// Externally visible slider value. `high_value` is set in range mode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelValue {
    pub value: f64,
    pub high_value: Option<f64>,
}

impl ModelValue {
    pub fn single(value: f64) -> Self {
        Self {
            value,
            high_value: None,
        }
    }

    pub fn range(value: f64, high_value: f64) -> Self {
        Self {
            value,
            high_value: Some(high_value),
        }
    }

    pub fn is_range(&self) -> bool {
        self.high_value.is_some()
    }
}

/// Which handle an interaction manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerRole {
    Min,
    Max,
}

impl PointerRole {
    pub fn opposite(self) -> Self {
        match self {
            Self::Min => Self::Max,
            Self::Max => Self::Min,
        }
    }
}

/// Payload of the user change events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeContext {
    pub value: f64,
    pub high_value: Option<f64>,
    pub pointer: Option<PointerRole>,
}
