//! Configuration errors raised while resolving slider options.

use thiserror::Error;

/// Fatal option errors. Nothing is applied when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("floor and ceil options must be supplied when no steps array is set")]
    MissingFloorOrCeil,

    #[error("floor cannot be 0 with a logarithmic scale")]
    LogScaleWithZeroFloor,

    #[error("steps array must contain at least one entry")]
    EmptyStepsArray,
}
