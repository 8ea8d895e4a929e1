//! Error types (construction-time failures only)
//!
//! Runtime combat never fails: precondition violations are logged and skipped.

use thiserror::Error;

use crate::components::CharacterKind;

/// Character could not be created.
#[derive(Debug, Error, PartialEq)]
pub enum CombatError {
    /// A collaborator the character talks to at runtime is not installed in the world
    /// (usually `CombatPlugin` was not added).
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("invalid character config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f32 },

    /// Character layer/target mask on the wrong side for its kind.
    #[error("{kind:?} cannot live on layer {layer} with target mask {target_layers}")]
    LayerMismatch {
        kind: CharacterKind,
        layer: u32,
        target_layers: u32,
    },
}

/// Roster/config file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse roster RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("roster has no player entry")]
    NoPlayer,

    #[error("roster has {0} player entries, expected exactly one")]
    MultiplePlayers(usize),

    #[error(transparent)]
    Invalid(#[from] CombatError),
}
