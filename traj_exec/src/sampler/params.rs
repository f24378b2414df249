//! Sampler parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the sampler
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// System ID of the FCU the commands are addressed to
    pub target_system: u8,

    /// Component ID of the FCU the commands are addressed to
    pub target_component: u8,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            target_system: 1,
            target_component: 1,
        }
    }
}
