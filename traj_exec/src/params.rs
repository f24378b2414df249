//! # Trajectory Executable Parameters
//!
//! This module provide parameters for the trajectory executable.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use crate::sampler::SamplerParams;
use comms_if::net::NetParams;

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct TrajExecParams {
    /// Network endpoints
    pub net: NetParams,

    /// Addressing of the commands sent to the FCU
    #[serde(default)]
    pub sampler: SamplerParams,

    /// Period of the main loop, i.e. the sampling period, in seconds
    #[serde(default = "default_tick_period_s")]
    pub tick_period_s: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn default_tick_period_s() -> f64 {
    0.01
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
