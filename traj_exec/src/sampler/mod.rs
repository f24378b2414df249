//! # Sampler module
//!
//! The sampler is run once per cycle. It looks up the waypoint of the active trajectory which is
//! due at the current time and converts it into a setpoint command for the FCU.
//!
//! Waypoints are selected by "first reached or future": the first waypoint whose scheduled offset
//! is at or after the time elapsed since the trajectory arrived. Once every waypoint is in the past
//! the trajectory is finished and the buffer goes idle, so at most one command is produced per
//! cycle.
//!
//! The trajectory is expressed in ENU/baselink and the FCU expects NED/aircraft, so all vector
//! quantities and the orientation are converted before being packed into the command. Quantities
//! the waypoint does not specify are sent as zero with the matching type mask bits set.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod params;
pub mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::Params as SamplerParams;
pub use state::*;
