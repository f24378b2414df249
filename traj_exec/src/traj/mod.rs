//! # Trajectory module
//!
//! Defines the trajectory played back by the sampler, and the buffer holding the active one.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod buffer;
mod waypoint;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use buffer::*;
pub use waypoint::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Conventional spacing between waypoints for trajectory producers.
///
/// The sampler does not rely on this, points may be spaced arbitrarily.
pub const DEFAULT_WAYPOINT_SPACING: std::time::Duration = std::time::Duration::from_millis(100);

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while ingesting a trajectory.
#[derive(Debug, thiserror::Error)]
pub enum TrajError {
    /// The scheduled offset of the point at the given index is earlier than the one before it.
    #[error("Waypoint {0} is scheduled before the waypoint preceding it")]
    NonMonotonicOffsets(usize),
}
