//! # Trajectory library.
//!
//! This library allows other crates in the workspace, and the benchmarks, to access items defined
//! inside the trajectory executable crate.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Frame conversion - ENU/NED vectors and baselink/aircraft orientations
pub mod frame_conv;

/// Type mask - flags telling the FCU which setpoint fields to ignore
pub mod type_mask;

/// Trajectories and the buffer holding the one being played back
pub mod traj;

/// Sampler - turns the active trajectory into setpoint commands each cycle
pub mod sampler;

/// Setpoint mirror - converts setpoints reported by the FCU back into ENU
pub mod sp_mirror;

/// Path projection - the path of a trajectory for display
pub mod path_proj;

/// Executable parameters
pub mod params;

/// Trajectory client - receives trajectories from the planner
pub mod traj_client;

/// FCU link - sends setpoint commands and receives reported setpoints
pub mod fcu_link;

/// Setpoint server - publishes mirrored setpoints and paths
pub mod sp_server;
