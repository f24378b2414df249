//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Messages exchanged with the flight controller (FCU) link.
pub mod fcu;

/// Trajectory and path messages exchanged with planners and visualisers.
pub mod traj;

/// Network module
pub mod net;
