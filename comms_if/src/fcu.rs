//! # Flight Controller Interface
//!
//! This module defines the setpoint messages which are sent to and received from the flight
//! controller (FCU). The layouts follow the MAVLink `SET_POSITION_TARGET_LOCAL_NED` (84) and
//! `POSITION_TARGET_LOCAL_NED` (85) messages, so the frame identifiers and mask bits are owned by
//! that protocol and must not be changed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// `MAV_FRAME_LOCAL_NED`: local frame, x north, y east, z down, origin fixed relative to earth.
pub const MAV_FRAME_LOCAL_NED: u8 = 1;

// ---------------------------------------------------------------------------
// FLAGS
// ---------------------------------------------------------------------------

bitflags! {
    /// Bitmask of setpoint fields the receiver shall disregard.
    #[derive(Default)]
    pub struct TypeMask : u16 {
        const IGNORE_PX = 1;
        const IGNORE_PY = 2;
        const IGNORE_PZ = 4;
        const IGNORE_VX = 8;
        const IGNORE_VY = 16;
        const IGNORE_VZ = 32;
        const IGNORE_AFX = 64;
        const IGNORE_AFY = 128;
        const IGNORE_AFZ = 256;
        /// Interpret the AF fields as a force rather than an acceleration
        const FORCE = 512;
        const IGNORE_YAW = 1024;
        const IGNORE_YAW_RATE = 2048;

        const IGNORE_POSITION = Self::IGNORE_PX.bits | Self::IGNORE_PY.bits | Self::IGNORE_PZ.bits;
        const IGNORE_VELOCITY = Self::IGNORE_VX.bits | Self::IGNORE_VY.bits | Self::IGNORE_VZ.bits;
        const IGNORE_ACCEL = Self::IGNORE_AFX.bits | Self::IGNORE_AFY.bits | Self::IGNORE_AFZ.bits;
    }
}

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// A local position setpoint command sent to the FCU.
///
/// All vector quantities are in the NED frame, yaw follows the aircraft body convention.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SetPositionTargetLocalNed {
    /// Timestamp in milliseconds
    pub time_boot_ms: u32,

    pub target_system: u8,

    pub target_component: u8,

    /// Coordinate frame identifier, see [`MAV_FRAME_LOCAL_NED`]
    pub coordinate_frame: u8,

    /// Raw [`TypeMask`] bits
    pub type_mask: u16,

    /// Position in meters
    pub position: [f32; 3],

    /// Velocity in meters/second
    pub velocity: [f32; 3],

    /// Acceleration in meters/second^2, or force in Newtons if [`TypeMask::FORCE`] is set
    pub afx: [f32; 3],

    /// Yaw in radians
    pub yaw: f32,

    /// Yaw rate in radians/second
    pub yaw_rate: f32,
}

/// A setpoint reported back by the FCU, in NED/aircraft convention.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionTargetLocalNed {
    pub time_boot_ms: u32,

    pub coordinate_frame: u8,

    pub type_mask: u16,

    pub position: [f32; 3],

    pub velocity: [f32; 3],

    pub afx: [f32; 3],

    pub yaw: f32,

    pub yaw_rate: f32,
}

/// A setpoint republished by the executable in the ENU/baselink convention.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionTarget {
    /// FCU timestamp the setpoint was reported with
    pub time_boot_ms: u32,

    pub coordinate_frame: u8,

    pub type_mask: u16,

    pub position: [f64; 3],

    pub velocity: [f64; 3],

    pub acceleration_or_force: [f64; 3],

    pub yaw: f64,

    pub yaw_rate: f64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl SetPositionTargetLocalNed {
    /// Get the type mask of this command, dropping any unknown bits.
    pub fn mask(&self) -> TypeMask {
        TypeMask::from_bits_truncate(self.type_mask)
    }
}
