//! # Setpoint mirror
//!
//! Converts setpoints reported by the FCU (NED world frame, aircraft body frame) back into the
//! ENU/baselink convention trajectories are expressed in, so they can be republished alongside
//! the trajectory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;

// Internal
use crate::frame_conv::{self, OrientationConversion};
use comms_if::fcu::{PositionTarget, PositionTargetLocalNed};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a setpoint reported by the FCU into the ENU/baselink convention.
///
/// The timestamp, frame identifier and type mask are forwarded unchanged. Fields flagged as
/// ignored are converted like any other.
pub fn mirror(sp: &PositionTargetLocalNed) -> PositionTarget {
    let q = frame_conv::orientation_frame_convert(
        &frame_conv::quaternion_from_yaw(sp.yaw as f64),
        OrientationConversion::NedAircraftToEnuBaselink,
    );

    let ang_vel = frame_conv::ned_to_enu(&Vector3::new(0.0, 0.0, sp.yaw_rate as f64));

    PositionTarget {
        time_boot_ms: sp.time_boot_ms,
        coordinate_frame: sp.coordinate_frame,
        type_mask: sp.type_mask,
        position: to_enu(&sp.position),
        velocity: to_enu(&sp.velocity),
        acceleration_or_force: to_enu(&sp.afx),
        yaw: frame_conv::yaw_from_quaternion(&q),
        yaw_rate: frame_conv::yaw_rate_from_angular_velocity(&ang_vel),
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn to_enu(v: &[f32; 3]) -> [f64; 3] {
    let enu = frame_conv::ned_to_enu(&Vector3::new(v[0] as f64, v[1] as f64, v[2] as f64));
    [enu.x, enu.y, enu.z]
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::fcu::{TypeMask, MAV_FRAME_LOCAL_NED};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sp(yaw: f32, yaw_rate: f32) -> PositionTargetLocalNed {
        PositionTargetLocalNed {
            time_boot_ms: 987_654,
            coordinate_frame: MAV_FRAME_LOCAL_NED,
            type_mask: (TypeMask::IGNORE_ACCEL | TypeMask::IGNORE_YAW_RATE).bits(),
            position: [2.0, 1.0, -3.0],
            velocity: [0.5, -0.25, 1.0],
            afx: [0.0, 0.0, 0.0],
            yaw,
            yaw_rate,
        }
    }

    fn wrap(a: f64) -> f64 {
        (a + PI).rem_euclid(2.0 * PI) - PI
    }

    #[test]
    fn test_forwarded_fields() {
        let input = sp(0.0, 0.0);
        let out = mirror(&input);

        assert_eq!(out.time_boot_ms, input.time_boot_ms);
        assert_eq!(out.coordinate_frame, input.coordinate_frame);
        assert_eq!(out.type_mask, input.type_mask);
    }

    #[test]
    fn test_vectors() {
        let out = mirror(&sp(0.0, 0.0));

        assert_eq!(out.position, [1.0, 2.0, 3.0]);
        assert_eq!(out.velocity, [-0.25, 0.5, -1.0]);
        assert_eq!(out.acceleration_or_force, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_yaw() {
        for yaw in [0.0f32, 0.5, -1.0, 3.0].iter() {
            let out = mirror(&sp(*yaw, 0.0));
            let expected = FRAC_PI_2 - *yaw as f64;

            assert!(
                wrap(out.yaw - expected).abs() < 1e-9,
                "yaw {} mirrored to {}, expected {}",
                yaw,
                out.yaw,
                expected
            );
        }
    }

    #[test]
    fn test_yaw_rate() {
        let out = mirror(&sp(0.0, 0.25));
        assert_eq!(out.yaw_rate, -0.25);
    }
}
