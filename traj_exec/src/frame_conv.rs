//! # Frame conversion
//!
//! Conversions between the frame conventions used by trajectories (ENU world frame, baselink body
//! frame) and those used by the flight controller (NED world frame, aircraft body frame).
//!
//! Frames:
//! - ENU: X east, Y north, Z up
//! - NED: X north, Y east, Z down
//! - Baselink: X forward, Y left, Z up
//! - Aircraft: X forward, Y right, Z down

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Direction of an orientation conversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrientationConversion {
    /// Trajectory convention into FCU convention, used for outbound commands.
    EnuBaselinkToNedAircraft,

    /// FCU convention into trajectory convention, used for republishing FCU setpoints.
    NedAircraftToEnuBaselink,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a vector from the ENU frame into the NED frame.
pub fn enu_to_ned(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.y, v.x, -v.z)
}

/// Convert a vector from the NED frame into the ENU frame.
pub fn ned_to_enu(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.y, v.x, -v.z)
}

/// Convert an orientation between the trajectory and FCU conventions.
///
/// The world frame conversion is applied on the left (it rotates the reference frame) and the
/// body frame conversion on the right (it rotates the body axes).
pub fn orientation_frame_convert(
    q: &UnitQuaternion<f64>,
    conversion: OrientationConversion,
) -> UnitQuaternion<f64> {
    match conversion {
        OrientationConversion::EnuBaselinkToNedAircraft => {
            let q_ned = ned_enu_q() * q;
            q_ned * aircraft_baselink_q()
        }
        OrientationConversion::NedAircraftToEnuBaselink => {
            let q_enu = ned_enu_q() * q;
            q_enu * aircraft_baselink_q()
        }
    }
}

/// Get the yaw (rotation about the vertical axis) of an orientation.
///
/// The quaternion must already be in the target frame, yaw is only meaningful relative to it.
pub fn yaw_from_quaternion(q: &UnitQuaternion<f64>) -> f64 {
    let q = q.quaternion();

    let siny_cosp = 2.0 * (q.w * q.k + q.i * q.j);
    let cosy_cosp = 1.0 - 2.0 * (q.j * q.j + q.k * q.k);

    siny_cosp.atan2(cosy_cosp)
}

/// Build an orientation from a yaw alone, with zero roll and pitch.
pub fn quaternion_from_yaw(yaw: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(0.0, 0.0, yaw)
}

/// Get the yaw rate from an angular velocity which has already been converted into the target
/// frame.
pub fn yaw_rate_from_angular_velocity(ang_vel: &Vector3<f64>) -> f64 {
    ang_vel.z
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Static rotation between the NED and ENU world frames.
///
/// A half turn, so it is its own inverse.
fn ned_enu_q() -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(PI, 0.0, FRAC_PI_2)
}

/// Static rotation between the aircraft and baselink body frames.
///
/// A half turn about X, so it is its own inverse.
fn aircraft_baselink_q() -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(PI, 0.0, 0.0)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-9;

    fn assert_angle_eq(a: f64, b: f64) {
        let diff = (a - b + PI).rem_euclid(2.0 * PI) - PI;
        assert!(diff.abs() < TOL, "{} != {}", a, b);
    }

    #[test]
    fn test_vector_round_trip() {
        let vecs = [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.5, 1e9, -7.25),
            Vector3::new(0.0, -0.0, 0.0),
        ];

        for v in vecs.iter() {
            assert_eq!(ned_to_enu(&enu_to_ned(v)), *v);
            assert_eq!(enu_to_ned(&ned_to_enu(v)), *v);
        }

        assert_eq!(enu_to_ned(&vecs[0]), Vector3::new(2.0, 1.0, -3.0));
    }

    #[test]
    fn test_orientation_to_ned() {
        // Facing east in ENU is a yaw of +90 degrees in NED
        let q = orientation_frame_convert(
            &UnitQuaternion::identity(),
            OrientationConversion::EnuBaselinkToNedAircraft,
        );
        assert_angle_eq(yaw_from_quaternion(&q), FRAC_PI_2);

        // Facing north in ENU is a yaw of 0 in NED
        let q = orientation_frame_convert(
            &quaternion_from_yaw(FRAC_PI_2),
            OrientationConversion::EnuBaselinkToNedAircraft,
        );
        assert_angle_eq(yaw_from_quaternion(&q), 0.0);

        // Level attitude stays level: the aircraft Z axis points down in NED
        let z_body = q * Vector3::z();
        assert!((z_body - Vector3::z()).norm() < TOL);
    }

    #[test]
    fn test_orientation_to_enu() {
        for yaw in [0.0, 0.3, FRAC_PI_2, -2.0, PI].iter() {
            let q = orientation_frame_convert(
                &quaternion_from_yaw(*yaw),
                OrientationConversion::NedAircraftToEnuBaselink,
            );
            assert_angle_eq(yaw_from_quaternion(&q), FRAC_PI_2 - yaw);
        }
    }

    #[test]
    fn test_orientation_round_trip() {
        let q = UnitQuaternion::from_euler_angles(0.1, -0.2, 1.3);
        let there = orientation_frame_convert(&q, OrientationConversion::EnuBaselinkToNedAircraft);
        let back = orientation_frame_convert(&there, OrientationConversion::NedAircraftToEnuBaselink);

        assert!(q.angle_to(&back) < TOL);
    }

    #[test]
    fn test_yaw_rate() {
        // Turning left (counter clockwise from above) in ENU is a negative yaw rate in NED
        let ang_vel_ned = enu_to_ned(&Vector3::new(0.0, 0.0, 0.5));
        assert_eq!(yaw_rate_from_angular_velocity(&ang_vel_ned), -0.5);
    }

    #[test]
    fn test_nan_passthrough() {
        let v = enu_to_ned(&Vector3::new(std::f64::NAN, 1.0, 2.0));
        assert!(v.y.is_nan());
        assert_eq!(v.x, 1.0);
    }
}
