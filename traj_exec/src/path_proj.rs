//! # Path projection
//!
//! Projects a trajectory into a path of poses for visualisation. The poses are left in the frame
//! the trajectory was given in.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{UnitQuaternion, Vector3};

// Internal
use crate::traj::Trajectory;
use comms_if::traj::{Path, PoseStamped};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Project a trajectory into a path with one pose per waypoint.
///
/// Waypoints without a position are placed at the origin, and those without an orientation are
/// given the identity orientation.
pub fn project(traj: &Trajectory) -> Path {
    let poses = traj
        .points()
        .iter()
        .map(|p| {
            let position = p.position_m.unwrap_or_else(Vector3::zeros);
            let orientation = p.attitude_q.unwrap_or_else(UnitQuaternion::identity);
            let q = orientation.quaternion();

            PoseStamped {
                position: [position.x, position.y, position.z],
                orientation: [q.i, q.j, q.k, q.w],
            }
        })
        .collect();

    Path {
        header: traj.header(),
        poses,
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traj::Waypoint;
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn test_project() {
        let q = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.5);
        let points = vec![
            Waypoint {
                time_from_start: Duration::from_millis(0),
                position_m: Some(Vector3::new(1.0, 2.0, 3.0)),
                attitude_q: Some(q),
                ..Default::default()
            },
            Waypoint {
                time_from_start: Duration::from_millis(100),
                velocity_ms: Some(Vector3::new(1.0, 0.0, 0.0)),
                ..Default::default()
            },
            Waypoint {
                time_from_start: Duration::from_millis(200),
                position_m: Some(Vector3::new(-4.0, 0.5, 0.0)),
                ..Default::default()
            },
        ];
        let stamp = Utc::now();
        let traj = Trajectory::new(stamp, "odom", points).unwrap();

        let path = project(&traj);

        assert_eq!(path.header.stamp, stamp);
        assert_eq!(path.header.frame_id, "odom");
        assert_eq!(path.poses.len(), 3);

        // Values pass through unconverted, in order
        assert_eq!(path.poses[0].position, [1.0, 2.0, 3.0]);
        let q = q.quaternion();
        assert_eq!(path.poses[0].orientation, [q.i, q.j, q.k, q.w]);

        assert_eq!(path.poses[1].position, [0.0, 0.0, 0.0]);
        assert_eq!(path.poses[1].orientation, [0.0, 0.0, 0.0, 1.0]);

        assert_eq!(path.poses[2].position, [-4.0, 0.5, 0.0]);
    }

    #[test]
    fn test_project_empty() {
        let traj = Trajectory::new(Utc::now(), "map", vec![]).unwrap();
        assert!(project(&traj).poses.is_empty());
    }
}
