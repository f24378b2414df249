//! Waypoints and trajectories

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use chrono::{DateTime, Utc};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::Serialize;
use std::time::Duration;

// Internal
use super::TrajError;
use comms_if::traj::{Header, MultiDofTrajectory, MultiDofTrajectoryPoint};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single scheduled target within a trajectory.
///
/// Quantities which were not specified by the producer are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Waypoint {
    /// Scheduled offset from the start of the trajectory
    pub time_from_start: Duration,

    /// Position in meters.
    ///
    /// Frame: ENU
    pub position_m: Option<Vector3<f64>>,

    /// Orientation of the body.
    ///
    /// Frame: ENU world, baselink body
    pub attitude_q: Option<UnitQuaternion<f64>>,

    /// Linear velocity in meters/second.
    ///
    /// Frame: ENU
    pub velocity_ms: Option<Vector3<f64>>,

    /// Angular velocity in radians/second.
    ///
    /// Frame: ENU
    pub ang_vel_rads: Option<Vector3<f64>>,

    /// Linear acceleration in meters/second^2.
    ///
    /// Frame: ENU
    pub accel_mss: Option<Vector3<f64>>,
}

/// A time parameterised sequence of waypoints with non-decreasing scheduled offsets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    /// Time stamp given to the trajectory by its producer
    pub stamp: DateTime<Utc>,

    /// Frame the producer expressed the trajectory in
    pub frame_id: String,

    points: Vec<Waypoint>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Waypoint {
    /// Build a waypoint from a trajectory message point.
    ///
    /// Only the first transform, velocity and acceleration of the point are used, i.e. the point
    /// is treated as a single joint.
    pub fn from_msg(point: &MultiDofTrajectoryPoint) -> Self {
        let transform = point.transforms.first();
        let velocity = point.velocities.first();
        let accel = point.accelerations.first();

        Self {
            time_from_start: point.time_from_start,
            position_m: transform.map(|t| Vector3::from(t.translation)),
            attitude_q: transform.map(|t| {
                let [x, y, z, w] = t.rotation;
                UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z))
            }),
            velocity_ms: velocity.map(|v| Vector3::from(v.linear)),
            ang_vel_rads: velocity.map(|v| Vector3::from(v.angular)),
            accel_mss: accel.map(|a| Vector3::from(a.linear)),
        }
    }
}

impl Trajectory {
    /// Create a new trajectory from a sequence of waypoints.
    ///
    /// The waypoints must be ordered by non-decreasing `time_from_start`, otherwise
    /// `TrajError::NonMonotonicOffsets` is returned with the index of the first offending point.
    pub fn new(
        stamp: DateTime<Utc>,
        frame_id: &str,
        points: Vec<Waypoint>,
    ) -> Result<Self, TrajError> {
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].time_from_start < pair[0].time_from_start {
                return Err(TrajError::NonMonotonicOffsets(i + 1));
            }
        }

        Ok(Self {
            stamp,
            frame_id: frame_id.into(),
            points,
        })
    }

    /// Build a trajectory from a trajectory message.
    pub fn from_msg(msg: &MultiDofTrajectory) -> Result<Self, TrajError> {
        Self::new(
            msg.header.stamp,
            &msg.header.frame_id,
            msg.points.iter().map(Waypoint::from_msg).collect(),
        )
    }

    /// The waypoints of the trajectory in scheduled order.
    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scheduled offset of the last waypoint, or `None` if the trajectory is empty.
    pub fn duration(&self) -> Option<Duration> {
        self.points.last().map(|p| p.time_from_start)
    }

    /// Build a message header matching the one this trajectory was received with.
    pub fn header(&self) -> Header {
        Header {
            seq: 0,
            stamp: self.stamp,
            frame_id: self.frame_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::traj::{Transform, Twist};

    fn at_ms(ms: u64) -> Waypoint {
        Waypoint {
            time_from_start: Duration::from_millis(ms),
            ..Default::default()
        }
    }

    #[test]
    fn test_monotonic_offsets() {
        let stamp = Utc::now();

        assert!(Trajectory::new(stamp, "map", vec![at_ms(0), at_ms(100), at_ms(100)]).is_ok());
        assert!(Trajectory::new(stamp, "map", vec![]).is_ok());

        match Trajectory::new(stamp, "map", vec![at_ms(0), at_ms(200), at_ms(100)]) {
            Err(TrajError::NonMonotonicOffsets(2)) => (),
            r => panic!("Expected non-monotonic error at 2, got {:?}", r),
        }
    }

    #[test]
    fn test_from_msg() {
        let msg = MultiDofTrajectory {
            header: Header {
                seq: 4,
                stamp: Utc::now(),
                frame_id: "map".into(),
            },
            joint_names: vec!["base_link".into()],
            points: vec![
                MultiDofTrajectoryPoint {
                    transforms: vec![
                        Transform {
                            translation: [1.0, 2.0, 3.0],
                            rotation: [0.0, 0.0, 0.0, 1.0],
                        },
                        Transform {
                            translation: [9.0, 9.0, 9.0],
                            rotation: [0.0, 0.0, 0.0, 1.0],
                        },
                    ],
                    velocities: vec![Twist {
                        linear: [0.5, 0.0, 0.0],
                        angular: [0.0, 0.0, 0.1],
                    }],
                    accelerations: vec![],
                    time_from_start: Duration::from_millis(0),
                },
                MultiDofTrajectoryPoint {
                    time_from_start: Duration::from_millis(100),
                    ..Default::default()
                },
            ],
        };

        let traj = Trajectory::from_msg(&msg).unwrap();
        let p0 = traj.points()[0];
        let p1 = traj.points()[1];

        assert_eq!(traj.frame_id, "map");
        assert_eq!(traj.duration(), Some(Duration::from_millis(100)));

        // Only the first transform is used
        assert_eq!(p0.position_m, Some(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(p0.attitude_q, Some(UnitQuaternion::identity()));
        assert_eq!(p0.velocity_ms, Some(Vector3::new(0.5, 0.0, 0.0)));
        assert_eq!(p0.ang_vel_rads, Some(Vector3::new(0.0, 0.0, 0.1)));
        assert_eq!(p0.accel_mss, None);

        assert_eq!(p1, at_ms(100));
    }
}
