//! # Trajectory messages
//!
//! Multi degree-of-freedom trajectories sent by planners, and the path projection sent back out for
//! visualisation.
//!
//! Vectors are `[x, y, z]` and quaternions are `[x, y, z, w]`. Trajectories are expressed in the
//! ENU world frame with baselink body orientation.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Standard message header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Header {
    /// Sequence number of the message
    #[serde(default)]
    pub seq: u32,

    /// The time stamp set by the producer of the message
    pub stamp: DateTime<Utc>,

    /// Name of the frame the data is expressed in
    #[serde(default)]
    pub frame_id: String,
}

/// A rigid transform, translation then rotation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: [f64; 3],

    pub rotation: [f64; 4],
}

/// Linear and angular parts of a velocity or acceleration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Twist {
    pub linear: [f64; 3],

    pub angular: [f64; 3],
}

/// One point of a [`MultiDofTrajectory`].
///
/// Each list holds one entry per joint. Any list may be empty, in which case that quantity is not
/// specified for the point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MultiDofTrajectoryPoint {
    #[serde(default)]
    pub transforms: Vec<Transform>,

    #[serde(default)]
    pub velocities: Vec<Twist>,

    #[serde(default)]
    pub accelerations: Vec<Twist>,

    /// Scheduled offset of the point from the start of the trajectory
    pub time_from_start: Duration,
}

/// A time parameterised multi degree-of-freedom trajectory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MultiDofTrajectory {
    pub header: Header,

    #[serde(default)]
    pub joint_names: Vec<String>,

    pub points: Vec<MultiDofTrajectoryPoint>,
}

/// A stamped pose within a [`Path`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PoseStamped {
    pub position: [f64; 3],

    pub orientation: [f64; 4],
}

/// An ordered sequence of poses for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Path {
    pub header: Header,

    pub poses: Vec<PoseStamped>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_sparse_point() {
        // Points only need to carry the quantities they specify
        let json = r#"{
            "header": {"stamp": "2021-03-04T10:00:00Z"},
            "points": [
                {"time_from_start": {"secs": 0, "nanos": 100000000}},
                {
                    "transforms": [{"translation": [1.0, 2.0, 3.0], "rotation": [0.0, 0.0, 0.0, 1.0]}],
                    "time_from_start": {"secs": 1, "nanos": 0}
                }
            ]
        }"#;

        let traj: MultiDofTrajectory = serde_json::from_str(json).unwrap();

        assert_eq!(traj.points.len(), 2);
        assert!(traj.points[0].transforms.is_empty());
        assert!(traj.points[0].velocities.is_empty());
        assert_eq!(traj.points[0].time_from_start, Duration::from_millis(100));
        assert_eq!(traj.points[1].transforms[0].translation, [1.0, 2.0, 3.0]);
        assert_eq!(traj.header.seq, 0);
        assert_eq!(traj.header.frame_id, "");
    }
}
