//! Sampler state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use nalgebra::Vector3;
use std::time::Instant;

// Internal
use super::SamplerParams;
use crate::frame_conv::{self, OrientationConversion};
use crate::traj::{TrajBuffer, Waypoint};
use crate::type_mask::{build_mask, TypeMask};
use comms_if::fcu::{SetPositionTargetLocalNed, MAV_FRAME_LOCAL_NED};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Plays back the active trajectory of a buffer as FCU setpoint commands.
pub struct Sampler {
    params: SamplerParams,

    buffer: TrajBuffer,
}

/// The status report of a single sample.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct StatusReport {
    pub state: SamplerState,

    /// Index of the waypoint which was commanded, if any
    pub point_index: Option<usize>,

    /// Time since the active trajectory started in seconds, zero when idle
    pub elapsed_s: f64,

    /// Number of waypoints in the active trajectory, zero when idle
    pub num_points: usize,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Outcome of a single sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SamplerState {
    /// No trajectory is being played back, no command produced.
    Idle,

    /// A waypoint was due and a command was produced.
    Active,

    /// Every waypoint of the trajectory is in the past. The buffer has been set idle and no
    /// command was produced.
    EndOfTrajectory,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SamplerState {
    fn default() -> Self {
        SamplerState::Idle
    }
}

impl Sampler {
    /// Create a new sampler playing back trajectories from the given buffer.
    pub fn new(params: SamplerParams, buffer: TrajBuffer) -> Self {
        Self { params, buffer }
    }

    /// Get the buffer the sampler plays back from.
    pub fn buffer(&self) -> &TrajBuffer {
        &self.buffer
    }

    /// Sample the active trajectory at `now`.
    ///
    /// Returns the command for the first waypoint which has not yet been passed, or `None` if
    /// there is no active trajectory or it has ended. When the trajectory has ended the buffer is
    /// set idle, unless it has been replaced in the meantime.
    pub fn sample(&self, now: Instant) -> (Option<SetPositionTargetLocalNed>, StatusReport) {
        let mut report = StatusReport::default();

        let active = match self.buffer.snapshot() {
            Some(a) => a,
            None => return (None, report),
        };

        let elapsed = active.elapsed(now);
        let points = active.trajectory.points();

        report.elapsed_s = elapsed.as_secs_f64();
        report.num_points = points.len();

        let (index, waypoint) = match points
            .iter()
            .enumerate()
            .find(|(_, p)| p.time_from_start >= elapsed)
        {
            Some(p) => p,
            None => {
                if self.buffer.finish(&active) {
                    debug!(
                        "Trajectory of {} points finished after {:.3} s",
                        report.num_points, report.elapsed_s
                    );
                }
                report.state = SamplerState::EndOfTrajectory;
                return (None, report);
            }
        };

        trace!("Sampling waypoint {} at {:.3} s", index, report.elapsed_s);

        report.state = SamplerState::Active;
        report.point_index = Some(index);

        let cmd = waypoint_to_command(
            waypoint,
            util::time::millis_u32(&active.trajectory.stamp),
            &self.params,
        );

        (Some(cmd), report)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a waypoint in ENU/baselink into a NED/aircraft setpoint command.
pub fn waypoint_to_command(
    waypoint: &Waypoint,
    time_boot_ms: u32,
    params: &SamplerParams,
) -> SetPositionTargetLocalNed {
    let mut mask = build_mask(
        waypoint.position_m.is_some(),
        waypoint.velocity_ms.is_some(),
        waypoint.accel_mss.is_some(),
    );

    let yaw = match waypoint.attitude_q {
        Some(q) => frame_conv::yaw_from_quaternion(&frame_conv::orientation_frame_convert(
            &q,
            OrientationConversion::EnuBaselinkToNedAircraft,
        )),
        None => {
            mask |= TypeMask::IGNORE_YAW;
            0.0
        }
    };

    let yaw_rate = match waypoint.ang_vel_rads {
        Some(w) => frame_conv::yaw_rate_from_angular_velocity(&frame_conv::enu_to_ned(&w)),
        None => {
            mask |= TypeMask::IGNORE_YAW_RATE;
            0.0
        }
    };

    SetPositionTargetLocalNed {
        time_boot_ms,
        target_system: params.target_system,
        target_component: params.target_component,
        coordinate_frame: MAV_FRAME_LOCAL_NED,
        type_mask: mask.bits(),
        position: to_ned_f32(&waypoint.position_m),
        velocity: to_ned_f32(&waypoint.velocity_ms),
        afx: to_ned_f32(&waypoint.accel_mss),
        yaw: yaw as f32,
        yaw_rate: yaw_rate as f32,
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert an optional ENU vector into the NED command layout, zero if absent.
fn to_ned_f32(v: &Option<Vector3<f64>>) -> [f32; 3] {
    match v {
        Some(v) => {
            let ned = frame_conv::enu_to_ned(v);
            [ned.x as f32, ned.y as f32, ned.z as f32]
        }
        None => [0.0; 3],
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
