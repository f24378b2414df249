//! # Trajectory Client
//!
//! The TrajClient receives trajectories from a planner and loads them into the trajectory buffer
//! for the sampler to play back.
//!
//! Trajectories are published by the planner as JSON encoded `MultiDofTrajectory` messages. Each
//! one replaces whatever trajectory is being played back, and playback starts from the time it is
//! received. The path projection of each accepted trajectory is passed back to the main loop to be
//! republished.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{error, info, warn};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
        Arc,
    },
    thread::{self, JoinHandle},
    time::Instant,
};

use crate::path_proj;
use crate::traj::{TrajBuffer, TrajError, Trajectory};
use comms_if::{
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
    traj::{MultiDofTrajectory, Path},
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

pub struct TrajClient {
    bg_jh: Option<JoinHandle<()>>,
    bg_run: Arc<AtomicBool>,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TrajClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not deserialize the trajectory: {0}")]
    DeserializeError(serde_json::Error),

    #[error("Invalid trajectory: {0}")]
    InvalidTrajectory(TrajError),
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl TrajClient {
    /// Create a new instance of the TrajClient.
    ///
    /// Accepted trajectories are loaded into `buffer`, and their path projections sent on
    /// `path_sender`.
    pub fn new(
        ctx: &zmq::Context,
        params: &NetParams,
        buffer: TrajBuffer,
        path_sender: Sender<Path>,
    ) -> Result<Self, TrajClientError> {
        let socket_options = SocketOptions {
            subscribe: Some(String::new()),
            connect_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::SUB, socket_options, &params.traj_endpoint)
            .map_err(TrajClientError::SocketError)?;

        let bg_run = Arc::new(AtomicBool::new(true));
        let bg_run_clone = bg_run.clone();

        let bg_jh = Some(thread::spawn(move || {
            bg_thread(socket, bg_run_clone, buffer, path_sender)
        }));

        Ok(Self { bg_jh, bg_run })
    }

    /// Stop the background thread and wait for it to exit.
    pub fn stop(mut self) {
        self.join();
    }

    fn join(&mut self) {
        self.bg_run.store(false, Ordering::Relaxed);

        if let Some(jh) = self.bg_jh.take() {
            if jh.join().is_err() {
                error!("TrajClient background thread panicked");
            }
        }
    }
}

impl Drop for TrajClient {
    fn drop(&mut self) {
        self.join();
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse a trajectory message and load it into the buffer.
///
/// Playback starts at `arrival_time`. On error the buffer is left untouched. Returns the path
/// projection of the loaded trajectory.
pub fn ingest(
    msg: &str,
    buffer: &TrajBuffer,
    arrival_time: Instant,
) -> Result<Path, TrajClientError> {
    let msg: MultiDofTrajectory =
        serde_json::from_str(msg).map_err(TrajClientError::DeserializeError)?;

    let traj = Trajectory::from_msg(&msg).map_err(TrajClientError::InvalidTrajectory)?;

    info!(
        "New trajectory of {} points over {:.3} s",
        traj.points().len(),
        traj.duration().unwrap_or_default().as_secs_f64()
    );

    let path = path_proj::project(&traj);
    buffer.replace(traj, arrival_time);

    Ok(path)
}

/// Background thread, loads new trajectories into the buffer as they are published.
fn bg_thread(
    socket: MonitoredSocket,
    run: Arc<AtomicBool>,
    buffer: TrajBuffer,
    path_sender: Sender<Path>,
) {
    while run.load(Ordering::Relaxed) {
        let msg = match socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => {
                warn!("Non UTF-8 message from the trajectory publisher");
                continue;
            }
            Err(zmq::Error::EAGAIN) => continue,
            Err(e) => {
                error!("Error receiving trajectory: {}", e);
                break;
            }
        };

        // Timestamp before parsing so playback is relative to reception
        let arrival_time = Instant::now();

        let path = match ingest(&msg, &buffer, arrival_time) {
            Ok(p) => p,
            Err(e) => {
                warn!("Trajectory rejected: {}", e);
                continue;
            }
        };

        if path_sender.send(path).is_err() {
            warn!("Path receiver dropped, stopping TrajClient");
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    const TRAJ_JSON: &str = r#"{
        "header": {"seq": 1, "stamp": "2021-03-01T12:00:00Z", "frame_id": "map"},
        "joint_names": ["base_link"],
        "points": [
            {
                "transforms": [{"translation": [1.0, 2.0, 3.0], "rotation": [0.0, 0.0, 0.0, 1.0]}],
                "time_from_start": {"secs": 0, "nanos": 0}
            },
            {
                "transforms": [{"translation": [2.0, 2.0, 3.0], "rotation": [0.0, 0.0, 0.0, 1.0]}],
                "time_from_start": {"secs": 0, "nanos": 100000000}
            }
        ]
    }"#;

    #[test]
    fn test_ingest() {
        let buffer = TrajBuffer::new();
        let t0 = Instant::now();

        let path = ingest(TRAJ_JSON, &buffer, t0).unwrap();

        assert_eq!(path.poses.len(), 2);
        assert_eq!(path.poses[1].position, [2.0, 2.0, 3.0]);
        assert_eq!(path.header.frame_id, "map");

        let active = buffer.snapshot().unwrap();
        assert_eq!(active.start_time, t0);
        assert_eq!(
            active.trajectory.duration(),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn test_ingest_rejects() {
        let buffer = TrajBuffer::new();

        ingest(TRAJ_JSON, &buffer, Instant::now()).unwrap();
        let before = buffer.snapshot().unwrap();

        match ingest("{\"header\": 4}", &buffer, Instant::now()) {
            Err(TrajClientError::DeserializeError(_)) => (),
            r => panic!("Expected a deserialize error, got {:?}", r),
        }

        let backwards = TRAJ_JSON
            .replace("\"nanos\": 0", "\"nanos\": 500000000")
            .replace("\"nanos\": 100000000", "\"nanos\": 0");
        match ingest(&backwards, &buffer, Instant::now()) {
            Err(TrajClientError::InvalidTrajectory(TrajError::NonMonotonicOffsets(1))) => (),
            r => panic!("Expected a non-monotonic error, got {:?}", r),
        }

        // The previous trajectory is still being played back
        assert!(Arc::ptr_eq(&before, &buffer.snapshot().unwrap()));
    }
}
