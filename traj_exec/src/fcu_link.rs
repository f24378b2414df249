//! # FCU Link
//!
//! The FcuLink connects the executable to the flight controller bridge. Setpoint commands are
//! published on one socket, and setpoints the FCU reports back are received on another.
//!
//! Both directions carry JSON encoded messages, see `comms_if::fcu`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::warn;

use comms_if::{
    fcu::{PositionTargetLocalNed, SetPositionTargetLocalNed},
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Link to the flight controller.
pub struct FcuLink {
    cmd_socket: MonitoredSocket,
    feedback_socket: MonitoredSocket,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FcuLinkError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send the setpoint command: {0}")]
    SendError(zmq::Error),

    #[error("Could not recieve a setpoint from the FCU: {0}")]
    RecvError(zmq::Error),

    #[error("Could not serialize the setpoint command: {0}")]
    SerializationError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl FcuLink {
    /// Create a new instance of the FCU link.
    ///
    /// This function will not block until the bridge connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, FcuLinkError> {
        let cmd_options = SocketOptions {
            bind: true,
            connect_timeout: 1000,
            linger: 1,
            send_timeout: 10,
            ..Default::default()
        };

        let cmd_socket = MonitoredSocket::new(
            ctx,
            zmq::PUB,
            cmd_options,
            &params.fcu_command_endpoint,
        )
        .map_err(FcuLinkError::SocketError)?;

        let feedback_options = SocketOptions {
            subscribe: Some(String::new()),
            connect_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            ..Default::default()
        };

        let feedback_socket = MonitoredSocket::new(
            ctx,
            zmq::SUB,
            feedback_options,
            &params.fcu_feedback_endpoint,
        )
        .map_err(FcuLinkError::SocketError)?;

        Ok(Self {
            cmd_socket,
            feedback_socket,
        })
    }

    /// Send a setpoint command to the FCU.
    pub fn send_command(&self, cmd: &SetPositionTargetLocalNed) -> Result<(), FcuLinkError> {
        let cmd_str = serde_json::to_string(cmd).map_err(FcuLinkError::SerializationError)?;

        self.cmd_socket
            .send(&cmd_str, 0)
            .map_err(FcuLinkError::SendError)
    }

    /// Get the next setpoint reported by the FCU, without blocking.
    ///
    /// Returns `Ok(None)` once there are no more pending setpoints. Malformed messages are logged
    /// and skipped.
    pub fn recv_feedback(&self) -> Result<Option<PositionTargetLocalNed>, FcuLinkError> {
        loop {
            let msg = match self.feedback_socket.recv_string(zmq::DONTWAIT) {
                Ok(Ok(s)) => s,
                Ok(Err(_)) => {
                    warn!("Non UTF-8 setpoint from the FCU");
                    continue;
                }
                Err(zmq::Error::EAGAIN) => return Ok(None),
                Err(e) => return Err(FcuLinkError::RecvError(e)),
            };

            match serde_json::from_str(&msg) {
                Ok(sp) => return Ok(Some(sp)),
                Err(e) => warn!("Could not deserialize setpoint from the FCU: {}", e),
            }
        }
    }
}
