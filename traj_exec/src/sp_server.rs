//! # Setpoint Server
//!
//! Publishes mirrored FCU setpoints and trajectory paths in the ENU/baselink convention, for
//! visualisation and monitoring.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use comms_if::{
    fcu::PositionTarget,
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
    traj::Path,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Setpoint server
pub struct SpServer {
    socket: MonitoredSocket,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Message published by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SpServerMsg {
    /// A setpoint reported by the FCU
    Target(PositionTarget),

    /// The path of a newly received trajectory
    Path(Path),
}

#[derive(Debug, thiserror::Error)]
pub enum SpServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send message: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialize the message: {0}")]
    SerializationError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl SpServer {
    /// Create a new instance of the setpoint server.
    ///
    /// This function will not block until a client connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, SpServerError> {
        let socket_options = SocketOptions {
            bind: true,
            connect_timeout: 1000,
            linger: 1,
            send_timeout: 10,
            ..Default::default()
        };

        let socket = MonitoredSocket::new(ctx, zmq::PUB, socket_options, &params.setpoint_endpoint)
            .map_err(SpServerError::SocketError)?;

        Ok(Self { socket })
    }

    pub fn send(&self, msg: &SpServerMsg) -> Result<(), SpServerError> {
        let msg_str = serde_json::to_string(msg).map_err(SpServerError::SerializationError)?;

        self.socket
            .send(&msg_str, 0)
            .map_err(SpServerError::SendError)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_msg_tagging() {
        let msg = SpServerMsg::Target(PositionTarget {
            type_mask: 7,
            ..Default::default()
        });

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["Target"]["type_mask"], 7);
    }
}
