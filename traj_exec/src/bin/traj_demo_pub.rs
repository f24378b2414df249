//! Demo trajectory publisher
//!
//! Publishes a circular trajectory to the trajectory executable at a fixed interval, with
//! waypoints spaced by the conventional 100 ms.

use chrono::Utc;
use comms_if::{
    net::{zmq, MonitoredSocket, SocketOptions},
    traj::{Header, MultiDofTrajectory, MultiDofTrajectoryPoint, Transform, Twist},
};
use nalgebra::UnitQuaternion;
use std::f64::consts::PI;
use structopt::StructOpt;
use traj_lib::traj::DEFAULT_WAYPOINT_SPACING;

#[derive(Debug, StructOpt)]
#[structopt(name = "traj_demo_pub")]
struct Opts {
    /// Endpoint to publish trajectories on
    #[structopt(long, default_value = "tcp://*:5020")]
    endpoint: String,

    /// Radius of the circle in meters
    #[structopt(long, default_value = "2.0")]
    radius_m: f64,

    /// Altitude of the circle in meters
    #[structopt(long, default_value = "1.5")]
    altitude_m: f64,

    /// Number of waypoints around the circle
    #[structopt(long, default_value = "100")]
    num_points: u32,

    /// Time between publications in seconds
    #[structopt(long, default_value = "15.0")]
    interval_s: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::from_args();

    let ctx = zmq::Context::new();

    let socket_options = SocketOptions {
        bind: true,
        block_on_first_connect: false,
        ..Default::default()
    };

    let socket = MonitoredSocket::new(&ctx, zmq::PUB, socket_options, &opts.endpoint)?;

    println!("Trajectory publisher open on {}", opts.endpoint);

    for seq in 0.. {
        let traj = circle(&opts, seq);
        let traj_str = serde_json::to_string(&traj)?;

        match socket.send(&traj_str, 0) {
            Ok(_) => println!(
                "Sent trajectory {} ({} points, connected: {})",
                seq,
                traj.points.len(),
                socket.connected()
            ),
            Err(e) => println!("Failed to send trajectory: {}", e),
        }

        std::thread::sleep(std::time::Duration::from_secs_f64(opts.interval_s));
    }

    Ok(())
}

/// Build a circular trajectory in ENU, facing along the direction of travel.
fn circle(opts: &Opts, seq: u32) -> MultiDofTrajectory {
    let period_s = DEFAULT_WAYPOINT_SPACING.as_secs_f64() * opts.num_points as f64;
    let omega = 2.0 * PI / period_s;

    let points = (0..opts.num_points)
        .map(|i| {
            let t = DEFAULT_WAYPOINT_SPACING * i;
            let theta = omega * t.as_secs_f64();
            let (s, c) = theta.sin_cos();

            let heading = theta + PI / 2.0;
            let q = UnitQuaternion::from_euler_angles(0.0, 0.0, heading);
            let q = q.quaternion();

            MultiDofTrajectoryPoint {
                transforms: vec![Transform {
                    translation: [opts.radius_m * c, opts.radius_m * s, opts.altitude_m],
                    rotation: [q.i, q.j, q.k, q.w],
                }],
                velocities: vec![Twist {
                    linear: [-opts.radius_m * omega * s, opts.radius_m * omega * c, 0.0],
                    angular: [0.0, 0.0, omega],
                }],
                accelerations: vec![Twist {
                    linear: [
                        -opts.radius_m * omega * omega * c,
                        -opts.radius_m * omega * omega * s,
                        0.0,
                    ],
                    angular: [0.0; 3],
                }],
                time_from_start: t,
            }
        })
        .collect();

    MultiDofTrajectory {
        header: Header {
            seq,
            stamp: Utc::now(),
            frame_id: "map".into(),
        },
        joint_names: vec!["base_link".into()],
        points,
    }
}
