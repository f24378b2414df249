//! Main trajectory executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise session, logging and parameters
//!     - Start the TrajClient, which loads trajectories into the buffer in the background
//!     - Main loop, once per sampling period:
//!         - Mirror setpoints reported by the FCU and republish them
//!         - Republish and save the paths of newly received trajectories
//!         - Sample the active trajectory and send the command to the FCU
//!         - Sleep for the remainder of the period

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use traj_lib::{
    fcu_link::FcuLink,
    params::TrajExecParams,
    sampler::{Sampler, SamplerState},
    sp_mirror,
    sp_server::{SpServer, SpServerMsg},
    traj::TrajBuffer,
    traj_client::TrajClient,
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Trajectory executable, plays back trajectories as setpoints for the FCU.
#[derive(Debug, StructOpt)]
#[structopt(name = "traj_exec")]
struct Opts {
    /// Parameter file, relative to `$TRAJ_SW_ROOT/params`
    #[structopt(long, default_value = "traj_exec.toml")]
    params: String,

    /// Minimum log level, one of `info`, `debug` or `trace`
    #[structopt(long, default_value = "debug")]
    log_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    let session = Session::new("traj_exec", "sessions").wrap_err("Failed to create the session")?;

    logger_init(opts.log_level, &session).wrap_err("Failed to initialise logging")?;

    info!("Trajectory Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: TrajExecParams = util::params::load(&opts.params)
        .wrap_err_with(|| format!("Could not load parameters from {}", opts.params))?;

    debug!("Parameters: {:#?}", params);

    let tick_period = Duration::from_secs_f64(params.tick_period_s);

    info!("Exec parameters loaded");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let buffer = TrajBuffer::new();
    let (path_sender, path_receiver) = mpsc::channel();

    let traj_client = {
        let c = TrajClient::new(&zmq_ctx, &params.net, buffer.clone(), path_sender)
            .wrap_err("Failed to initialise the TrajClient")?;
        info!("TrajClient initialised");
        c
    };

    let fcu_link = {
        let l = FcuLink::new(&zmq_ctx, &params.net).wrap_err("Failed to initialise the FcuLink")?;
        info!("FcuLink initialised");
        l
    };

    let sp_server = {
        let s = SpServer::new(&zmq_ctx, &params.net)
            .wrap_err("Failed to initialise the SpServer")?;
        info!("SpServer initialised");
        s
    };

    info!("Network initialisation complete");

    let sampler = Sampler::new(params.sampler, buffer);

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut num_paths: u64 = 0;
    let mut last_state = SamplerState::Idle;

    loop {
        let cycle_start_instant = Instant::now();

        // ---- FCU SETPOINTS ----

        loop {
            match fcu_link.recv_feedback() {
                Ok(Some(sp)) => {
                    let msg = SpServerMsg::Target(sp_mirror::mirror(&sp));
                    if let Err(e) = sp_server.send(&msg) {
                        warn!("SpServer error: {}", e);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("FcuLink error: {}", e);
                    break;
                }
            }
        }

        // ---- TRAJECTORY PATHS ----

        let mut traj_client_stopped = false;

        loop {
            match path_receiver.try_recv() {
                Ok(path) => {
                    if let Err(e) = sp_server.send(&SpServerMsg::Path(path.clone())) {
                        warn!("SpServer error: {}", e);
                    }

                    session.save(format!("paths/path_{:04}.json", num_paths), path);
                    num_paths += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    traj_client_stopped = true;
                    break;
                }
            }
        }

        if traj_client_stopped {
            warn!("TrajClient stopped, exiting");
            break;
        }

        // ---- SAMPLING ----

        let (cmd, report) = sampler.sample(Instant::now());

        if report.state != last_state {
            info!("Sampler {:?} -> {:?}", last_state, report.state);
            last_state = report.state;
        }

        if let Some(cmd) = cmd {
            if let Err(e) = fcu_link.send_command(&cmd) {
                warn!("Could not send setpoint to the FCU: {}", e);
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        match tick_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - tick_period.as_secs_f64()
            ),
        }
    }

    // ---- SHUTDOWN ----

    traj_client.stop();

    info!("End of execution");

    session.exit();

    Ok(())
}
