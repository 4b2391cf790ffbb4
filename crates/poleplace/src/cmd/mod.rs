use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use poleplace_codec::DEFAULT_Q_GAIN;
use poleplace_control::{Controller, K_OUTPUT, K_STATE};
use poleplace_session::DEFAULT_LOG_PATH;
use poleplace_transport::{DEFAULT_BACKLOG, DEFAULT_INTERFACE, DEFAULT_PORT};

use crate::exit::{control_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod compute;
pub mod gains;
pub mod send;
pub mod serve;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the control server.
    Serve(ServeArgs),
    /// Send one plant sample to a server and print the reply.
    Send(SendArgs),
    /// Evaluate the control law offline.
    Compute(ComputeArgs),
    /// List the controller and network constants in effect.
    Gains(GainsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Serve(args) => serve::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Compute(args) => compute::run(args, format),
        Command::Gains(args) => gains::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Quantizer and feedback constants. Defaults are the pole-placement design.
#[derive(Args, Debug, Clone)]
pub struct ControlArgs {
    /// Quantization gain (physical units per step is 1/gain).
    #[arg(long, default_value_t = DEFAULT_Q_GAIN, env = "POLEPLACE_Q_GAIN")]
    pub q_gain: f64,
    /// Feedback gain on the plant output Vo.
    #[arg(
        long,
        default_value_t = K_OUTPUT,
        allow_negative_numbers = true,
        env = "POLEPLACE_K_OUTPUT"
    )]
    pub k_output: f64,
    /// Feedback gain on the secondary state V1.
    #[arg(
        long,
        default_value_t = K_STATE,
        allow_negative_numbers = true,
        env = "POLEPLACE_K_STATE"
    )]
    pub k_state: f64,
}

impl ControlArgs {
    pub fn controller(&self) -> CliResult<Controller> {
        Controller::from_constants(self.q_gain, self.k_output, self.k_state)
            .map_err(|err| control_error("invalid constants", err))
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// TCP port to listen on.
    #[arg(long, default_value_t = DEFAULT_PORT, env = "POLEPLACE_PORT")]
    pub port: u16,
    /// Local address to bind.
    #[arg(long, default_value = "0.0.0.0", env = "POLEPLACE_BIND")]
    pub bind: IpAddr,
    /// Network interface the socket is restricted to.
    #[arg(long, default_value = DEFAULT_INTERFACE, env = "POLEPLACE_INTERFACE")]
    pub interface: String,
    /// Accept on every interface. Overrides --interface and POLEPLACE_INTERFACE.
    #[arg(long)]
    pub any_interface: bool,
    /// Listen backlog.
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    pub backlog: i32,
    /// CSV file each session appends `Vo,V1` to.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_PATH, env = "POLEPLACE_LOG_FILE")]
    pub log_file: PathBuf,
    /// Per-connection read timeout (e.g. 5s, 500ms). Default: wait forever.
    #[arg(long)]
    pub read_timeout: Option<String>,
    /// Per-connection write timeout (e.g. 5s, 500ms). Default: wait forever.
    #[arg(long)]
    pub write_timeout: Option<String>,
    /// Exit after serving N connections.
    #[arg(long)]
    pub count: Option<usize>,
    #[command(flatten)]
    pub control: ControlArgs,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Server address (e.g. 192.168.5.1:8000).
    pub addr: SocketAddr,
    /// Plant output Vo in physical units.
    #[arg(long, allow_negative_numbers = true)]
    pub vo: f32,
    /// Secondary state V1 in physical units.
    #[arg(long, allow_negative_numbers = true)]
    pub v1: f32,
    /// Quantization gain shared with the server.
    #[arg(long, default_value_t = DEFAULT_Q_GAIN, env = "POLEPLACE_Q_GAIN")]
    pub q_gain: f64,
    /// Connect/read/write timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Plant output Vo in physical units.
    #[arg(long, allow_negative_numbers = true)]
    pub vo: f32,
    /// Secondary state V1 in physical units.
    #[arg(long, allow_negative_numbers = true)]
    pub v1: f32,
    #[command(flatten)]
    pub control: ControlArgs,
}

#[derive(Args, Debug)]
pub struct GainsArgs {
    #[command(flatten)]
    pub control: ControlArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
