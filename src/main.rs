use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trackbot_dabble_runtime::config::RuntimeConfig;
use trackbot_dabble_runtime::drive::Drivetrain;
use trackbot_dabble_runtime::runtime::{self, RuntimeError};

/// Tracked-base teleop runtime for the Dabble gamepad serial link
#[derive(Parser)]
struct Cli {
    /// JSON config file; defaults reproduce the original board wiring
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serial port override
    #[arg(long)]
    port: Option<String>,

    /// Baud rate override
    #[arg(long)]
    baud: Option<u32>,
}

fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init(); // installs the subscriber globally

    if let Err(e) = run() {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RuntimeError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(port) = cli.port {
        config.serial.port = port;
    }
    if let Some(baud) = cli.baud {
        config.serial.baud_rate = baud;
    }

    // The runtime drives the output seam; this binary wires it to the
    // simulated backend. Deployments with real PWM/GPIO bindings build
    // their Tracks through the library API instead.
    let drivetrain = Drivetrain::simulated(
        config.pwm_frequency_hz,
        &config.left_track,
        &config.right_track,
    )?;

    runtime::run(&config, drivetrain)
}
