// Blocking serial polling loop around the frame scanner and drivetrain
//
// The loop reads one byte per call with a timeout; expiry is "no input this
// cycle", not an error. Each completed frame applies the joystick mapping
// first and button handling second, so an emergency stop always has the
// final say for that frame.

use std::io::Read;

use tracing::{debug, info, trace, warn};

use crate::config::{EMERGENCY_STOP_BUTTON, RuntimeConfig};
use crate::drive::track::TrackConfigError;
use crate::drive::{Drivetrain, joystick_to_tracks};
use crate::gamepad::{FrameScanner, GamepadFrame};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Track configuration error: {0}")]
    Track(#[from] TrackConfigError),

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Frame dispatch without the serial plumbing: owns the scanner and both
/// tracks, consumes the byte stream one byte at a time.
pub struct Controller {
    scanner: FrameScanner,
    drivetrain: Drivetrain,
}

impl Controller {
    pub fn new(drivetrain: Drivetrain) -> Self {
        Self {
            scanner: FrameScanner::new(),
            drivetrain,
        }
    }

    /// Feed one byte from the stream, dispatching any frame it completes.
    pub fn feed(&mut self, byte: u8) {
        if let Some(frame) = self.scanner.push(byte) {
            debug!("Frame: {:?}", frame);
            self.on_frame(frame);
        }
    }

    fn on_frame(&mut self, frame: GamepadFrame) {
        let commands = joystick_to_tracks(frame.direction(), frame.radius());
        self.drivetrain.apply(commands);
        if frame.pressed(EMERGENCY_STOP_BUTTON) {
            warn!("Emergency stop pressed, braking both tracks");
            self.drivetrain.fast_stop();
        }
    }
}

/// Poll the gamepad serial source for the lifetime of the process.
pub fn run(config: &RuntimeConfig, drivetrain: Drivetrain) -> Result<(), RuntimeError> {
    info!(
        "Opening gamepad serial port {} at {} baud",
        config.serial.port, config.serial.baud_rate
    );
    let mut port = serialport::new(config.serial.port.as_str(), config.serial.baud_rate)
        .timeout(config.serial.read_timeout())
        .open()?;

    info!(
        "Runtime started: polling with {}ms read timeout",
        config.serial.read_timeout_ms
    );

    let mut controller = Controller::new(drivetrain);
    let mut byte = [0u8; 1];
    loop {
        match port.read(&mut byte) {
            Ok(0) => continue,
            Ok(_) => {
                trace!("rx byte {:#04X}", byte[0]);
                controller.feed(byte[0]);
            }
            // Timeout means the pad is quiet; keep polling.
            Err(e)
                if e.kind() == std::io::ErrorKind::TimedOut
                    || e.kind() == std::io::ErrorKind::WouldBlock =>
            {
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
