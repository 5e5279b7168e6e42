// High-level drivetrain for the two-track base
//
// Owns the left and right track actuators, applies mapped command pairs,
// and provides the emergency-stop path.

use tracing::{debug, info};

use crate::config::TrackConfig;

use super::mapping::TrackCommands;
use super::output::{DirectionPin, SimulatedPin, SimulatedPwm};
use super::track::{Track, TrackConfigError};

pub struct Drivetrain {
    left: Track,
    right: Track,
}

impl Drivetrain {
    pub fn new(left: Track, right: Track) -> Self {
        Self { left, right }
    }

    /// Build a drivetrain on the simulated output backend, labeled with the
    /// configured pin numbers. Useful on the bench, where no motor hardware
    /// is attached.
    pub fn simulated(
        frequency_hz: u32,
        left: &TrackConfig,
        right: &TrackConfig,
    ) -> Result<Self, TrackConfigError> {
        info!("Building simulated drivetrain (no hardware outputs)");
        Ok(Self::new(
            Self::simulated_track("left", frequency_hz, left)?,
            Self::simulated_track("right", frequency_hz, right)?,
        ))
    }

    fn simulated_track(
        side: &str,
        frequency_hz: u32,
        config: &TrackConfig,
    ) -> Result<Track, TrackConfigError> {
        Track::new(
            Box::new(SimulatedPwm::new(format!("{side} pwm (pin {})", config.pwm_pin))),
            vec![
                Box::new(SimulatedPin::new(format!(
                    "{side} forward (pin {})",
                    config.forward_pin
                ))) as Box<dyn DirectionPin>,
                Box::new(SimulatedPin::new(format!(
                    "{side} backward (pin {})",
                    config.backward_pin
                ))),
            ],
            frequency_hz,
            config.lowest_spin_duty,
        )
    }

    /// Apply a mapped command pair to the two tracks.
    pub fn apply(&mut self, commands: TrackCommands) {
        debug!(
            "Applying commands: left={:?}, right={:?}",
            commands.left, commands.right
        );
        self.left.apply(commands.left);
        self.right.apply(commands.right);
    }

    /// Short-brake both tracks.
    pub fn fast_stop(&mut self) {
        info!("Fast stop on both tracks");
        self.left.fast_stop();
        self.right.fast_stop();
    }

    /// Cut power to both tracks, letting them coast.
    pub fn idle(&mut self) {
        self.left.set_power(0.0);
        self.right.set_power(0.0);
    }
}

impl Drop for Drivetrain {
    fn drop(&mut self) {
        // Leave the motors unpowered when the runtime winds down.
        debug!("Drivetrain dropped, cutting power");
        self.idle();
    }
}
