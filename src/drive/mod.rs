// Track actuation for the two-track skid-steer base
//
// Provides:
// - The actuator output seam (PWM + direction traits, simulated backend)
// - The Track H-bridge actuator
// - Polar joystick -> differential drive mapping
// - The high-level Drivetrain pair

mod drivetrain;
pub mod mapping;
pub mod output;
pub mod track;

pub use drivetrain::Drivetrain;
pub use mapping::{Sense, TrackCommand, TrackCommands, joystick_to_tracks};
pub use track::{MAX_DUTY, Track, TrackConfigError};
