// Track actuator: one side's motor/H-bridge assembly
//
// A track is driven through an L293-style H-bridge: a PWM enable channel
// sets power, two direction channels select the rotation sense. Worn or
// heavily geared motors need a minimum duty before they physically turn;
// `lowest_spin_duty` remaps any positive power into the torque-producing
// range while keeping an exact 0% a true zero.

use super::mapping::{Sense, TrackCommand};
use super::output::{DirectionPin, PwmChannel};

/// Largest duty value the power channel accepts
pub const MAX_DUTY: u16 = 65535;

/// Direction channels per track: forward, then backward
const DIRECTION_CHANNELS: usize = 2;

/// Fatal startup errors from track construction
#[derive(Debug, thiserror::Error)]
pub enum TrackConfigError {
    #[error("expected {DIRECTION_CHANNELS} direction channels, got {0}")]
    InvalidChannelCount(usize),

    #[error("lowest spin duty {0} exceeds the duty range 0..={MAX_DUTY}")]
    InvalidDutyRange(u32),
}

/// One drivable skid-steer side
pub struct Track {
    pwm: Box<dyn PwmChannel>,
    // [forward, backward]
    channels: [Box<dyn DirectionPin>; DIRECTION_CHANNELS],
    lowest_spin_duty: u16,
}

impl Track {
    /// Build a track from its output channels.
    ///
    /// `channels` holds the forward channel first, then the backward one;
    /// any other count is a fatal configuration error. A `lowest_spin_duty`
    /// of 0 disables minimum-spin compensation. The power channel is
    /// initialized to zero duty at `frequency_hz`.
    pub fn new(
        mut pwm: Box<dyn PwmChannel>,
        channels: Vec<Box<dyn DirectionPin>>,
        frequency_hz: u32,
        lowest_spin_duty: u32,
    ) -> Result<Self, TrackConfigError> {
        let count = channels.len();
        let channels: [Box<dyn DirectionPin>; DIRECTION_CHANNELS] = channels
            .try_into()
            .map_err(|_| TrackConfigError::InvalidChannelCount(count))?;
        if lowest_spin_duty > u32::from(MAX_DUTY) {
            return Err(TrackConfigError::InvalidDutyRange(lowest_spin_duty));
        }

        pwm.set_frequency(frequency_hz);
        pwm.set_duty(0);

        Ok(Self {
            pwm,
            channels,
            lowest_spin_duty: lowest_spin_duty as u16,
        })
    }

    /// Set power in [0, 100] percent.
    ///
    /// An exact 0% always writes zero duty; any positive power lands in
    /// `[lowest_spin_duty, MAX_DUTY]`. Out-of-range percentages are a
    /// caller defect and are written through unclamped.
    pub fn set_power(&mut self, percent: f64) {
        let duty = if percent == 0.0 {
            0
        } else {
            let span = f64::from(MAX_DUTY - self.lowest_spin_duty);
            (f64::from(self.lowest_spin_duty) + percent / 100.0 * span) as u16
        };
        self.pwm.set_duty(duty);
    }

    /// Select forward rotation, optionally applying a power setting too.
    pub fn forward(&mut self, power: Option<f64>) {
        self.channels[0].set_high();
        self.channels[1].set_low();
        if let Some(percent) = power {
            self.set_power(percent);
        }
    }

    /// Select backward rotation, optionally applying a power setting too.
    pub fn backward(&mut self, power: Option<f64>) {
        self.channels[0].set_low();
        self.channels[1].set_high();
        if let Some(percent) = power {
            self.set_power(percent);
        }
    }

    /// Active short brake: full power through the bridge first, then both
    /// direction channels low. The H-bridge needs that order.
    pub fn fast_stop(&mut self) {
        self.set_power(100.0);
        for channel in &mut self.channels {
            channel.set_low();
        }
    }

    /// Apply a mapped command. `Idle` cuts power without touching the
    /// direction channels, letting the track coast.
    pub fn apply(&mut self, command: TrackCommand) {
        match command.sense {
            Sense::Forward => self.forward(Some(command.power)),
            Sense::Backward => self.backward(Some(command.power)),
            Sense::Idle => self.set_power(0.0),
        }
    }
}
