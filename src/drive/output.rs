// Actuator output seam
//
// A track needs one PWM power channel and two boolean direction channels.
// Platform integrations implement these traits over their board's PWM/GPIO
// bindings; the simulated implementations below log every write through
// tracing so the whole runtime can be exercised without hardware attached.

use tracing::debug;

/// PWM power-control output at a fixed frequency.
///
/// Writes are synchronous and immediately observable by the peripheral;
/// backends own their fallibility.
pub trait PwmChannel {
    fn set_frequency(&mut self, hz: u32);
    fn set_duty(&mut self, duty: u16);
}

/// Boolean-level direction output.
pub trait DirectionPin {
    fn set_high(&mut self);
    fn set_low(&mut self);
}

/// Tracing-backed stand-in for a PWM channel.
pub struct SimulatedPwm {
    label: String,
}

impl SimulatedPwm {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl PwmChannel for SimulatedPwm {
    fn set_frequency(&mut self, hz: u32) {
        debug!("{}: pwm frequency set to {} Hz", self.label, hz);
    }

    fn set_duty(&mut self, duty: u16) {
        debug!("{}: pwm duty set to {}", self.label, duty);
    }
}

/// Tracing-backed stand-in for a direction pin.
pub struct SimulatedPin {
    label: String,
}

impl SimulatedPin {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl DirectionPin for SimulatedPin {
    fn set_high(&mut self) {
        debug!("{}: level 1", self.label);
    }

    fn set_low(&mut self) {
        debug!("{}: level 0", self.label);
    }
}

// Call-sequence-recording backends shared by the actuator and controller
// tests.
#[cfg(test)]
pub mod recording {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{DirectionPin, PwmChannel};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Frequency(&'static str, u32),
        Duty(&'static str, u16),
        Level(&'static str, bool),
    }

    pub type Log = Rc<RefCell<Vec<Event>>>;

    pub struct RecordingPwm(pub Log, pub &'static str);

    impl PwmChannel for RecordingPwm {
        fn set_frequency(&mut self, hz: u32) {
            self.0.borrow_mut().push(Event::Frequency(self.1, hz));
        }

        fn set_duty(&mut self, duty: u16) {
            self.0.borrow_mut().push(Event::Duty(self.1, duty));
        }
    }

    pub struct RecordingPin(pub Log, pub &'static str);

    impl DirectionPin for RecordingPin {
        fn set_high(&mut self) {
            self.0.borrow_mut().push(Event::Level(self.1, true));
        }

        fn set_low(&mut self) {
            self.0.borrow_mut().push(Event::Level(self.1, false));
        }
    }
}
