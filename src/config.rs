// Startup configuration: serial link, PWM frequency, track channel layout
//
// Everything here is fixed at process start. The defaults reproduce the
// original board wiring; a JSON config file overrides them field by field.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gamepad::dabble::BUTTON_SQUARE;

// Serial device bridging the Bluetooth gamepad module
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";

// The Bluetooth module talks at 9600 baud
pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

// Maximum recommended PWM frequency for L293 bridges
pub const DEFAULT_PWM_FREQUENCY_HZ: u32 = 5000;

/// Button that triggers the emergency stop (Square on the Dabble pad)
pub const EMERGENCY_STOP_BUTTON: u8 = BUTTON_SQUARE;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub serial: SerialConfig,
    pub pwm_frequency_hz: u32,
    pub left_track: TrackConfig,
    pub right_track: TrackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    /// Per-read timeout; expiry means "no input this cycle", not an error
    pub read_timeout_ms: u64,
}

/// Output channel assignment for one track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Pin with PWM capability driving the bridge enable input
    pub pwm_pin: u8,
    pub forward_pin: u8,
    pub backward_pin: u8,
    /// Lowest duty value at which this track's motor physically turns;
    /// 0 disables minimum-spin compensation. Obtained from testing.
    #[serde(default)]
    pub lowest_spin_duty: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            pwm_frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
            left_track: TrackConfig {
                pwm_pin: 21,
                forward_pin: 19,
                backward_pin: 18,
                lowest_spin_duty: 0,
            },
            right_track: TrackConfig {
                pwm_pin: 20,
                forward_pin: 17,
                backward_pin: 16,
                lowest_spin_duty: 0,
            },
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RuntimeConfig {
    /// Load configuration from a JSON file; missing fields keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
