// Keyboard gamepad: WASD steer, 1/2/3 stick throw, SPACE e-stop, Q quit
//
// Stands in for the phone app on the bench: synthesizes Dabble gamepad
// frames from keyboard input and writes their wire encoding to a serial
// port, e.g. the far end of a loopback or the Bluetooth module itself.
//
// Usage: cargo run --example keyboard_pad -- [port]

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::info;

use trackbot_dabble_runtime::config::{DEFAULT_BAUD_RATE, EMERGENCY_STOP_BUTTON};
use trackbot_dabble_runtime::gamepad::GamepadFrame;

// Cardinal stick angles of the 24-sector encoding
const DIR_RIGHT: u8 = 0;
const DIR_UP: u8 = 6;
const DIR_LEFT: u8 = 12;
const DIR_DOWN: u8 = 18;

const THROW_STEPS: [u8; 3] = [3, 5, 7]; // stick deflection per speed step
const INPUT_TIMEOUT_MS: u64 = 100; // Center the stick after this much time with no input

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let port_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB0".to_string());

    info!("Opening serial port {}...", port_name);
    let port = serialport::new(port_name.as_str(), DEFAULT_BAUD_RATE)
        .timeout(Duration::from_millis(100))
        .open()?;

    info!("Controls: WASD=steer, 1/2/3=stick throw, SPACE=emergency stop, Q=quit");
    info!("Throw: LOW");

    enable_raw_mode()?;
    let result = run_pad(port);
    disable_raw_mode()?;

    result
}

fn run_pad(mut port: Box<dyn serialport::SerialPort>) -> Result<(), Box<dyn std::error::Error>> {
    let mut throw_idx: usize = 0;

    // Persistent stick state
    let mut direction = DIR_UP;
    let mut radius: u8 = 0;
    let mut last_movement_input = Instant::now();

    loop {
        let mut buttons = 0u8;

        // Poll for a key with 20ms timeout (50Hz effective frame rate)
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;

                match code {
                    // Steering - update the stick and refresh the timestamp
                    KeyCode::Char('w') if pressed => {
                        direction = DIR_UP;
                        radius = THROW_STEPS[throw_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('s') if pressed => {
                        direction = DIR_DOWN;
                        radius = THROW_STEPS[throw_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('a') if pressed => {
                        direction = DIR_LEFT;
                        radius = THROW_STEPS[throw_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('d') if pressed => {
                        direction = DIR_RIGHT;
                        radius = THROW_STEPS[throw_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char(c) if pressed && ('1'..='3').contains(&c) => {
                        throw_idx = c as usize - '1' as usize;
                        info!("Throw step {}", throw_idx + 1);
                    }
                    KeyCode::Char(' ') if pressed => {
                        buttons |= EMERGENCY_STOP_BUTTON;
                    }
                    KeyCode::Char('q') if pressed => break,
                    _ => {}
                }
            }
        }

        // Center the stick when the movement keys go quiet
        if last_movement_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            radius = 0;
        }

        let frame = GamepadFrame::new(buttons, GamepadFrame::joystick_byte(direction, radius));
        port.write_all(&frame.encode())?;
        port.flush()?;
    }

    Ok(())
}
