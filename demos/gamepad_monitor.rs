// Gamepad monitor: READ-ONLY view of the incoming frame stream
//
// Decodes and prints every gamepad frame arriving on the serial link
// without driving anything. Use this first to verify the Bluetooth module
// and the phone app are talking before letting the runtime near motors.
//
// Usage: cargo run --example gamepad_monitor -- [port]
// Example: cargo run --example gamepad_monitor -- /dev/ttyUSB0

use std::io::Read;

use trackbot_dabble_runtime::config::{DEFAULT_BAUD_RATE, EMERGENCY_STOP_BUTTON};
use trackbot_dabble_runtime::gamepad::FrameScanner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("debug".parse().unwrap()),
        )
        .init();

    // Without a port argument, list what's available and bail out.
    let port_name = match std::env::args().nth(1) {
        Some(port) => port,
        None => {
            println!("No serial port given. Available ports:");
            for info in serialport::available_ports()? {
                println!("  {}", info.port_name);
            }
            println!();
            println!("Usage: cargo run --example gamepad_monitor -- <port>");
            return Ok(());
        }
    };

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              Gamepad Monitor (READ-ONLY)                     ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  This tool only decodes frames - no motors, no movement      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Serial port: {} at {} baud", port_name, DEFAULT_BAUD_RATE);
    println!("Move the stick / press buttons in the Dabble gamepad module.");
    println!("Ctrl+C to quit.");
    println!();

    let mut port = serialport::new(port_name.as_str(), DEFAULT_BAUD_RATE)
        .timeout(std::time::Duration::from_millis(1000))
        .open()?;

    let mut scanner = FrameScanner::new();
    let mut byte = [0u8; 1];
    loop {
        match port.read(&mut byte) {
            Ok(0) => continue,
            Ok(_) => {
                if let Some(frame) = scanner.push(byte[0]) {
                    let estop = if frame.pressed(EMERGENCY_STOP_BUTTON) {
                        "  [EMERGENCY STOP]"
                    } else {
                        ""
                    };
                    println!(
                        "direction={:2}  radius={}  buttons={:#04X}{}",
                        frame.direction(),
                        frame.radius(),
                        frame.buttons,
                        estop
                    );
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
