// Gamepad input handling for the serial link
//
// Provides:
// - Dabble gamepad-module wire protocol (constants, field extraction,
//   frame encoding)
// - Sliding-window frame recovery from the raw byte stream

pub mod dabble;
mod framer;

pub use dabble::GamepadFrame;
pub use framer::FrameScanner;
