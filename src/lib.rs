//!
//! This library opens a serial device node and prepares it for plain,
//! non-blocking reads at a fixed baud rate.
//!
//! <br>
//!
//! # Details
//!
//! - The device is opened read-only and never becomes the controlling
//!   terminal of the calling process.
//!
//! - Carrier detect is ignored and the receiver is enabled, so no hardware
//!   handshake is needed.
//!
//! - Basic setup
//!
//!   ```no_run
//!   use open_serial_port::PortConfig;
//!   fn main() -> open_serial_port::Result<()> {
//!       let port = PortConfig::default().open("/dev/ttyUSB0")?;
//!       eprintln!("Opened: {}", port.path().display());
//!       Ok(())
//!   }
//!   ```
//!
//! # Platforms
//!
//!  * Linux
//!  * Other Unix systems with termios
//!

pub mod port;

pub use port::{open_port, set_baud_rate, Port, PortConfig, PortError, Result, DEFAULT_BAUD_RATE};
