use std::path::Path;

use nix::sys::termios::BaudRate;

use super::{open_port, Port, Result};

/// Baud rate applied when nothing else is configured.
pub const DEFAULT_BAUD_RATE: BaudRate = BaudRate::B115200;

/// Settings used when opening and configuring a port.
///
/// `PortConfig::default()` reproduces the behaviour of the command line tool:
/// 115200 baud, opened without waiting for carrier detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    /// Rate for both the input and the output direction.
    pub baud_rate: BaudRate,
    /// Pass `O_NONBLOCK` to `open(2)` so opening does not wait for DCD.
    ///
    /// The descriptor is switched to non-blocking reads after opening either
    /// way; this only affects the open call itself.
    pub nonblocking_open: bool,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            nonblocking_open: true,
        }
    }
}

impl PortConfig {
    pub fn new(baud_rate: BaudRate) -> Self {
        Self {
            baud_rate,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn nonblocking_open(mut self, enabled: bool) -> Self {
        self.nonblocking_open = enabled;
        self
    }

    /// Open `path` and apply this configuration to it.
    ///
    /// On a configuration failure the descriptor is closed again before the
    /// error is returned.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Port> {
        let port = open_port(path, self)?;
        port.configure(self)?;
        Ok(port)
    }
}
