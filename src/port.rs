use std::path::PathBuf;

use nix::errno::Errno;

pub mod baud;
pub mod config;
pub mod open;

#[cfg(test)]
pub mod fake;

pub use self::baud::set_baud_rate;
pub use self::config::{PortConfig, DEFAULT_BAUD_RATE};
pub use self::open::{open_port, Port};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortError {
    #[error("was unable to open \"{}\"", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: Errno,
    },

    #[error("was unable to set non-blocking mode on \"{}\"", path.display())]
    StatusFlags {
        path: PathBuf,
        #[source]
        source: Errno,
    },

    #[error("unable to read terminal attributes: {}", _0)]
    GetAttributes(#[source] Errno),
    #[error("unable to set baud rate: {}", _0)]
    SetSpeed(#[source] Errno),
    #[error("unable to apply terminal attributes: {}", _0)]
    SetAttributes(#[source] Errno),
}

impl PortError {
    /// Process exit status for this error: `2` when the device could not be
    /// opened, `3` when it was opened but could not be configured.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Open { .. } | Self::StatusFlags { .. } => 2,
            Self::GetAttributes(_) | Self::SetSpeed(_) | Self::SetAttributes(_) => 3,
        }
    }

    /// Underlying OS error.
    pub fn errno(&self) -> Errno {
        match self {
            Self::Open { source, .. } | Self::StatusFlags { source, .. } => *source,
            Self::GetAttributes(e) | Self::SetSpeed(e) | Self::SetAttributes(e) => *e,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortError>;
