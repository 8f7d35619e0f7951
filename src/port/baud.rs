use std::os::fd::AsFd;

use log::{debug, warn};
use nix::sys::termios::{self, BaudRate, ControlFlags, SetArg, Termios};

use super::{PortError, Result};

/// Set input and output speed of the terminal behind `fd` to `rate`.
///
/// Also enables `CLOCAL` (ignore carrier detect) and `CREAD` (enable the
/// receiver). All other attributes are taken from the device as they are right
/// now. Pending input and output is discarded before the new settings take
/// effect.
pub fn set_baud_rate<Fd: AsFd>(fd: Fd, rate: BaudRate) -> Result<()> {
    let fd = fd.as_fd();

    let mut options = termios::tcgetattr(fd).map_err(PortError::GetAttributes)?;
    apply(&mut options, rate)?;
    termios::tcsetattr(fd, SetArg::TCSAFLUSH, &options).map_err(PortError::SetAttributes)?;

    // tcsetattr(3) reports success if any of the requested changes was made.
    confirm_applied(termios::tcgetattr(fd), rate);

    Ok(())
}

/// Write `rate` and the local/receiver control flags into `options`.
fn apply(options: &mut Termios, rate: BaudRate) -> Result<()> {
    // Most systems cannot run the two directions at different speeds.
    termios::cfsetispeed(options, rate).map_err(PortError::SetSpeed)?;
    termios::cfsetospeed(options, rate).map_err(PortError::SetSpeed)?;

    options.control_flags |= ControlFlags::CLOCAL | ControlFlags::CREAD;
    Ok(())
}

/// Check the attributes read back after applying. The device is configured at
/// this point, so problems are only logged.
fn confirm_applied(applied: nix::Result<Termios>, rate: BaudRate) -> bool {
    let applied = match applied {
        Ok(applied) => applied,
        Err(e) => {
            warn!("unable to read back terminal attributes: {}", e);
            return false;
        }
    };

    let (ispeed, ospeed) = (
        termios::cfgetispeed(&applied),
        termios::cfgetospeed(&applied),
    );
    if ispeed != rate || ospeed != rate {
        warn!(
            "requested {:?}, device runs at {:?} in / {:?} out",
            rate, ispeed, ospeed
        );
        return false;
    }

    debug!("baud rate set to {:?}", rate);
    true
}
