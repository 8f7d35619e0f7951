use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd, RawFd};
use std::path::{Path, PathBuf};

use log::debug;
use nix::fcntl::{self, FcntlArg, OFlag};
use nix::sys::stat::Mode;

use super::{set_baud_rate, PortConfig, PortError, Result};

/// An open serial device.
///
/// The descriptor is closed when the `Port` is dropped. Use
/// [`Port::into_raw_fd`] to hand it over to someone else instead, e.g. a
/// parent shell that reads the number from stdout.
#[derive(Debug)]
pub struct Port {
    fd: OwnedFd,
    path: PathBuf,
}

impl Port {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply the baud rate of `config` to the device.
    pub fn configure(&self, config: &PortConfig) -> Result<()> {
        debug!(
            "configuring {} for {:?}",
            self.path.display(),
            config.baud_rate
        );
        set_baud_rate(&self.fd, config.baud_rate)
    }
}

impl AsFd for Port {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl AsRawFd for Port {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl IntoRawFd for Port {
    fn into_raw_fd(self) -> RawFd {
        self.fd.into_raw_fd()
    }
}

/// Open the device at `path` for reading.
///
/// The device never becomes the controlling terminal of this process, so
/// keyboard signals arriving on it are not delivered to us. With
/// `config.nonblocking_open` the call does not sleep until DCD is asserted.
/// After opening, the descriptor is put into non-blocking mode so a read with
/// no pending data returns immediately.
pub fn open_port(path: impl AsRef<Path>, config: &PortConfig) -> Result<Port> {
    let path = path.as_ref();

    let mut flags = OFlag::O_RDONLY | OFlag::O_NOCTTY;
    if config.nonblocking_open {
        flags |= OFlag::O_NONBLOCK;
    }

    let raw = fcntl::open(path, flags, Mode::empty()).map_err(|source| PortError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    // SAFETY: `raw` was just returned by open(2) and is owned by nobody else.
    let fd = unsafe { OwnedFd::from_raw_fd(raw) };

    // Replaces the file status flags; the access mode is not affected.
    fcntl::fcntl(fd.as_raw_fd(), FcntlArg::F_SETFL(OFlag::O_NONBLOCK)).map_err(|source| {
        PortError::StatusFlags {
            path: path.to_path_buf(),
            source,
        }
    })?;

    debug!("opened {} as fd {}", path.display(), fd.as_raw_fd());

    Ok(Port {
        fd,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::fake::VirtualPort;
    use nix::errno::Errno;

    fn status_flags(port: &Port) -> OFlag {
        OFlag::from_bits_truncate(fcntl::fcntl(port.as_raw_fd(), FcntlArg::F_GETFL).unwrap())
    }

    #[test]
    fn test_open_missing_device() {
        let err = open_port("/dev/does-not-exist", &PortConfig::default()).unwrap_err();
        match err {
            PortError::Open { path, source } => {
                assert_eq!(path, Path::new("/dev/does-not-exist"));
                assert_eq!(source, Errno::ENOENT);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_pty() {
        let pty = VirtualPort::new();
        let port = open_port(pty.path(), &PortConfig::default()).unwrap();

        assert!(port.as_raw_fd() >= 0);
        assert_eq!(port.path(), pty.path());

        let flags = status_flags(&port);
        assert!(flags.contains(OFlag::O_NONBLOCK));
        assert_eq!(flags & OFlag::O_ACCMODE, OFlag::O_RDONLY);
    }

    #[test]
    fn test_nonblocking_after_blocking_open() {
        let pty = VirtualPort::new();
        let config = PortConfig::default().nonblocking_open(false);
        let port = open_port(pty.path(), &config).unwrap();

        assert!(status_flags(&port).contains(OFlag::O_NONBLOCK));
    }

    #[test]
    fn test_read_returns_immediately() {
        let pty = VirtualPort::new();
        let port = open_port(pty.path(), &PortConfig::default()).unwrap();

        let mut buf = [0u8; 16];
        let res = nix::unistd::read(port.as_raw_fd(), &mut buf);
        assert_eq!(res, Err(Errno::EAGAIN));
    }

    #[test]
    fn test_into_raw_fd_keeps_descriptor_open() {
        let pty = VirtualPort::new();
        let port = open_port(pty.path(), &PortConfig::default()).unwrap();

        let raw = port.into_raw_fd();
        assert!(fcntl::fcntl(raw, FcntlArg::F_GETFD).is_ok());

        // SAFETY: ownership of `raw` was released by `into_raw_fd` above.
        drop(unsafe { OwnedFd::from_raw_fd(raw) });
    }
}
