use std::os::fd::{AsRawFd, OwnedFd};
use std::path::{Path, PathBuf};

use nix::pty::{openpty, OpenptyResult};

/// A pseudo terminal pair standing in for a serial adapter.
///
/// Both ends stay open for the lifetime of the value, so the slave device node
/// can be opened by path and its termios inspected afterwards.
pub(crate) struct VirtualPort {
    _master: OwnedFd,
    slave: OwnedFd,
    path: PathBuf,
}

impl VirtualPort {
    pub(crate) fn new() -> Self {
        let OpenptyResult { master, slave } =
            openpty(None, None).expect("Unable to allocate pseudo terminal");
        let path = std::fs::read_link(format!("/proc/self/fd/{}", slave.as_raw_fd()))
            .expect("Unable to resolve pseudo terminal path");

        Self {
            _master: master,
            slave,
            path,
        }
    }

    pub(crate) fn slave(&self) -> &OwnedFd {
        &self.slave
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
