use nix::errno::Errno;
use nix::unistd::Pid;

use crate::request::Request;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single tracing request.
///
/// Carries the OS error code captured at the moment the kernel rejected the
/// call. Every failure is surfaced to the immediate caller; no error state is
/// shared between calls.
#[derive(thiserror::Error, Clone, Copy, Debug, Eq, PartialEq)]
#[error("{request} failed for pid {pid}: {errno}")]
pub struct Error {
    pub request: Request,
    pub pid: Pid,
    pub errno: Errno,
}

impl Error {
    /// True if the failure indicates the tracee no longer exists, or was
    /// never traced by us.
    pub fn tracee_died(&self) -> bool {
        self.errno == Errno::ESRCH
    }
}
