//! The single choke point through which every tracing request reaches the
//! kernel, and the classification of its raw results.

use nix::errno::Errno;
use nix::unistd::Pid;
use tracing::trace;

use crate::error::{Error, Result};
use crate::request::Request;

/// Machine word, the unit of every transfer to or from a tracee.
///
/// Exactly one word moves per call. Callers wanting a byte range issue a
/// series of word transfers and mask the edges themselves.
pub type Word = libc::c_long;

/// A location in a tracee's text or data space, or a byte offset into its
/// user area, depending on the request. Never validated on this side of the
/// syscall boundary.
pub type Addr = libc::c_long;

/// Raw result of one kernel call: the value the kernel returned, and the
/// error code observed immediately after the call, if one was set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawOutcome {
    pub value: Word,
    pub errno: Option<Errno>,
}

/// Backend that executes tracing requests.
///
/// [`Linux`] issues the real syscall. Tests substitute scripted or simulated
/// backends to exercise classification without a live tracee.
pub trait Kernel {
    /// Issue exactly one tracing request. Unused argument positions are zero.
    fn trace(&mut self, request: Request, pid: Pid, addr: Addr, data: Word) -> RawOutcome;
}

/// The real `ptrace(2)` syscall.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Linux;

impl Kernel for Linux {
    fn trace(&mut self, request: Request, pid: Pid, addr: Addr, data: Word) -> RawOutcome {
        // Clear errno first, so that whatever is set after the call belongs
        // to this call alone.
        Errno::clear();

        // SAFETY: `addr` and `data` are opaque on this side of the boundary.
        // The kernel resolves them against the tracee and reports rejections
        // through the return value and errno.
        let value = unsafe { libc::ptrace(request.into_raw(), pid.as_raw(), addr, data) };

        let errno = match Errno::last() {
            Errno::UnknownErrno => None,
            errno => Some(errno),
        };

        RawOutcome { value, errno }
    }
}

/// Turn a raw outcome into a typed result.
///
/// The kernel reports failure by returning `-1`, but for the peek requests
/// `-1` is also a legitimate word read from the tracee. Those are told apart
/// by the error code captured after the call, never by the return value
/// alone. No other request legitimately returns `-1`, so for them the
/// sentinel decides by itself, regardless of any errno residue.
pub(crate) fn classify(request: Request, pid: Pid, raw: RawOutcome) -> Result<Word> {
    let failed = if request.returns_word() {
        raw.value == -1 && raw.errno.is_some()
    } else {
        raw.value == -1
    };

    trace!(
        %request,
        pid = pid.as_raw(),
        value = raw.value,
        errno = ?raw.errno,
        failed,
        "ptrace",
    );

    if failed {
        let errno = raw.errno.unwrap_or(Errno::UnknownErrno);
        return Err(Error { request, pid, errno });
    }

    Ok(raw.value)
}
