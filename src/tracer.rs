//! Operations for attaching to, inspecting, and resuming traced processes.

use tracing::debug;

use crate::error::Result;
use crate::gateway::{self, Addr, Kernel, Linux, Word};
use crate::request::Request;

pub use nix::unistd::Pid;

/// POSIX signal, delivered to a tracee on resume when given.
pub use nix::sys::signal::Signal;

/// Interface to the kernel tracing facility.
///
/// A `Tracer` holds no per-process state. Every call stands alone, and the
/// kernel is the sole authority on whether a pid is traced, stopped, or gone:
/// nothing is validated on this side, and kernel rejections surface as
/// [`Error`](crate::Error) values carrying the captured error code.
///
/// Memory and user-area operations are only well-defined while the tracee is
/// in a ptrace-stop. None of the resume operations wait for the next stop;
/// observe stops through `waitpid(2)` or an equivalent facility.
///
/// Any operation may block inside the kernel (a peek can fault in a page),
/// but only on the calling thread. Note that once a tracee is attached, the
/// kernel expects subsequent requests for it to come from the attaching
/// thread.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tracer<K = Linux> {
    kernel: K,
}

impl Tracer {
    /// A tracer backed by the real syscall.
    pub fn new() -> Self {
        Self { kernel: Linux }
    }
}

impl<K: Kernel> Tracer<K> {
    /// A tracer backed by a custom [`Kernel`], e.g. a simulated one in tests.
    pub fn with_kernel(kernel: K) -> Self {
        Self { kernel }
    }

    fn call(&mut self, request: Request, pid: Pid, addr: Addr, data: Word) -> Result<Word> {
        let raw = self.kernel.trace(request, pid, addr, data);
        gateway::classify(request, pid, raw)
    }

    fn resume(
        &mut self,
        request: Request,
        pid: Pid,
        signal: impl Into<Option<Signal>>,
    ) -> Result<()> {
        let data = signal.into().map_or(0, |signal| signal as Word);
        self.call(request, pid, 0, data)?;
        Ok(())
    }

    /// Mark the calling process as traced by its parent.
    ///
    /// Only meaningful in the process that is about to become the tracee,
    /// before it replaces its program image.
    pub fn traceme(&mut self) -> Result<()> {
        self.call(Request::TraceMe, Pid::from_raw(0), 0, 0)?;
        Ok(())
    }

    /// Attach to a running process, stopping it.
    ///
    /// **Warning:** the tracee may not be considered stopped until the
    /// attach-stop has been observed via `waitpid(2)`.
    pub fn attach(&mut self, pid: Pid) -> Result<()> {
        debug!(pid = pid.as_raw(), "attaching");

        self.call(Request::Attach, pid, 0, 0)?;
        Ok(())
    }

    /// Detach from a stopped tracee and resume it, delivering `signal` if
    /// one is given.
    pub fn detach(&mut self, pid: Pid, signal: impl Into<Option<Signal>>) -> Result<()> {
        debug!(pid = pid.as_raw(), "detaching");

        self.resume(Request::Detach, pid, signal)
    }

    /// Terminate a stopped tracee.
    pub fn kill(&mut self, pid: Pid) -> Result<()> {
        debug!(pid = pid.as_raw(), "killing tracee");

        self.call(Request::Kill, pid, 0, 0)?;
        Ok(())
    }

    /// Read one word from the tracee's text space.
    ///
    /// May block inside the kernel while the page is faulted in.
    pub fn peek_text(&mut self, pid: Pid, addr: Addr) -> Result<Word> {
        self.call(Request::PeekText, pid, addr, 0)
    }

    /// Read one word from the tracee's data space.
    ///
    /// May block inside the kernel while the page is faulted in.
    pub fn peek_data(&mut self, pid: Pid, addr: Addr) -> Result<Word> {
        self.call(Request::PeekData, pid, addr, 0)
    }

    /// Read one word from the tracee's user area, at a byte offset.
    ///
    /// The user area exposes the tracee's register file and related control
    /// state; it is addressed by offset, not by virtual address.
    pub fn peek_user(&mut self, pid: Pid, offset: Addr) -> Result<Word> {
        self.call(Request::PeekUser, pid, offset, 0)
    }

    /// Write one word into the tracee's text space.
    pub fn poke_text(&mut self, pid: Pid, addr: Addr, word: Word) -> Result<()> {
        self.call(Request::PokeText, pid, addr, word)?;
        Ok(())
    }

    /// Write one word into the tracee's data space.
    pub fn poke_data(&mut self, pid: Pid, addr: Addr, word: Word) -> Result<()> {
        self.call(Request::PokeData, pid, addr, word)?;
        Ok(())
    }

    /// Write one word into the tracee's user area, at a byte offset.
    ///
    /// The kernel rejects offsets and values it considers unsafe to change.
    pub fn poke_user(&mut self, pid: Pid, offset: Addr, word: Word) -> Result<()> {
        self.call(Request::PokeUser, pid, offset, word)?;
        Ok(())
    }

    /// Resume a stopped tracee until the next stop-inducing event,
    /// delivering `signal` if one is given.
    pub fn cont(&mut self, pid: Pid, signal: impl Into<Option<Signal>>) -> Result<()> {
        self.resume(Request::Continue, pid, signal)
    }

    /// Resume a stopped tracee, stopping again at the next entry to or exit
    /// from a system call.
    pub fn syscall(&mut self, pid: Pid, signal: impl Into<Option<Signal>>) -> Result<()> {
        self.resume(Request::Syscall, pid, signal)
    }

    /// Resume a stopped tracee for exactly one machine instruction, then
    /// stop.
    pub fn singlestep(&mut self, pid: Pid, signal: impl Into<Option<Signal>>) -> Result<()> {
        self.resume(Request::SingleStep, pid, signal)
    }
}
