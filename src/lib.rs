//! Low-level operations over the Linux `ptrace(2)` facility.
//!
//! Every operation funnels through a single syscall gateway that tells the
//! kernel's `-1` error sentinel apart from a legitimate `-1` word read from
//! the tracee. Spawning tracees and waiting for their stops are left to the
//! caller.
//!
//! ```no_run
//! use nudge::{Pid, Tracer};
//!
//! # fn main() -> nudge::Result<()> {
//! let mut tracer = Tracer::new();
//! let pid = Pid::from_raw(1234);
//!
//! tracer.attach(pid)?;
//! // ... observe the attach-stop via waitpid(2) ...
//! let word = tracer.peek_data(pid, 0x1000)?;
//! tracer.poke_data(pid, 0x1000, word | 1)?;
//! tracer.detach(pid, None)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod gateway;
pub mod request;
pub mod tracer;

pub use error::{Error, Result};
pub use gateway::{Addr, Kernel, Linux, RawOutcome, Word};
pub use request::Request;
pub use tracer::{Pid, Signal, Tracer};
