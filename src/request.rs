//! Request codes understood by the kernel tracing facility.

use std::fmt;

/// A `ptrace(2)` request code.
///
/// Closed set of the requests this crate issues. Each variant maps onto the
/// numeric constant passed as the first argument of the raw syscall.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Request {
    TraceMe,
    PeekText,
    PeekData,
    PeekUser,
    PokeText,
    PokeData,
    PokeUser,
    Continue,
    Syscall,
    SingleStep,
    Detach,
    Kill,
    Attach,
}

impl Request {
    pub const ALL: [Request; 13] = [
        Request::TraceMe,
        Request::PeekText,
        Request::PeekData,
        Request::PeekUser,
        Request::PokeText,
        Request::PokeData,
        Request::PokeUser,
        Request::Continue,
        Request::Syscall,
        Request::SingleStep,
        Request::Detach,
        Request::Kill,
        Request::Attach,
    ];

    /// True for requests whose return value is a word read from the tracee.
    ///
    /// For these, `-1` is a legitimate result, and failure can only be
    /// detected by inspecting `errno` after the call.
    pub fn returns_word(self) -> bool {
        matches!(self, Request::PeekText | Request::PeekData | Request::PeekUser)
    }

    pub(crate) fn into_raw(self) -> libc::c_uint {
        match self {
            Request::TraceMe => libc::PTRACE_TRACEME,
            Request::PeekText => libc::PTRACE_PEEKTEXT,
            Request::PeekData => libc::PTRACE_PEEKDATA,
            Request::PeekUser => libc::PTRACE_PEEKUSER,
            Request::PokeText => libc::PTRACE_POKETEXT,
            Request::PokeData => libc::PTRACE_POKEDATA,
            Request::PokeUser => libc::PTRACE_POKEUSER,
            Request::Continue => libc::PTRACE_CONT,
            Request::Syscall => libc::PTRACE_SYSCALL,
            Request::SingleStep => libc::PTRACE_SINGLESTEP,
            Request::Detach => libc::PTRACE_DETACH,
            Request::Kill => libc::PTRACE_KILL,
            Request::Attach => libc::PTRACE_ATTACH,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Request::TraceMe => "PTRACE_TRACEME",
            Request::PeekText => "PTRACE_PEEKTEXT",
            Request::PeekData => "PTRACE_PEEKDATA",
            Request::PeekUser => "PTRACE_PEEKUSER",
            Request::PokeText => "PTRACE_POKETEXT",
            Request::PokeData => "PTRACE_POKEDATA",
            Request::PokeUser => "PTRACE_POKEUSER",
            Request::Continue => "PTRACE_CONT",
            Request::Syscall => "PTRACE_SYSCALL",
            Request::SingleStep => "PTRACE_SINGLESTEP",
            Request::Detach => "PTRACE_DETACH",
            Request::Kill => "PTRACE_KILL",
            Request::Attach => "PTRACE_ATTACH",
        };

        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_codes_match_libc() {
        assert_eq!(Request::TraceMe.into_raw(), libc::PTRACE_TRACEME);
        assert_eq!(Request::PeekUser.into_raw(), libc::PTRACE_PEEKUSER);
        assert_eq!(Request::PokeData.into_raw(), libc::PTRACE_POKEDATA);
        assert_eq!(Request::SingleStep.into_raw(), libc::PTRACE_SINGLESTEP);
        assert_eq!(Request::Attach.into_raw(), libc::PTRACE_ATTACH);
    }

    #[test]
    fn only_peeks_return_words() {
        let words: Vec<_> = Request::ALL
            .iter()
            .copied()
            .filter(|request| request.returns_word())
            .collect();

        assert_eq!(
            words,
            vec![Request::PeekText, Request::PeekData, Request::PeekUser],
        );
    }
}
