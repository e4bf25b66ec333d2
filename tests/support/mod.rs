#![allow(dead_code)]

use nix::sys::signal::{raise, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};

use nudge::Tracer;

/// Fork a child that declares itself traced, stops itself, then runs `body`
/// once resumed. The child never returns to the test harness.
pub fn fork_traced(body: fn() -> !) -> Pid {
    match unsafe { fork() }.expect("fork") {
        ForkResult::Child => {
            // Post-fork in a test binary: avoid allocation, exit raw on error.
            if Tracer::new().traceme().is_err() {
                unsafe { libc::_exit(101) };
            }

            if raise(Signal::SIGSTOP).is_err() {
                unsafe { libc::_exit(102) };
            }

            body()
        }
        ForkResult::Parent { child } => child,
    }
}

/// Block until `pid` reports a signal-stop, asserting the stopping signal.
pub fn expect_stop(pid: Pid, expected: Signal) {
    match waitpid(pid, None).expect("waitpid") {
        WaitStatus::Stopped(stopped, signal) => {
            assert_eq!(stopped, pid);
            assert_eq!(signal, expected);
        }
        status => panic!("expected stop with {expected}, got {status:?}"),
    }
}

/// Kill a stopped tracee and reap it, asserting SIGKILL termination.
pub fn kill_and_reap(tracer: &mut Tracer, pid: Pid) {
    tracer.kill(pid).expect("kill");

    match waitpid(pid, None).expect("waitpid") {
        WaitStatus::Signaled(_, Signal::SIGKILL, _) => {}
        status => panic!("expected SIGKILL termination, got {status:?}"),
    }
}

/// Tracee body that parks forever between signals.
pub fn sleep_forever() -> ! {
    loop {
        unsafe {
            libc::pause();
        }
    }
}

/// Tracee body that spins on a real syscall.
pub fn spin_on_syscalls() -> ! {
    loop {
        unsafe {
            libc::getpid();
        }
    }
}
