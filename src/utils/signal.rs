//! SIGINT/SIGTERM handling.
//!
//! The first signal only sets a flag: the command currently running inside the
//! chroot receives the same signal from the terminal, and the runner refuses to
//! start the next one. A second signal restores the default handler and
//! re-raises so the process dies immediately.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

static SIGNAL_COUNT: AtomicUsize = AtomicUsize::new(0);

extern "C" fn handle_signal(sig: libc::c_int) {
    if SIGNAL_COUNT.fetch_add(1, Ordering::SeqCst) == 0 {
        INTERRUPTED.store(true, Ordering::SeqCst);

        let msg = b"\nInterrupt received, stopping after the current command...\n";
        unsafe {
            libc::write(2, msg.as_ptr() as *const libc::c_void, msg.len());
        }
    } else {
        let msg = b"\nForced exit - the target root may be partially configured\n";
        unsafe {
            libc::write(2, msg.as_ptr() as *const libc::c_void, msg.len());
            libc::signal(sig, libc::SIG_DFL);
            libc::raise(sig);
        }
    }
}

/// Install handlers for SIGINT and SIGTERM. Calling it twice is harmless.
pub fn install_signal_handlers() {
    for sig in [libc::SIGINT, libc::SIGTERM] {
        unsafe {
            libc::signal(sig, handle_signal as *const () as libc::sighandler_t);
        }
    }
}

/// Returns `true` once an interrupt signal has been received.
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}
