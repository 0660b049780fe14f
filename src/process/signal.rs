use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use libc::{sighandler_t, SIGINT, SIGTSTP, SIG_DFL, SIG_ERR, SIG_IGN};
use signal_hook::low_level;
use signal_hook::SigId;
use tracing::{debug, trace};

use super::ProcessError;

/// Owns the shell's own signal dispositions.
///
/// SIGINT is ignored by the shell. SIGTSTP only bumps a counter; the control
/// loop drains it with [`SignalCoordinator::take_toggles`] and does the
/// printing itself.
pub struct SignalCoordinator {
    toggles: Arc<AtomicUsize>,
    stop_handler: SigId,
}

impl SignalCoordinator {
    pub fn install() -> Result<Self, ProcessError> {
        ignore_interrupt()?;

        let toggles = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&toggles);
        // The action runs in signal context: a single atomic add, nothing else.
        let stop_handler = unsafe {
            low_level::register(SIGTSTP, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        }
        .map_err(ProcessError::Signal)?;

        debug!("signal dispositions installed");
        Ok(Self {
            toggles,
            stop_handler,
        })
    }

    /// Re-asserts the ignore disposition for SIGINT.
    pub fn ignore_interrupt(&self) -> Result<(), ProcessError> {
        ignore_interrupt()
    }

    /// Number of stop signals delivered since the last call.
    pub fn take_toggles(&self) -> usize {
        let pending = self.toggles.swap(0, Ordering::SeqCst);
        if pending > 0 {
            trace!(pending, "drained stop signals");
        }
        pending
    }
}

impl Drop for SignalCoordinator {
    fn drop(&mut self) {
        low_level::unregister(self.stop_handler);
    }
}

fn set_disposition(signal: libc::c_int, handler: sighandler_t) -> io::Result<()> {
    if unsafe { libc::signal(signal, handler) } == SIG_ERR {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

pub fn ignore_interrupt() -> Result<(), ProcessError> {
    set_disposition(SIGINT, SIG_IGN).map_err(ProcessError::Signal)
}

/// Dispositions for a freshly forked child, run between fork and exec.
///
/// Ctrl-C kills the child again; the stop key stays with the shell.
/// Only async-signal-safe calls are allowed here.
pub fn child_dispositions() -> io::Result<()> {
    set_disposition(SIGINT, SIG_DFL)?;
    set_disposition(SIGTSTP, SIG_IGN)
}

/// Delivers SIGTSTP to the shell itself, as the terminal would outside raw mode.
pub fn request_mode_toggle() -> io::Result<()> {
    low_level::raise(SIGTSTP)
}

/// Sends SIGINT to every process in the shell's process group.
pub fn interrupt_process_group() -> Result<(), ProcessError> {
    if unsafe { libc::kill(0, SIGINT) } == -1 {
        return Err(ProcessError::Signal(io::Error::last_os_error()));
    }
    Ok(())
}
