//! Signal-driven session upkeep: window-size propagation and forwarding
//! of termination signals to the child's process group.
//!
//! A single thread consumes the signal stream, so resize applications
//! are serialized in delivery order and the last observed size wins.

use crate::error::BridgeError;
use portable_pty::MasterPty;
use std::sync::{Arc, Mutex};

#[cfg(unix)]
use portable_pty::PtySize;
#[cfg(unix)]
use crossterm::terminal::size as terminal_size;
#[cfg(unix)]
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGWINCH};
#[cfg(unix)]
use signal_hook::iterator::Signals;
#[cfg(unix)]
use std::thread;

pub struct SignalWatcher {
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: thread::JoinHandle<()>,
}

impl SignalWatcher {
    /// Subscribe to the session's signals.
    ///
    /// `SIGWINCH` re-reads the outer terminal size and applies it to the
    /// master. `SIGINT`/`SIGTERM`/`SIGHUP` delivered to the bridge are
    /// forwarded to the child's process group; the relay keeps running
    /// until the child actually exits, so the child decides the final
    /// exit code. Returns `None` on platforms without unix signals.
    pub fn start(
        master: Arc<Mutex<Box<dyn MasterPty + Send>>>,
        child_pid: Option<u32>,
    ) -> Result<Option<Self>, BridgeError> {
        #[cfg(unix)]
        {
            let mut signals =
                Signals::new([SIGWINCH, SIGINT, SIGTERM, SIGHUP]).map_err(BridgeError::Io)?;
            let handle = signals.handle();
            let thread = thread::spawn(move || {
                for signal in signals.forever() {
                    match signal {
                        SIGWINCH => {
                            let (cols, rows) = match terminal_size() {
                                Ok(size) => size,
                                Err(_) => continue,
                            };
                            let size = PtySize {
                                rows,
                                cols,
                                pixel_width: 0,
                                pixel_height: 0,
                            };
                            if let Ok(master) = master.lock() {
                                if master.resize(size).is_ok() {
                                    tracing::debug!(rows, cols, "window size propagated");
                                }
                            }
                        }
                        _ => {
                            // The child is its session leader, so its pid
                            // names its process group.
                            if let Some(pid) = child_pid {
                                tracing::debug!(signal, pid, "forwarding signal to child");
                                unsafe {
                                    let _ = libc::killpg(pid as libc::pid_t, signal);
                                }
                            }
                        }
                    }
                }
            });
            return Ok(Some(Self { handle, thread }));
        }

        #[cfg(not(unix))]
        {
            let _ = (master, child_pid);
            Ok(None)
        }
    }

    pub fn stop(self) {
        #[cfg(unix)]
        {
            self.handle.close();
            let _ = self.thread.join();
        }
    }
}
