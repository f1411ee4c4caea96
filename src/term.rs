//! Outer terminal mode management.
//!
//! The guard owns the cooked→raw transition for the session. Restoration
//! runs through a single take-once cleanup slot so it happens exactly once
//! whether the session ends normally, errors out, or panics.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, IsTerminal};
use std::sync::{Arc, Mutex};

type Cleanup = Arc<Mutex<Option<Box<dyn FnOnce() + Send + 'static>>>>;

pub struct RawModeGuard {
    cleanup: Cleanup,
}

impl RawModeGuard {
    /// Switch the outer terminal to raw mode.
    ///
    /// Returns `Ok(None)` when stdin is not an interactive terminal: that
    /// is a normal configuration (input piped in), and no mode switch of
    /// any kind happens for it.
    pub fn enter() -> io::Result<Option<Self>> {
        if !io::stdin().is_terminal() {
            return Ok(None);
        }

        enable_raw_mode()?;
        let guard = Self::with_cleanup(|| {
            if let Err(err) = disable_raw_mode() {
                tracing::warn!("failed to restore terminal mode: {err}");
            }
        });
        guard.install_panic_hook();
        Ok(Some(guard))
    }

    fn with_cleanup<F: FnOnce() + Send + 'static>(cleanup: F) -> Self {
        Self {
            cleanup: Arc::new(Mutex::new(Some(Box::new(cleanup)))),
        }
    }

    /// Run restoration from the panic path as well, so an unwinding
    /// bridge never leaves the outer terminal in raw mode.
    fn install_panic_hook(&self) {
        let cleanup = Arc::clone(&self.cleanup);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Ok(mut slot) = cleanup.lock() {
                if let Some(cleanup) = slot.take() {
                    cleanup();
                }
            }
            default_hook(info);
        }));
    }

    fn restore(&self) {
        if let Ok(mut slot) = self.cleanup.lock() {
            if let Some(cleanup) = slot.take() {
                cleanup();
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn restore_runs_exactly_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&count);
        let guard = RawModeGuard::with_cleanup(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        guard.restore();
        guard.restore();
        drop(guard);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_restores_when_not_restored_explicitly() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&count);
        drop(RawModeGuard::with_cleanup(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
