//! Session lifecycle: resolve, allocate, launch, relay, exit.

use crate::cli::{resolve_command, Cli};
use crate::error::BridgeError;
use crate::pty::{Pump, PtySession, SignalWatcher};
use crate::term::RawModeGuard;

/// Run one bridged session to completion and return the child's exit
/// code.
///
/// The target is resolved before anything touches the terminal: a
/// nonexistent command must never trigger a pseudo-terminal allocation
/// or a raw-mode switch. Raw mode in turn is entered only after the
/// child spawned, and the guard (plus its panic hook) restores the
/// outer terminal on every exit path.
pub fn run(cli: &Cli) -> Result<i32, BridgeError> {
    let program = resolve_command(&cli.command).ok_or_else(|| BridgeError::CommandNotFound {
        command: cli.command.clone(),
    })?;

    let size = PtySession::outer_size();
    let mut session = PtySession::spawn(&program, &cli.args, size)?;
    tracing::debug!(
        command = %program.display(),
        rows = size.rows,
        cols = size.cols,
        "child spawned"
    );

    let raw_guard = RawModeGuard::enter().map_err(BridgeError::Terminal)?;

    let reader = session.clone_reader()?;
    let writer = session.take_writer()?;
    let watcher = SignalWatcher::start(session.master(), session.process_id())?;
    let pump = Pump::start(reader, writer);

    // Child exit is the authoritative end of the session; the output
    // pump then drains to the master's end-of-stream on its own.
    let status = session.wait()?;
    drop(raw_guard);
    if let Some(watcher) = watcher {
        watcher.stop();
    }
    pump.drain();

    tracing::debug!(code = status.exit_code(), "child exited");
    Ok(status.exit_code() as i32)
}
