//! Pseudo-terminal allocation and child launch.

use crate::error::BridgeError;
use portable_pty::{native_pty_system, Child, CommandBuilder, ExitStatus, MasterPty, PtySize};
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// A live master/slave pseudo-terminal pair with the child attached to
/// the slave end.
///
/// The master is the only handle the bridge keeps: the slave half is
/// dropped in the parent right after spawn so the master observes
/// end-of-stream once the child exits.
pub struct PtySession {
    master: Arc<Mutex<Box<dyn MasterPty + Send>>>,
    child: Box<dyn Child + Send + Sync>,
}

impl PtySession {
    /// Allocate a pseudo-terminal of the given size and start `program`
    /// on its slave end, inheriting the current working directory and
    /// environment.
    ///
    /// The child is spawned as the session leader of its own process
    /// group with the slave as its controlling terminal, so
    /// terminal-originated signals and window-size reports behave as for
    /// a directly launched interactive program.
    pub fn spawn(program: &Path, args: &[String], size: PtySize) -> Result<Self, BridgeError> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(size)
            .map_err(|source| BridgeError::Allocation { source })?;

        let mut cmd = CommandBuilder::new(program.as_os_str().to_owned());
        cmd.args(args.iter().cloned());
        cmd.cwd(std::env::current_dir()?);
        if std::env::var_os("TERM").is_none() {
            cmd.env("TERM", "xterm-256color");
        }

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|source| BridgeError::Launch {
                command: program.display().to_string(),
                source,
            })?;
        drop(pair.slave);

        Ok(Self {
            master: Arc::new(Mutex::new(pair.master)),
            child,
        })
    }

    /// Current dimensions of the outer terminal, falling back to 80×24
    /// when the output stream reports no size (e.g. redirected).
    pub fn outer_size() -> PtySize {
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        }
    }

    /// Shared handle to the master, used by the resize watcher.
    pub fn master(&self) -> Arc<Mutex<Box<dyn MasterPty + Send>>> {
        Arc::clone(&self.master)
    }

    /// Independent reader over the master for the output pump.
    pub fn clone_reader(&self) -> Result<Box<dyn Read + Send>, BridgeError> {
        let master = self.lock_master()?;
        master
            .try_clone_reader()
            .map_err(|source| BridgeError::Allocation { source })
    }

    /// The master's write half for the input pump. Can be taken once.
    pub fn take_writer(&self) -> Result<Box<dyn Write + Send>, BridgeError> {
        let master = self.lock_master()?;
        master
            .take_writer()
            .map_err(|source| BridgeError::Allocation { source })
    }

    /// OS process id of the child, when the platform exposes one.
    pub fn process_id(&self) -> Option<u32> {
        self.child.process_id()
    }

    /// Block until the child terminates and collect its exit status.
    pub fn wait(&mut self) -> Result<ExitStatus, BridgeError> {
        self.child.wait().map_err(BridgeError::Io)
    }

    fn lock_master(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Box<dyn MasterPty + Send>>, BridgeError> {
        self.master.lock().map_err(|_| {
            BridgeError::Io(io::Error::new(
                io::ErrorKind::Other,
                "master handle lock poisoned",
            ))
        })
    }
}
