//! Command-line surface and target resolution.

use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Run a program under a real pseudo-terminal, relaying all bytes
/// between it and the outer terminal.
#[derive(Debug, Parser)]
#[command(name = "ptybridge", version, about)]
pub struct Cli {
    /// Program to run on the slave end of the pseudo-terminal.
    pub command: String,

    /// Arguments forwarded to the program unmodified.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Resolve `command` against the process search path.
///
/// A command containing a path separator is taken as a direct path and
/// only checked for executability.
pub fn resolve_command(command: &str) -> Option<PathBuf> {
    resolve_command_in(command, std::env::var_os("PATH").as_deref())
}

fn resolve_command_in(command: &str, path: Option<&OsStr>) -> Option<PathBuf> {
    if command.contains(std::path::MAIN_SEPARATOR) {
        let candidate = PathBuf::from(command);
        return is_executable(&candidate).then_some(candidate);
    }

    let path = path?;
    std::env::split_paths(path)
        .map(|dir| dir.join(command))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
