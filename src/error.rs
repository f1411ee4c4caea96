//! Error types for the bridge.
//!
//! Every fatal error maps to a process exit code so the wrapper never
//! collides with the exit code space of the child it relays.

use std::io;
use thiserror::Error;

/// Errors that can occur while setting up or running a bridged session.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host provides no usable pseudo-terminal facility.
    #[error("failed to allocate a pseudo-terminal: {source}")]
    Allocation { source: anyhow::Error },

    /// The target program could not be resolved on the search path.
    #[error("command not found: {command}")]
    CommandNotFound { command: String },

    /// The target program resolved but could not be started.
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        source: anyhow::Error,
    },

    /// The outer terminal refused a mode switch.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    /// Any other I/O failure outside the relayed streams.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BridgeError {
    /// Exit code reported by the bridge process for this error.
    ///
    /// 127 and 126 follow the shell conventions for "not found" and
    /// "found but cannot execute", keeping the bridge transparent to
    /// scripts that inspect its exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Allocation { .. } => 2,
            BridgeError::CommandNotFound { .. } => 127,
            BridgeError::Launch { .. } => 126,
            BridgeError::Terminal(_) => 1,
            BridgeError::Io(_) => 1,
        }
    }
}
