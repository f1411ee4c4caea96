//! The bidirectional relay between the master and the bridge's stdio.
//!
//! One thread per direction, each a plain blocking copy loop. Bytes
//! within a direction keep source order; the directions are independent
//! streams with no interleaving requirement between them.

use std::io::{self, Read, Write};
use std::thread;

pub struct Pump {
    output: Option<thread::JoinHandle<()>>,
}

impl Pump {
    /// Start both directional copy threads.
    ///
    /// The output thread drains the master until end-of-stream; a read
    /// error on a master whose child has gone away (EIO) counts as
    /// end-of-stream. The input thread may stay parked in a stdin read
    /// nobody will satisfy, so it is abandoned at process exit rather
    /// than joined; child exit, not outer input, ends the session.
    pub fn start(reader: Box<dyn Read + Send>, writer: Box<dyn Write + Send>) -> Self {
        let output = thread::spawn(move || {
            relay_output(reader, io::stdout());
        });

        thread::spawn(move || {
            relay_input(io::stdin(), writer);
        });

        Self {
            output: Some(output),
        }
    }

    /// Block until the child side reached end-of-stream and everything
    /// it wrote has been flushed to the outer output stream.
    pub fn drain(mut self) {
        if let Some(handle) = self.output.take() {
            let _ = handle.join();
        }
    }
}

fn relay_output(mut reader: impl Read, mut writer: impl Write) {
    let _ = io::copy(&mut reader, &mut writer);
    let _ = writer.flush();
}

fn relay_input(mut reader: impl Read, mut writer: impl Write) {
    let mut buffer = [0u8; 1024];
    loop {
        let read_bytes = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(count) => count,
            Err(_) => break,
        };
        if writer.write_all(&buffer[..read_bytes]).is_err() {
            break;
        }
        if writer.flush().is_err() {
            break;
        }
    }
}
