use clap::Parser;
use ptybridge::bridge;
use ptybridge::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match bridge::run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            // Diagnostics go to the bridge's own stderr, never to the
            // bridged pseudo-terminal.
            eprintln!("ptybridge: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

fn init_tracing() {
    // Quiet by default: anything on stderr competes with the bridged
    // session's own rendering.
    let filter =
        EnvFilter::try_from_env("PTYBRIDGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
