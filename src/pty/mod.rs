mod pump;
mod session;
mod watcher;

pub use pump::Pump;
pub use session::PtySession;
pub use watcher::SignalWatcher;
