//! Shell adapters.

mod local;
mod recording;

pub use local::LocalShell;
pub use recording::RecordingShell;
