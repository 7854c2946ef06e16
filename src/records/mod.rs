pub mod launch;
pub mod summary;

pub use launch::{archived_file_name, LaunchRecord, LaunchTimestamp};
pub use summary::{RunStatus, RunSummary};
