use crate::error::Result;
use std::path::Path;

/// Trait for launchers that can run in different modes
#[async_trait::async_trait]
pub trait Launcher {
    /// Start `path` as a detached process and return its pid when one exists
    async fn launch(&self, path: &Path) -> Result<Option<u32>>;

    /// Whether launched files should be moved to BACKUP afterwards
    fn archives_launched(&self) -> bool {
        true
    }
}

/// Factory function to create an appropriate launcher based on the dry_run flag
pub fn create_launcher(dry_run: bool) -> Box<dyn Launcher + Send + Sync> {
    if dry_run {
        Box::new(super::DryRunLauncher::new())
    } else {
        Box::new(super::ProcessLauncher::new())
    }
}
