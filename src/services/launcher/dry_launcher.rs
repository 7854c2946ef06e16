use super::Launcher;
use crate::error::Result;
use std::path::Path;
use tracing::info;

pub struct DryRunLauncher;

impl DryRunLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Launcher for DryRunLauncher {
    async fn launch(&self, path: &Path) -> Result<Option<u32>> {
        info!("Dry-run: был бы запущен {:?}", path);
        Ok(None)
    }

    fn archives_launched(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_dry_run_spawns_nothing() {
        let launcher = DryRunLauncher::new();
        let pid = launcher
            .launch(&PathBuf::from("/definitely/not/here"))
            .await
            .unwrap();

        assert_eq!(pid, None);
        assert!(!launcher.archives_launched());
    }
}
