use super::launch::LaunchRecord;
use std::fmt;
use std::path::PathBuf;

/// Чем закончился проход по каталогу
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunStatus {
    #[default]
    Completed,
    /// Каталога нет или это не каталог, ничего не делали
    DirectoryMissing,
    /// Не удалось подготовить каталог BACKUP, ничего не запускали
    BackupUnavailable,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub directory: PathBuf,
    pub status: RunStatus,
    pub launched: Vec<LaunchRecord>,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: RunStatus) -> Self {
        self.status = status;
        self
    }

    pub fn launched_count(&self) -> usize {
        self.launched.len()
    }

    pub fn archived_count(&self) -> usize {
        self.launched.iter().filter(|r| r.is_archived()).count()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            RunStatus::DirectoryMissing => {
                write!(f, "{}: каталог отсутствует, пропущен", self.directory.display())
            }
            RunStatus::BackupUnavailable => {
                write!(
                    f,
                    "{}: каталог BACKUP недоступен, автозапуск отменён",
                    self.directory.display()
                )
            }
            RunStatus::Completed => write!(
                f,
                "{}: запущено {}, архивировано {}, пропущено {}, ошибок {}",
                self.directory.display(),
                self.launched_count(),
                self.archived_count(),
                self.skipped,
                self.failed
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut summary = RunSummary::new(PathBuf::from("/tmp/auto"));
        summary.launched.push(LaunchRecord::new(PathBuf::from("/tmp/auto/a"), Some(1)));
        summary.launched.push(
            LaunchRecord::new(PathBuf::from("/tmp/auto/b"), Some(2))
                .with_archive(PathBuf::from("/tmp/auto/BACKUP/1.0_b")),
        );
        summary.failed = 1;

        assert_eq!(summary.launched_count(), 2);
        assert_eq!(summary.archived_count(), 1);
        assert_eq!(
            summary.to_string(),
            "/tmp/auto: запущено 2, архивировано 1, пропущено 0, ошибок 1"
        );
    }

    #[test]
    fn test_skipped_status_display() {
        let summary =
            RunSummary::new(PathBuf::from("/nope")).with_status(RunStatus::DirectoryMissing);
        assert_eq!(summary.status, RunStatus::DirectoryMissing);
        assert!(summary.to_string().contains("отсутствует"));

        let summary =
            RunSummary::new(PathBuf::from("/tmp/auto")).with_status(RunStatus::BackupUnavailable);
        assert_eq!(
            summary.to_string(),
            "/tmp/auto: каталог BACKUP недоступен, автозапуск отменён"
        );
    }
}
