use crate::config::RunnerConfig;
use crate::debug_if_enabled;
use crate::error::{AutostartError, Result};
use crate::records::{archived_file_name, LaunchRecord, LaunchTimestamp, RunStatus, RunSummary};
use crate::services::launcher::Launcher;
use crate::utils::CandidateFinder;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

/// Однократный запуск файлов из каталога с последующей архивацией в BACKUP
pub struct AutostartRunner {
    launcher: Box<dyn Launcher + Send + Sync>,
    launch_delay: Duration,
    backup_dir_name: String,
}

impl AutostartRunner {
    pub fn new(config: &RunnerConfig, launcher: Box<dyn Launcher + Send + Sync>) -> Self {
        info!(
            "Инициализация AutostartRunner (задержка: {} мс, архив: {})",
            config.launch_delay_ms, config.backup_dir_name
        );

        Self {
            launcher,
            launch_delay: Duration::from_millis(config.launch_delay_ms),
            backup_dir_name: config.backup_dir_name.clone(),
        }
    }

    /// Запустить все подходящие под `pattern` файлы из `directory` и переместить их в BACKUP.
    ///
    /// Отсутствующий каталог и недоступный BACKUP - не ошибки: проход молча
    /// пропускается, это видно только по [`RunStatus`]. Ошибка возвращается лишь
    /// для некорректного шаблона, до каких-либо действий с файлами. Сбой запуска
    /// или перемещения отдельного файла логируется и не прерывает проход.
    pub async fn run(&self, directory: &Path, pattern: &str) -> Result<RunSummary> {
        let finder = CandidateFinder::new(pattern)?;
        let mut summary = RunSummary::new(directory.to_path_buf());

        if !is_directory(directory).await {
            debug!("Каталог автозапуска {:?} не найден, пропускаем", directory);
            return Ok(summary.with_status(RunStatus::DirectoryMissing));
        }

        let backup_dir = directory.join(&self.backup_dir_name);
        if self.launcher.archives_launched() {
            if let Err(e) = ensure_backup_dir(&backup_dir).await {
                warn!("Каталог {:?} недоступен ({}), автозапуск отменён", backup_dir, e);
                return Ok(summary.with_status(RunStatus::BackupUnavailable));
            }
        }

        let candidates = match finder.snapshot(directory) {
            Ok(candidates) => candidates,
            Err(e) => {
                // Каталог пропал между проверкой и чтением
                warn!("Не удалось прочитать {:?}: {}", directory, e);
                return Ok(summary.with_status(RunStatus::DirectoryMissing));
            }
        };

        info!(
            "{:?}: найдено {} кандидатов по шаблону '{}'",
            directory,
            candidates.len(),
            finder.pattern()
        );

        for candidate in candidates {
            self.process_candidate(candidate, &backup_dir, &mut summary)
                .await;
        }

        Ok(summary)
    }

    async fn process_candidate(
        &self,
        candidate: PathBuf,
        backup_dir: &Path,
        summary: &mut RunSummary,
    ) {
        if !is_regular_file(&candidate).await {
            debug_if_enabled!("Не обычный файл, пропускаем: {:?}", candidate);
            summary.skipped += 1;
            return;
        }

        let pid = match self.launcher.launch(&candidate).await {
            Ok(pid) => pid,
            Err(e) => {
                // Файл остаётся на месте и будет повторён в следующей сессии
                warn!("Не удалось запустить {:?}: {}", candidate, e);
                summary.failed += 1;
                return;
            }
        };

        sleep(self.launch_delay).await;

        let record = LaunchRecord::new(candidate.clone(), pid);

        if !self.launcher.archives_launched() {
            summary.launched.push(record);
            return;
        }

        match archive(&candidate, backup_dir).await {
            Ok(archived) => {
                let record = record.with_archive(archived);
                info!("Запущен: {}", record);
                summary.launched.push(record);
            }
            Err(e) => {
                // Процесс уже запущен; без записи в BACKUP он стартует и в следующий раз
                error!("{}", e);
                summary.failed += 1;
                summary.launched.push(record);
            }
        }
    }
}

async fn is_directory(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false)
}

async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

/// "Уже существует" допустимо, только если это каталог
async fn ensure_backup_dir(backup_dir: &Path) -> std::io::Result<()> {
    match fs::create_dir(backup_dir).await {
        Ok(()) => {
            debug!("Создан каталог {:?}", backup_dir);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            if is_directory(backup_dir).await {
                Ok(())
            } else {
                Err(e)
            }
        }
        Err(e) => Err(e),
    }
}

/// Переместить файл в BACKUP под именем `<метка>_<имя>`; метка берётся в момент переименования
async fn archive(source: &Path, backup_dir: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().unwrap_or(source.as_os_str());
    let target = backup_dir.join(archived_file_name(&LaunchTimestamp::now(), file_name));

    fs::rename(source, &target)
        .await
        .map_err(|source_err| AutostartError::Archive {
            from: source.to_path_buf(),
            to: target.clone(),
            source: source_err,
        })?;

    Ok(target)
}
