use super::Launcher;
use crate::error::{AutostartError, Result};
use crate::utils::permissions;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Запуск файла как отсоединённого процесса.
///
/// Стандартные потоки закрыты (`/dev/null`), дескрипторы родителя не
/// наследуются (Rust открывает их с O_CLOEXEC), процесс уходит в собственную
/// группу, чтобы сигналы сессии автозапуска его не задевали. Завершения не ждём:
/// `Child` сразу отбрасывается, зомби подбирает tokio.
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Launcher for ProcessLauncher {
    async fn launch(&self, path: &Path) -> Result<Option<u32>> {
        permissions::check_executable(path)?;

        // Без оболочки: единственный аргумент - сам путь, окружение наследуется
        let child = Command::new(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map_err(|source| AutostartError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;

        let pid = child.id();
        debug!("Процесс {:?} создан, pid {:?}", path, pid);
        drop(child);

        Ok(pid)
    }
}
