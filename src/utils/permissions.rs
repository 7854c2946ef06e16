use crate::autostart_error;
use crate::error::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::{info, warn};

/// Проверить, что файл можно запустить напрямую (есть хотя бы один бит x)
pub fn check_executable(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)?;
    let mode = metadata.permissions().mode();

    if mode & 0o111 == 0 {
        return Err(autostart_error!(
            permission,
            "{:?} не является исполняемым (права {:o}). Выполните: chmod +x {}",
            path,
            mode & 0o777,
            path.display()
        ));
    }

    Ok(())
}

/// Предупредить, если автозапуск выполняется от root: все программы унаследуют его права
pub fn check_not_root() {
    // Проверяем переменную окружения USER
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Автозапуск выполняется от имени root!");
            warn!("   Все запущенные программы получат права root");
            warn!("   Запускайте оконный менеджер от имени обычного пользователя");
        }
        Ok(user) => {
            info!("Автозапуск от имени пользователя: {}", user);
        }
        Err(_) => {
            warn!("Не удалось определить пользователя");
        }
    }
}
