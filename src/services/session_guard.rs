use crate::error::Result;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Защита "один раз за сессию".
///
/// Файл-маркер лежит в `$XDG_RUNTIME_DIR`, который очищается при выходе из
/// сессии, поэтому повторный вызов (например, при перезагрузке конфигурации
/// оконного менеджера) ничего не запускает.
pub struct SessionGuard {
    marker: Option<PathBuf>,
}

impl SessionGuard {
    pub fn new(runtime_dir: Option<PathBuf>, name: &str) -> Self {
        let marker = runtime_dir.map(|dir| dir.join(format!("{}.session", name)));
        Self { marker }
    }

    /// Маркер в каталоге выполнения текущего пользователя
    pub fn from_env(name: &str) -> Self {
        Self::new(dirs::runtime_dir(), name)
    }

    pub fn marker_path(&self) -> Option<&Path> {
        self.marker.as_deref()
    }

    /// Был ли автозапуск уже выполнен в этой сессии (без побочных эффектов)
    pub fn is_acquired(&self) -> bool {
        self.marker.as_ref().is_some_and(|m| m.exists())
    }

    /// Атомарно создать маркер. `true` - первый запуск в сессии, `false` - уже запускались
    pub fn acquire(&self) -> Result<bool> {
        let Some(marker) = &self.marker else {
            warn!("XDG_RUNTIME_DIR не задан, защита от повторного запуска отключена");
            return Ok(true);
        };

        match OpenOptions::new().write(true).create_new(true).open(marker) {
            Ok(mut file) => {
                writeln!(file, "{}", std::process::id())?;
                debug!("Создан маркер сессии {:?}", marker);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Маркер сессии {:?} уже существует", marker);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_is_refused() {
        let dir = TempDir::new().unwrap();
        let guard = SessionGuard::new(Some(dir.path().to_path_buf()), "autostart-once");

        assert!(!guard.is_acquired());
        assert!(guard.acquire().unwrap());
        assert!(guard.is_acquired());
        assert!(!guard.acquire().unwrap());
        assert_eq!(
            guard.marker_path(),
            Some(dir.path().join("autostart-once.session").as_path())
        );
    }

    #[test]
    fn test_without_runtime_dir_always_first() {
        let guard = SessionGuard::new(None, "autostart-once");

        assert!(guard.marker_path().is_none());
        assert!(guard.acquire().unwrap());
        assert!(guard.acquire().unwrap());
        assert!(!guard.is_acquired());
    }

    #[test]
    fn test_unwritable_runtime_dir_is_error() {
        let dir = TempDir::new().unwrap();
        let guard = SessionGuard::new(Some(dir.path().join("missing")), "autostart-once");

        assert!(guard.acquire().is_err());
    }
}
