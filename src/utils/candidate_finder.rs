use crate::autostart_error;
use crate::debug_if_enabled;
use crate::error::{AutostartError, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Отбор файлов-кандидатов на автозапуск внутри одного каталога
pub struct CandidateFinder {
    pattern: String,
    matcher: GlobMatcher,
}

impl CandidateFinder {
    /// Компилирует glob-шаблон. Шаблон применяется к имени файла, а не к пути;
    /// `*` не захватывает `/`.
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(autostart_error!(invalid_pattern, "пустой шаблон"));
        }

        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| AutostartError::glob(pattern, e))?
            .compile_matcher();

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, file_name: &OsStr) -> bool {
        self.matcher.is_match(Path::new(file_name))
    }

    /// Снимок записей каталога (без рекурсии), чьё имя подходит под шаблон.
    ///
    /// Снимок делается один раз до любых переименований: файлы, перемещённые
    /// в BACKUP во время прохода, повторно не попадут в список. Порядок -
    /// порядок обхода каталога, без сортировки. Тип записи здесь не проверяется.
    pub fn snapshot(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(directory)?;

        let mut candidates = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Пропускаем нечитаемую запись в {:?}: {}", directory, e);
                    continue;
                }
            };

            let name = entry.file_name();
            if self.matches(&name) {
                debug_if_enabled!("Кандидат на запуск: {:?}", entry.path());
                candidates.push(entry.path());
            } else {
                debug_if_enabled!("Не подходит под '{}': {:?}", self.pattern, name);
            }
        }

        Ok(candidates)
    }
}
