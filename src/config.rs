use crate::utils::CandidateFinder;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PATTERN: &str = "*";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub entries: Vec<AutostartEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// Пауза после каждого запуска, чтобы программы не стартовали разом
    pub launch_delay_ms: u64,
    pub backup_dir_name: String,
    /// Имя маркера сессии в $XDG_RUNTIME_DIR
    pub session_marker: String,
}

/// Один каталог автозапуска
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AutostartEntry {
    pub directory: PathBuf,
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            launch_delay_ms: 200,
            backup_dir_name: "BACKUP".to_string(),
            session_marker: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl AutostartEntry {
    pub fn new(directory: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            pattern: pattern.into(),
        }
    }

    /// Каталог с раскрытым `~/`
    pub fn resolved_directory(&self) -> PathBuf {
        expand_home(&self.directory, dirs::home_dir().as_deref())
    }
}

fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Допустимые уровни логирования; общая проверка для файла и `--log-level`
pub fn validate_log_level(level: &str) -> Result<()> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => anyhow::bail!("Неверный уровень логирования: {}", level),
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/autostart-once/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
    }

    /// Загрузить конфигурацию: встроенные значения < TOML-файл < переменные AUTOSTART_*.
    /// Отсутствующий файл не ошибка.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("AUTOSTART_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_log_level(&self.logging.level)?;

        // Валидация настроек запуска
        let backup = &self.runner.backup_dir_name;
        if backup.is_empty() || backup == "." || backup == ".." || backup.contains('/') {
            anyhow::bail!("Недопустимое имя каталога BACKUP: '{}'", backup);
        }

        if self.runner.session_marker.is_empty() || self.runner.session_marker.contains('/') {
            anyhow::bail!(
                "Недопустимое имя маркера сессии: '{}'",
                self.runner.session_marker
            );
        }

        // Валидация каталогов автозапуска
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.directory.as_os_str().is_empty() {
                anyhow::bail!("Пустой каталог в записи #{}", i + 1);
            }

            CandidateFinder::new(&entry.pattern)
                .with_context(|| format!("Неверный шаблон в записи #{}", i + 1))?;
        }

        Ok(())
    }
}
