use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
mod config;
mod error;
mod records;
mod services;
mod utils;

use config::{validate_log_level, AutostartEntry, Config, DEFAULT_PATTERN};
use records::RunStatus;
use services::{create_launcher, AutostartRunner, SessionGuard};

#[derive(Parser, Debug)]
#[command(name = "autostart-once")]
#[command(about = "Однократный автозапуск программ из каталога при старте сессии")]
struct Args {
    /// Каталог автозапуска (вместо записей из конфигурации)
    directory: Option<PathBuf>,

    /// Glob-шаблон имён файлов для DIRECTORY
    #[arg(short, long, requires = "directory")]
    pattern: Option<String>,

    /// Путь к файлу конфигурации
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Запускать, даже если в этой сессии автозапуск уже выполнялся
    #[arg(long)]
    force: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config_path = match &args.config {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Файл конфигурации не найден: {:?}", path);
            }
            Some(path.clone())
        }
        None => Config::default_path(),
    };
    let config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Инициализация системы логирования
    let level = log_level(&args, &config)?;
    init_tracing(level)?;

    info!("Запуск autostart-once v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Конфигурация: {:?}", path);
    }

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    utils::permissions::check_not_root();

    let entries = entries_to_run(&args, &config);
    if entries.is_empty() {
        info!("Нет каталогов автозапуска, завершаем работу");
        return Ok(());
    }

    // Повторный вызов в той же сессии (перезагрузка конфигурации WM) ничего не делает
    if !args.force {
        let guard = SessionGuard::from_env(&config.runner.session_marker);
        let first_run = if args.dry_run {
            !guard.is_acquired()
        } else {
            match guard.acquire() {
                Ok(first_run) => first_run,
                Err(e) => {
                    warn!("Не удалось создать маркер сессии: {}", e);
                    true
                }
            }
        };

        if !first_run {
            info!(
                "Автозапуск в этой сессии уже выполнялся, маркер {:?} (--force для повтора)",
                guard.marker_path()
            );
            return Ok(());
        }
    }

    let runner = AutostartRunner::new(&config.runner, create_launcher(args.dry_run));

    // Ошибки отдельных каталогов не должны мешать остальным и сессии в целом
    for entry in &entries {
        let directory = entry.resolved_directory();
        match runner.run(&directory, &entry.pattern).await {
            Ok(summary) if summary.status == RunStatus::Completed => info!("{}", summary),
            Ok(summary) => warn!("{}", summary),
            Err(e) => error!("Ошибка автозапуска {:?}: {}", directory, e),
        }
    }

    info!("autostart-once завершил работу");
    Ok(())
}

/// Каталог из командной строки заменяет записи конфигурации
fn entries_to_run(args: &Args, config: &Config) -> Vec<AutostartEntry> {
    match &args.directory {
        Some(directory) => vec![AutostartEntry::new(
            directory.clone(),
            args.pattern.as_deref().unwrap_or(DEFAULT_PATTERN),
        )],
        None => config.entries.clone(),
    }
}

/// `--log-level` важнее конфигурации и проходит ту же проверку
fn log_level<'a>(args: &'a Args, config: &'a Config) -> Result<&'a str> {
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    validate_log_level(level)?;
    Ok(level)
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_directory_overrides_config() {
        let mut config = Config::default();
        config.entries = vec![AutostartEntry::new("/from/config", "*")];

        let args = Args::parse_from(["autostart-once", "/tmp/auto", "--pattern", "*.sh"]);
        assert_eq!(
            entries_to_run(&args, &config),
            vec![AutostartEntry::new("/tmp/auto", "*.sh")]
        );

        let args = Args::parse_from(["autostart-once", "/tmp/auto"]);
        assert_eq!(
            entries_to_run(&args, &config),
            vec![AutostartEntry::new("/tmp/auto", "*")]
        );

        let args = Args::parse_from(["autostart-once", "--dry-run"]);
        assert!(args.dry_run);
        assert_eq!(entries_to_run(&args, &config), config.entries);
    }

    #[test]
    fn test_cli_log_level_is_validated() {
        let config = Config::default();

        let args = Args::parse_from(["autostart-once", "--log-level", "debug"]);
        assert_eq!(log_level(&args, &config).unwrap(), "debug");

        let args = Args::parse_from(["autostart-once"]);
        assert_eq!(log_level(&args, &config).unwrap(), "info");

        let args = Args::parse_from(["autostart-once", "--log-level", "loud"]);
        assert!(log_level(&args, &config).is_err());
    }

    #[test]
    fn test_pattern_requires_directory() {
        assert!(Args::try_parse_from(["autostart-once", "--pattern", "*.sh"]).is_err());
    }
}
