use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutostartError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Некорректный glob-шаблон '{pattern}': {source}")]
    Glob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Некорректный шаблон файлов: {0}")]
    InvalidPattern(String),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Не удалось запустить {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Не удалось переместить {from:?} в {to:?}: {source}")]
    Archive {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl AutostartError {
    pub fn glob(pattern: impl Into<String>, source: globset::Error) -> Self {
        AutostartError::Glob {
            pattern: pattern.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AutostartError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! autostart_error {
    (permission, $($arg:tt)*) => {
        $crate::error::AutostartError::Permission(format!($($arg)*))
    };
    (invalid_pattern, $($arg:tt)*) => {
        $crate::error::AutostartError::InvalidPattern(format!($($arg)*))
    };
}
