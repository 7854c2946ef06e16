//! Launcher: единственная точка, где создаются процессы.
//!
//! Модуль отвечает ТОЛЬКО за запуск файла как отсоединённого процесса.
//! Решения о том, что запускать и куда архивировать, принимает AutostartRunner.

mod dry_launcher;
mod process_launcher;
mod r#trait;

pub use self::dry_launcher::DryRunLauncher;
pub use self::process_launcher::ProcessLauncher;
pub use self::r#trait::{create_launcher, Launcher};
