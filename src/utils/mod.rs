pub mod candidate_finder;
pub mod permissions;

pub use candidate_finder::CandidateFinder;

// ✅ Макрос условного логирования: не форматируем строки, если DEBUG выключен
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}
