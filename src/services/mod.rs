pub mod autostart_runner;
pub mod launcher;
pub mod session_guard;

pub use autostart_runner::AutostartRunner;
pub use launcher::create_launcher;
pub use session_guard::SessionGuard;
