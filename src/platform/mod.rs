//! Platform abstraction layer
//!
//! Browser-only pieces: frame scheduling and logger setup.

#[cfg(target_arch = "wasm32")]
pub mod ticker;

#[cfg(target_arch = "wasm32")]
pub use ticker::AnimationTicker;

/// Install the panic hook and console logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed
    let _ = console_log::init_with_level(level);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: log::Level) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.as_str().to_lowercase()),
    )
    .try_init();
}
