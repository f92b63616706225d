//! Logging setup for hosts embedding a tour.

/// Initializes `env_logger` from `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs the logger.
///
/// # Example
///
/// ```no_run
/// camtour::init_logging();
/// log::info!("tour host starting");
/// ```
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("camtour logging initialized");
    }
}
