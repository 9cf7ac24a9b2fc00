//! Logger setup for the command-line driver.

/// Logs at `info` (or `debug` when verbose) without timestamps. `RUST_LOG`
/// overrides the level for individual targets.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
