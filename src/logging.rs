use log::LevelFilter;

pub use log::LevelFilter::{Debug, Error, Info, Trace, Warn};

/// Installs a fern logger writing to stdout. Safe to call more than once;
/// later calls are ignored if a logger is already installed.
pub fn setup_logging(verbosity: LevelFilter) {
    let result = fern::Dispatch::new()
        .level(verbosity)
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .chain(std::io::stdout())
        .apply();

    if result.is_err() {
        log::set_max_level(verbosity);
    }
}
