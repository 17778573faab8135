use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Terminal logger for the binary and the examples. Calling it twice is harmless:
/// the second call only reports that a logger is already set.
pub fn init_logger(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    if let Err(e) = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("logger not initialized: {}", e);
    }
}
