use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Pick the log level from the command line flags
pub fn log_level(debug: bool, quiet: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    }
}

/// Initialize logging with the specified flags
pub fn init_logging(debug: bool, quiet: bool) -> LevelFilter {
    let log_level = log_level(debug, quiet);

    if let Err(e) = SimpleLogger::new().with_level(log_level).init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    log_level
}

/// Configure backtrace if trace is enabled
pub fn configure_backtrace(trace: bool) {
    if trace {
        std::env::set_var("RUST_BACKTRACE", "1");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false, false), LevelFilter::Info);
        assert_eq!(log_level(true, false), LevelFilter::Debug);
        assert_eq!(log_level(false, true), LevelFilter::Error);
        assert_eq!(log_level(true, true), LevelFilter::Debug);
    }
}
