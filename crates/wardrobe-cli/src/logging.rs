use std::env;

use log::LevelFilter;
use wardrobe_engine::WARNING_TARGET;

/// Level for a number of `-v` flags.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logger configuration for `verbose` and an optional `RUST_LOG` value.
///
/// Engine warnings are printed by the command output, so their log copies
/// are switched off unless `RUST_LOG` names them.
pub fn builder(verbose: u8, filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level_for(verbose))
        .filter(Some(WARNING_TARGET), LevelFilter::Off)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }

    builder
}

/// Install env_logger on stderr. `RUST_LOG` overrides the flag derived level.
pub fn init_logger(verbose: u8) {
    let filters = env::var("RUST_LOG").ok();

    // A second init (tests) keeps the first logger
    let _ = builder(verbose, filters.as_deref()).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Record};

    fn logs(verbose: u8, filters: Option<&str>, target: &str, level: Level) -> bool {
        let logger = builder(verbose, filters).build();
        logger.matches(&Record::builder().target(target).level(level).build())
    }

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), LevelFilter::Error);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(3), LevelFilter::Trace);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn test_warnings_not_logged_twice_when_verbose() {
        assert!(logs(1, None, "wardrobe_engine::wardrobe", Level::Info));
        assert!(!logs(1, None, WARNING_TARGET, Level::Warn));
        assert!(!logs(3, None, WARNING_TARGET, Level::Warn));
    }

    #[test]
    fn test_rust_log_can_enable_warnings() {
        let filters = format!("{}=warn", WARNING_TARGET);
        assert!(logs(0, Some(&filters), WARNING_TARGET, Level::Warn));
    }
}
