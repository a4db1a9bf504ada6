use crate::config_loader::MasterConfig;
use env_logger::Builder;
use log::LevelFilter;

/// Resolves the log level from `--debug`, then the config, then `info`.
pub fn resolve_log_level(config: Option<&MasterConfig>, debug_flag: bool) -> String {
    if debug_flag {
        "debug".to_string()
    } else {
        config
            .and_then(|c| c.app_settings.log_level.clone())
            .unwrap_or_else(|| "info".to_string())
    }
}

fn level_filter(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

pub fn initialize_logging(config: Option<&MasterConfig>, cli_matches: &clap::ArgMatches) {
    let log_level_str = resolve_log_level(config, cli_matches.get_flag("debug"));

    let mut builder = Builder::new();
    let unrecognized = match level_filter(&log_level_str) {
        Some(filter) => {
            builder.filter_level(filter);
            false
        }
        None => {
            builder.filter_level(LevelFilter::Info);
            true
        }
    };

    if let Err(e) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e);
        return;
    }
    if unrecognized {
        log::warn!("Unrecognized log level '{}', defaulting to info.", log_level_str);
    }
}
