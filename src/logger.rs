//! `fern` logger setup for binaries and demos embedding the directory.

use crate::config::LoggingConfig;

use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{info, Record, SetLoggerError};

fn plain(out: FormatCallback<'_>, message: &std::fmt::Arguments<'_>, record: &Record<'_>) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{target}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        level = record.level(),
        message = message,
        target = record.target(),
    ))
}

/// Install a stdout logger at the configured level.
///
/// Fails only if a logger has already been installed for this process.
pub fn initialize(config: &LoggingConfig) -> Result<(), SetLoggerError> {
    let level_filter = *config.level;

    let dispatch = if config.colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        Dispatch::new().format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = humantime::format_rfc3339(SystemTime::now()),
                level = colors.color(record.level()),
                message = message,
                target = record.target(),
            ))
        })
    } else {
        Dispatch::new().format(plain)
    };

    Dispatch::new()
        .level(level_filter)
        .chain(dispatch.chain(std::io::stdout()))
        .apply()?;

    info!("Logger initialized: level={level_filter:?}, stdout");
    Ok(())
}
