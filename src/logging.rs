// File: ./src/logging.rs
// Terminal + file logging setup for the binary.
use crate::context::AppContext;
use anyhow::Result;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::OpenOptions;

/// Warnings and errors go to stderr; everything at `file_level` goes to the
/// log file in the data directory when it can be opened.
pub fn init(ctx: &dyn AppContext, file_level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new()
        .add_filter_allow_str("sheetprune")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = ctx.get_log_path() {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => loggers.push(WriteLogger::new(file_level, config, file)),
            Err(e) => eprintln!("Cannot open log file {:?}: {}", path, e),
        }
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
