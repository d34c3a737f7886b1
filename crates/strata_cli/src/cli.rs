use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Output formats accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Ppm,
    Png,
}

#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(about = "Render layered translucent scenes along a camera path")]
pub struct Args {
    /// Scene and animation config (JSON). The built-in orbit scene is used when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the numbered frames are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Number of frames to render (overrides the config)
    #[arg(short, long)]
    pub frames: Option<u32>,

    /// Image format (overrides the config)
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Image width in pixels (overrides the config)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the config)
    #[arg(long)]
    pub height: Option<u32>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
