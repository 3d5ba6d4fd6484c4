// src/logging.rs
use anyhow::{Context, Result};
use chrono::Local;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

struct Logger {
    file: File,
    min_level: LogLevel,
}

lazy_static! {
    static ref LOGGER: Mutex<Option<Logger>> = Mutex::new(None);
}

pub fn default_log_dir() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        return home.join(".config").join("lazyslide").join("logs");
    }
    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    base.join(".config").join("lazyslide").join("logs")
}

/// Opens a fresh timestamped log file in `log_dir`. Until this is called every
/// log call is a no-op, which keeps tests quiet.
pub fn init_logger(log_dir: &Path, min_level: LogLevel) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_file_path = log_dir.join(format!("lazyslide_{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .context("Failed to create log file")?;

    let mut guard = LOGGER
        .lock()
        .map_err(|_| anyhow::anyhow!("Failed to lock logger mutex"))?;
    *guard = Some(Logger { file, min_level });
    Ok(log_file_path)
}

pub fn log(level: LogLevel, message: &str) {
    let mut guard = match LOGGER.lock() {
        Ok(g) => g,
        Err(_) => {
            eprintln!("Failed to lock logger mutex");
            return;
        }
    };
    if let Some(logger) = &mut *guard {
        if level < logger.min_level {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let log_entry = format!("[{}] {} - {}\n", timestamp, level.as_str(), message);
        if let Err(e) = logger.file.write_all(log_entry.as_bytes()) {
            eprintln!("Failed to write to log file: {}", e);
            return;
        }
        if let Err(e) = logger.file.flush() {
            eprintln!("Failed to flush log file: {}", e);
        }
    }
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message)
}

pub fn info(message: &str) {
    log(LogLevel::Info, message)
}

pub fn warn(message: &str) {
    log(LogLevel::Warning, message)
}

pub fn error(message: &str) {
    log(LogLevel::Error, message)
}
