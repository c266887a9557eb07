//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on application configuration.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::StaticConfig;
use crate::errors::{LinkhubError, Result};

const DEFAULT_LOG_FILE: &str = "linkhub.log";

fn build_writer(config: &StaticConfig) -> Result<Box<dyn std::io::Write + Send + Sync>> {
    let log_file = match config.logging.file.as_deref() {
        Some(f) if !f.is_empty() => f,
        // 未配置文件时输出到控制台
        _ => return Ok(Box::new(std::io::stdout())),
    };

    if config.logging.enable_rotation {
        let dir = Path::new(log_file).parent().unwrap_or(Path::new("."));
        let filename = Path::new(log_file)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE);
        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.logging.max_backups as usize)
            .build(dir)
            .map_err(|e| LinkhubError::internal(format!("无法创建滚动日志: {}", e)))?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        Ok(Box::new(file))
    }
}

/// Initialize logging system based on configuration
///
/// Must be called once during startup, after the configuration is loaded.
/// The returned `WorkerGuard` has to be kept alive for the duration of the
/// program so that buffered log lines are flushed.
pub fn init_logging(config: &StaticConfig) -> Result<WorkerGuard> {
    let writer = build_writer(config)?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::new(config.logging.level.clone());

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(config.logging.file.as_ref().is_none_or(|f| f.is_empty()));

    let result = if config.logging.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    result.map_err(|e| LinkhubError::internal(format!("日志系统初始化失败: {}", e)))?;

    Ok(guard)
}
