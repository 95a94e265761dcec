// ABOUTME: Structured logging setup for host applications embedding the engine
// ABOUTME: Env-filtered tracing-subscriber initialization with json/pretty/compact formats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrofit Coaching

//! Logging configuration for hosts of the engine.
//!
//! The engine itself only emits `tracing` events; initializing a subscriber
//! is the host's call. This module offers the conventional setup so every
//! embedding service logs the same way.

use crate::errors::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// JSON format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default directive when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured default level.
///
/// # Errors
///
/// Returns `PlanError::InvalidConfig` when the level directive cannot be
/// parsed or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> PlanResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| PlanError::invalid_config(format!("invalid log level: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };
    result.map_err(|e| PlanError::invalid_config(format!("logging already initialized: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_installs_or_reports_the_existing_subscriber() {
        // Only one global subscriber can win; the rest must report it
        // as a configuration error rather than panicking.
        for format in [LogFormat::Json, LogFormat::Pretty, LogFormat::Compact] {
            let config = LoggingConfig {
                level: "warn".into(),
                format,
            };
            match init_logging(&config) {
                Ok(()) => {}
                Err(PlanError::InvalidConfig(message)) => {
                    assert!(message.contains("already initialized"));
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}
