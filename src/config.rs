//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::tutor::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::tutor::rate_limit::DEFAULT_MIN_INTERVAL;
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Tutor/upstream configuration
    pub tutor: TutorConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Tutor core configuration
#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// API key for the upstream model endpoint
    pub api_key: String,
    /// Base URL of the upstream endpoint
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Minimum interval between accepted sends, in milliseconds
    pub min_interval_ms: u64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            tutor: TutorConfig {
                api_key: env::var("TUTOR_API_KEY").unwrap_or_default(),
                base_url: env::var("TUTOR_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                model: env::var("TUTOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                min_interval_ms: env::var("TUTOR_MIN_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MIN_INTERVAL.as_millis() as u64),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
