//! Configuration management
//!
//! This module provides YAML-based configuration management with support for:
//! - Environment variable override of the config file path
//! - Multiple configuration file locations
//! - Default values for all settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub links: LinkConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker threads for the async runtime
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Public base URL used to build canonical certificate links
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5061
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_public_base_url() -> String {
    "http://localhost:5061".to_string()
}

/// Certifyer backend API connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the backend API (e.g. the Supabase edge function gateway)
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_backend_timeout", alias = "timeout")]
    pub timeout_secs: u64,
    /// Optional bearer token for the backend API
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_backend_timeout() -> u64 {
    15
}

/// Certificate link token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkConfig {
    /// Secret used to derive the token encryption key
    #[serde(default = "default_link_secret")]
    pub secret: String,
    /// Days a generated link stays valid
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            secret: default_link_secret(),
            validity_days: default_validity_days(),
        }
    }
}

impl LinkConfig {
    pub fn validity_window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.validity_days))
    }
}

fn default_link_secret() -> String {
    // Development fallback; production deployments set links.secret in YAML
    "certifyer-dev-link-secret".to_string()
}

fn default_validity_days() -> u32 {
    30
}

/// Export pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Device pixel ratio cap applied to rasterization
    #[serde(default = "default_max_pixel_ratio")]
    pub max_pixel_ratio: f32,
    /// JPEG quality (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Per-asset readiness timeout in milliseconds
    #[serde(default = "default_asset_timeout_ms")]
    pub asset_timeout_ms: u64,
    /// Directory with locally installed font files (.ttf/.otf)
    #[serde(default)]
    pub fonts_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: default_max_pixel_ratio(),
            jpeg_quality: default_jpeg_quality(),
            asset_timeout_ms: default_asset_timeout_ms(),
            fonts_dir: None,
        }
    }
}

impl ExportConfig {
    pub fn asset_timeout(&self) -> Duration {
        Duration::from_millis(self.asset_timeout_ms)
    }
}

fn default_max_pixel_ratio() -> f32 {
    2.0
}

fn default_jpeg_quality() -> u8 {
    92
}

fn default_asset_timeout_ms() -> u64 {
    2500
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Log output target (console or file)
    #[serde(default = "default_log_target")]
    pub target: LogTarget,
    /// Directory for log files (used when target is "file")
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Log file name prefix
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,
    /// Enable daily log rotation
    #[serde(default = "default_log_rotation")]
    pub daily_rotation: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            target: default_log_target(),
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            daily_rotation: default_log_rotation(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

/// Log output target
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to console (stdout/stderr) - default for development
    #[default]
    Console,
    /// Log to file with optional rotation - recommended for production
    File,
    /// Log to both console and file
    Both,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_target() -> LogTarget {
    LogTarget::Console
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_prefix() -> String {
    "certifyer-webui".to_string()
}

fn default_log_rotation() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from the first available source
    ///
    /// Checks `CERTIFYER_CONFIG`, then standard file locations. A missing file
    /// is an error because the backend URL has no sensible default.
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("CERTIFYER_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(Self::find_config_file)
            .context("No configuration file found (set CERTIFYER_CONFIG or create config.yaml)")?;

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_norway::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Find a configuration file in standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("config.yaml"),
            PathBuf::from("config/config.yaml"),
            PathBuf::from("/etc/certifyer-webui/config.yaml"),
            dirs::config_dir()
                .map(|p| p.join("certifyer-webui/config.yaml"))
                .unwrap_or_default(),
        ];

        paths.into_iter().find(|p| p.exists())
    }
}
