//! Certifyer WebUI Library
//!
//! Core functionality for the certificate viewer service: link token
//! resolution, backend data fetching, template rendering and the JPEG export
//! pipeline.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub mod api;
pub mod config;
pub mod export;
pub mod models;
pub mod render;
pub mod services;
pub mod utils;

pub use config::AppConfig;
use export::FontLibrary;
use services::{BackendClient, LinkCodec};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Backend API client
    pub backend: Arc<BackendClient>,
    /// Certificate link token codec
    pub codec: LinkCodec,
    /// Locally installed fonts for rasterization
    pub fonts: Arc<FontLibrary>,
    /// Plain HTTP client for export asset fetches
    pub http: reqwest::Client,
    /// Certificate ids with an export currently running
    pub exports_in_flight: Arc<Mutex<HashSet<String>>>,
}

impl AppState {
    /// Build the application state from loaded configuration
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let backend = Arc::new(BackendClient::new(&config.backend)?);
        let codec = LinkCodec::new(&config.links.secret, config.links.validity_window());
        let fonts = Arc::new(FontLibrary::load(config.export.fonts_dir.as_deref()));
        let http = reqwest::Client::builder()
            .timeout(config.export.asset_timeout())
            .user_agent(concat!("certifyer-webui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            config,
            backend,
            codec,
            fonts,
            http,
            exports_in_flight: Arc::new(Mutex::new(HashSet::new())),
        })
    }
}
