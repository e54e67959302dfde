use std::net::SocketAddr;
use std::{env, path::Path};

use anyhow::{Context, Result};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

pub struct AppConfig {
    /// Base URL of the stock-advice backend
    pub backend_url: String,
    /// Address the dashboard listens on
    pub bind_addr: SocketAddr,
    /// Optional backend credentials; when both are set the dashboard logs in
    /// at startup and attaches the session token to backend requests
    pub backend_username: Option<String>,
    pub backend_password: Option<String>,
}

impl AppConfig {
    pub fn load(manifest_dir: &Path) -> Result<Self> {
        // Missing .env is fine; every value has a default or is optional.
        #[cfg(debug_assertions)]
        let _ = dotenvy::from_path(manifest_dir.join(".env"));
        #[cfg(not(debug_assertions))]
        let _ = manifest_dir;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        Ok(Self {
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_owned()),
            bind_addr,
            backend_username: env::var("BACKEND_USERNAME").ok(),
            backend_password: env::var("BACKEND_PASSWORD").ok(),
        })
    }
}

/// Load app config using the calling crate's manifest directory.
#[macro_export]
macro_rules! load_app_config {
    () => {
        $crate::config::AppConfig::load(std::path::Path::new(env!("CARGO_MANIFEST_DIR")))
    };
}
