use std::time::Duration;

/// Client configuration for the external backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout; a lapsed timer surfaces as `AppErrorKind::Timeout`.
    pub timeout: Duration,
    /// How many records the default "latest" fetch asks for.
    pub fetch_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(15),
            fetch_limit: 300,
        }
    }
}

impl ApiConfig {
    /// Read `PLATEVIEW_API_URL` and `PLATEVIEW_FETCH_LIMIT` from the
    /// environment (and `.env` on native targets), falling back to defaults.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(url) = std::env::var("PLATEVIEW_API_URL") {
            let trimmed = url.trim_end_matches('/');
            if !trimmed.is_empty() {
                config.base_url = trimmed.to_string();
            }
        }
        if let Some(limit) = std::env::var("PLATEVIEW_FETCH_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
        {
            config.fetch_limit = limit;
        }
        config
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
