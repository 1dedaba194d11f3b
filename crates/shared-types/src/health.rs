use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Backend reachability as shown in the persistent status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    /// No probe has completed yet.
    #[default]
    Unknown,
    Online,
    /// The backend answered but reported a non-ok status.
    Degraded,
    Offline,
}

impl ApiStatus {
    pub fn from_probe(result: Result<&HealthResponse, ()>) -> Self {
        match result {
            Ok(resp) if resp.status == "ok" => ApiStatus::Online,
            Ok(_) => ApiStatus::Degraded,
            Err(()) => ApiStatus::Offline,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Unknown => "Checking...",
            ApiStatus::Online => "Online",
            ApiStatus::Degraded => "Degraded",
            ApiStatus::Offline => "Offline",
        }
    }

    /// CSS modifier for the banner dot.
    pub fn css_class(&self) -> &'static str {
        match self {
            ApiStatus::Unknown => "unknown",
            ApiStatus::Online => "online",
            ApiStatus::Degraded => "degraded",
            ApiStatus::Offline => "offline",
        }
    }
}
