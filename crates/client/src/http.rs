use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::{AppError, RefreshRequest, RefreshResponse};

use crate::config::ApiConfig;
use crate::refresh::{RefreshClaim, RefreshGate};
use crate::session::SessionContext;

/// Thin JSON transport over the external backend. Every authenticated
/// request bears the session's access token; a 401 response triggers one
/// coordinated token refresh (see [`RefreshGate`]) followed by a single
/// replay. Cheap to clone; clones share the session and the gate.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
    session: SessionContext,
    gate: Arc<RefreshGate>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: SessionContext) -> Self {
        let mut builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(config.timeout);
        }
        let http = builder.build().expect("failed to build HTTP client");
        Self {
            http,
            config: Arc::new(config),
            session,
            gate: Arc::new(RefreshGate::default()),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        self.request(Method::GET, path, query, None, true).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let body = to_json(body)?;
        self.request(Method::POST, path, &[], Some(body), true).await
    }

    /// POST without a request body (verify, logout).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(Method::POST, path, &[], None, true).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(Method::DELETE, path, &[], None, true).await
    }

    /// POST without bearer token or refresh handling — login, signup.
    pub async fn post_public<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let body = to_json(body)?;
        self.request(Method::POST, path, &[], Some(body), false)
            .await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        authenticated: bool,
    ) -> Result<T, AppError> {
        tracing::debug!(%method, path, "dispatching request");
        let response = self
            .send(method.clone(), path, query, body.as_ref(), authenticated)
            .await?;

        if authenticated && response.status() == StatusCode::UNAUTHORIZED {
            self.refresh_access_token().await?;
            tracing::debug!(path, "replaying request with refreshed token");
            let retry = self
                .send(method, path, query, body.as_ref(), authenticated)
                .await?;
            if retry.status() == StatusCode::UNAUTHORIZED {
                // The fresh token was rejected too; the session is dead.
                self.session.clear();
                return Err(AppError::unauthorized("Session expired"));
            }
            return Self::parse(retry).await;
        }

        Self::parse(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        authenticated: bool,
    ) -> Result<reqwest::Response, AppError> {
        let mut builder = self.http.request(method, self.config.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if authenticated {
            if let Some(token) = self.session.access_token() {
                builder = builder.bearer_auth(token);
            }
        }
        builder.send().await.map_err(map_transport_error)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::network(format!("invalid response body: {e}")))
        } else {
            // FastAPI-style error bodies carry the message under `detail`.
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("detail").and_then(Value::as_str).map(String::from));
            Err(AppError::from_status(status.as_u16(), detail))
        }
    }

    /// Obtain a fresh access token, coordinating with concurrent callers.
    /// On failure the session is cleared; the caller surfaces the error and
    /// the UI redirects to login.
    async fn refresh_access_token(&self) -> Result<String, AppError> {
        match self.gate.claim().await {
            RefreshClaim::Follower(rx) => match rx.await {
                Ok(result) => result,
                Err(_) => Err(AppError::unauthorized("Session expired")),
            },
            RefreshClaim::Leader => {
                let outcome = self.perform_refresh().await;
                if outcome.is_err() {
                    tracing::warn!("token refresh failed; clearing session");
                    self.session.clear();
                }
                self.gate.complete(outcome.clone()).await;
                outcome
            }
        }
    }

    async fn perform_refresh(&self) -> Result<String, AppError> {
        let Some(refresh_token) = self.session.refresh_token() else {
            return Err(AppError::unauthorized("No refresh token"));
        };
        tracing::info!("refreshing access token");
        let body = to_json(&RefreshRequest { refresh_token })?;
        let response = self
            .send(Method::POST, "/auth/refresh_token", &[], Some(&body), false)
            .await?;
        let parsed: RefreshResponse = Self::parse(response).await?;
        self.session.update_access_token(&parsed.access_token);
        Ok(parsed.access_token)
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, AppError> {
    serde_json::to_value(body)
        .map_err(|e| AppError::network(format!("failed to serialize request body: {e}")))
}

fn map_transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::timeout()
    } else {
        AppError::network(err.to_string())
    }
}
