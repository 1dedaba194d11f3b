use serde_json::Value;
use shared_types::{
    ApiStatus, AppError, Camera, CandidateRecord, HealthResponse, NewPlate, PlateRecord,
    RawPlateRecord, SearchQuery,
};

use crate::http::ApiClient;

/// Typed surface over the plate endpoints. Raw backend rows are normalized
/// at this boundary; nothing beyond it ever sees the drifted field names.
#[derive(Clone)]
pub struct PlateApi {
    client: ApiClient,
}

impl PlateApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The configured fetch limit for default and search queries.
    pub fn default_limit(&self) -> usize {
        self.client.config().fetch_limit
    }

    /// The most recent `limit` records, newest first. The backend does not
    /// guarantee an order, so the sort happens here.
    pub async fn latest(&self, limit: usize) -> Result<Vec<PlateRecord>, AppError> {
        let raw: Vec<RawPlateRecord> = self
            .client
            .get("/plates", &[("limit", limit.to_string())])
            .await?;
        let mut records = normalize(raw);
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(limit);
        Ok(records)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<PlateRecord>, AppError> {
        let raw: Vec<RawPlateRecord> = self
            .client
            .get("/plates/search", &query.to_query_pairs())
            .await?;
        Ok(normalize(raw))
    }

    pub async fn add(&self, plate: &NewPlate) -> Result<PlateRecord, AppError> {
        let raw: RawPlateRecord = self.client.post("/plates", plate).await?;
        Ok(raw.normalize())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let _: Value = self.client.delete(&format!("/plates/{id}")).await?;
        Ok(())
    }

    pub async fn candidates(&self) -> Result<Vec<CandidateRecord>, AppError> {
        let raw: Vec<RawPlateRecord> = self.client.get("/plates/candidates", &[]).await?;
        Ok(normalize(raw))
    }

    /// Promote a candidate to a confirmed record.
    pub async fn verify_candidate(&self, id: i64) -> Result<(), AppError> {
        let _: Value = self
            .client
            .post_empty(&format!("/plates/candidates/{id}/verify"))
            .await?;
        Ok(())
    }

    /// Discard a candidate.
    pub async fn reject_candidate(&self, id: i64) -> Result<(), AppError> {
        let _: Value = self
            .client
            .delete(&format!("/plates/candidates/{id}"))
            .await?;
        Ok(())
    }

    pub async fn cameras(&self) -> Result<Vec<Camera>, AppError> {
        self.client.get("/cameras", &[]).await
    }

    pub async fn provinces(&self) -> Result<Vec<String>, AppError> {
        self.client.get("/provinces", &[]).await
    }

    pub async fn health(&self) -> Result<HealthResponse, AppError> {
        self.client.get("/health", &[]).await
    }

    /// Health probe folded into the banner's three-state reading.
    pub async fn probe_status(&self) -> ApiStatus {
        match self.health().await {
            Ok(resp) => ApiStatus::from_probe(Ok(&resp)),
            Err(err) => {
                tracing::warn!(%err, "health probe failed");
                ApiStatus::from_probe(Err(()))
            }
        }
    }
}

fn normalize(raw: Vec<RawPlateRecord>) -> Vec<PlateRecord> {
    raw.into_iter().map(RawPlateRecord::normalize).collect()
}
