use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical detected-plate record. Snapshots from the backend are never
/// mutated in place; every write operation is followed by a full re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateRecord {
    pub id: i64,
    pub plate_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// An unconfirmed detection awaiting admin review. Shares the canonical
/// record shape; the review lifecycle lives client-side.
pub type CandidateRecord = PlateRecord;

/// What the backend actually sends. Field names have drifted across backend
/// revisions (`plate` vs `plate_number`, `id_camera` vs `camera_id`,
/// `timestamp` vs `created_at`), so deserialization happens into this shape
/// and is normalized exactly once, at the API boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlateRecord {
    pub id: i64,
    #[serde(default)]
    pub plate: Option<String>,
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub camera_id: Option<i64>,
    #[serde(default)]
    pub id_camera: Option<i64>,
    #[serde(default)]
    pub camera_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RawPlateRecord {
    /// Collapse the historical field-name variants into the canonical shape.
    /// `plate_number` wins over `plate` when both are present; a record with
    /// neither normalizes to an empty string (rendered as a dash). A missing
    /// capture time falls back to the Unix epoch so such records sort last.
    pub fn normalize(self) -> PlateRecord {
        PlateRecord {
            id: self.id,
            plate_number: self.plate_number.or(self.plate).unwrap_or_default(),
            province: self.province,
            camera_id: self.camera_id.or(self.id_camera),
            camera_name: self.camera_name,
            image_url: self.image_url,
            timestamp: self.timestamp.or(self.created_at).unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

/// Request body for adding a record. Serializes with the backend's field
/// names (`id_camera`), which differ from the canonical ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlate {
    pub plate_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_camera: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_name: Option<String>,
}

/// Camera option for the filter dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}
