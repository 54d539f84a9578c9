use crate::models::domain::HackerProfile;
use serde::{Deserialize, Serialize};

/// Response for the next-match and undo endpoints.
///
/// `exhausted = true` with no candidate is the normal terminal state when the
/// pool is used up, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextMatchResponse {
    pub candidate: Option<HackerProfile>,
    pub exhausted: bool,
}

/// Response for the swipe endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub accepted: bool,
    pub matched: bool,
    #[serde(rename = "matchId", skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
