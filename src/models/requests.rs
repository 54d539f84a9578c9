use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for the next candidate to serve
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NextMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Request to commit a swipe decision
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_id", rename = "targetId")]
    pub target_id: String,
    pub direction: String,
}

/// Request to undo the most recent swipe
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UndoRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}
