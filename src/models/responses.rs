use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, ProfileRecord, Rejection};

/// One ranked roommate candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarUser {
    #[serde(flatten)]
    pub profile: ProfileRecord,
    pub similarity: f64,
}

impl From<&MatchResult> for SimilarUser {
    fn from(result: &MatchResult) -> Self {
        Self {
            profile: ProfileRecord::from(&result.profile),
            similarity: result.similarity,
        }
    }
}

/// Why a candidate was left out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionView {
    pub user: String,
    pub reason: String,
}

impl From<&Rejection> for RejectionView {
    fn from(rejection: &Rejection) -> Self {
        Self {
            user: rejection.email.clone(),
            reason: rejection.reason.to_string(),
        }
    }
}

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    #[serde(rename = "similarUsers")]
    pub similar_users: Vec<SimilarUser>,
    pub message: String,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "rejectedCount")]
    pub rejected_count: usize,
    pub rejections: Vec<RejectionView>,
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

/// Record swipe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSwipeResponse {
    pub success: bool,
    pub message: String,
    pub request_id: String,
}

/// Saved profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProfileResponse {
    pub email: String,
    pub message: String,
}

/// Emails a user has liked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesResponse {
    pub email: String,
    #[serde(rename = "likedEmails")]
    pub liked_emails: Vec<String>,
    pub count: usize,
}
