use crate::core::HealthAnalysis;
use crate::models::domain::{AvoidEntry, PetProfile, RankedEntry};
use serde::{Deserialize, Serialize};

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<RankedEntry>,
    pub avoid: Vec<AvoidEntry>,
    #[serde(rename = "generalAdvice")]
    pub general_advice: String,
    pub metadata: RecommendMetadata,
}

/// Per-run metadata attached to a recommendation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendMetadata {
    #[serde(rename = "requestId")]
    pub request_id: uuid::Uuid,
    #[serde(rename = "totalScanned")]
    pub total_scanned: usize,
    #[serde(rename = "totalRecommended")]
    pub total_recommended: usize,
    #[serde(rename = "executionMs")]
    pub execution_ms: u64,
    pub confidence: f64,
}

/// Response for the analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub profile: PetProfile,
    pub analysis: HealthAnalysis,
    pub metadata: AnalysisMetadata,
}

/// Per-run metadata attached to an analysis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    #[serde(rename = "requestId")]
    pub request_id: uuid::Uuid,
    pub provider: String,
    #[serde(rename = "executionMs")]
    pub execution_ms: u64,
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
