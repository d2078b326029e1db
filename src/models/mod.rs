// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AvoidEntry, PetProfile, Product, ProductCategory, ProductSummary, RankedEntry, Reasoning,
    Recommendation, ScoredProduct, ScoringPoints, Species, SuitabilityTier,
};
pub use requests::{AnalyzeRequest, BudgetRange, PetProfilePayload, RecommendRequest};
pub use responses::{
    AnalysisMetadata, AnalyzeResponse, ErrorResponse, HealthResponse, RecommendMetadata,
    RecommendResponse,
};
