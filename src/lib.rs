//! PetSuite Advisor - product advisory service for the PetSuite marketplace
//!
//! This library provides the recommendation engine used by the PetSuite
//! pet-care marketplace: allergen-aware filtering, rule-based product scoring
//! and deterministic explanation generation over a pet profile.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{classify_intent, health_score, score_product, Advisor, AdvisorError};
pub use models::{
    AvoidEntry, PetProfile, Product, RankedEntry, Recommendation, ScoringPoints, Species,
    SuitabilityTier,
};
