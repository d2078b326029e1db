use crate::core::AdvisorError;
use crate::models::{PetProfile, Species};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pet profile as it arrives on the wire
///
/// Species is optional here so a missing value can be rejected as a usage
/// error instead of being silently defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PetProfilePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub species: Option<Species>,
    #[serde(default)]
    pub breed: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default = "default_age")]
    pub age: f64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[validate(range(max = 100))]
    #[serde(alias = "health_score", rename = "healthScore", default)]
    pub health_score: Option<u8>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(alias = "health_issues", rename = "healthIssues", default)]
    pub health_issues: Vec<String>,
    #[serde(alias = "dietary_restrictions", rename = "dietaryRestrictions", default)]
    pub dietary_restrictions: Vec<String>,
}

impl PetProfilePayload {
    /// Convert into the domain profile, rejecting a species-less pet
    pub fn into_profile(self) -> Result<PetProfile, AdvisorError> {
        let species = self
            .species
            .ok_or_else(|| AdvisorError::InvalidInput("pet species is required".to_string()))?;

        Ok(PetProfile {
            name: self.name,
            species,
            breed: self.breed,
            age: self.age,
            weight: self.weight,
            health_score: self.health_score.unwrap_or(DEFAULT_HEALTH_SCORE),
            allergies: self.allergies,
            health_issues: self.health_issues,
            dietary_restrictions: self.dietary_restrictions,
        })
    }
}

/// Fallback when a request omits the health score; lands in the no-bonus band
const DEFAULT_HEALTH_SCORE: u8 = 75;

fn default_age() -> f64 {
    1.0
}

/// Price range constraint forwarded to the catalog fetch
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

/// Request to produce product recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(nested)]
    pub pet: PetProfilePayload,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub budget: Option<BudgetRange>,
    #[serde(alias = "top_n", rename = "topN", default = "default_top_n")]
    pub top_n: u16,
}

fn default_top_n() -> u16 {
    5
}

/// Request to analyze a pet's health from declared fields and free text
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub species: Option<Species>,
    #[validate(range(min = 0.0))]
    #[serde(default = "default_age")]
    pub age: f64,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(alias = "health_issues", rename = "healthIssues", default)]
    pub health_issues: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}
