use serde::{Deserialize, Serialize};

/// Pet species supported by the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Cat,
    Dog,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Cat => "cat",
            Species::Dog => "dog",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pet profile used as the scoring input. Immutable for the duration of one
/// recommendation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetProfile {
    pub name: String,
    pub species: Species,
    #[serde(default)]
    pub breed: Option<String>,
    /// Age in years; fractional for pets under one year old
    pub age: f64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(rename = "healthScore")]
    pub health_score: u8,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(rename = "healthIssues", default)]
    pub health_issues: Vec<String>,
    #[serde(rename = "dietaryRestrictions", default)]
    pub dietary_restrictions: Vec<String>,
}

/// Product category in the marketplace catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Food,
    Toy,
    Health,
    Grooming,
    Accessory,
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Food => "food",
            ProductCategory::Toy => "toy",
            ProductCategory::Health => "health",
            ProductCategory::Grooming => "grooming",
            ProductCategory::Accessory => "accessory",
            ProductCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_category() -> ProductCategory {
    ProductCategory::Other
}

/// Candidate product from the catalog. Read-only input to scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: ProductCategory,
    pub price: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "soldCount", default)]
    pub sold_count: u32,
}

impl Product {
    /// A candidate missing its identifying text fields is skipped, never fatal.
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// Coarse suitability bucket derived from the score, used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitabilityTier {
    High,
    Medium,
    Low,
}

impl SuitabilityTier {
    /// Thresholds: > 75 high, > 50 medium, otherwise low
    pub fn from_score(score: u8) -> Self {
        if score > 75 {
            SuitabilityTier::High
        } else if score > 50 {
            SuitabilityTier::Medium
        } else {
            SuitabilityTier::Low
        }
    }
}

/// Product reference carried in a ranked entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: ProductCategory,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            category: product.category,
        }
    }
}

/// Deterministic explanation attached to a ranked entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    #[serde(rename = "matchDetails")]
    pub match_details: String,
}

/// One entry in the ranked recommendation list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: u32,
    pub product: ProductSummary,
    pub score: u8,
    pub reasoning: Reasoning,
    pub suitability: SuitabilityTier,
}

/// A product excluded from ranking because of an allergen match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvoidEntry {
    pub product: String,
    pub reason: String,
}

/// Scored candidate, created fresh per call and never persisted directly
#[derive(Debug, Clone)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: u8,
}

/// Full result of one advisor run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendations: Vec<RankedEntry>,
    pub avoid: Vec<AvoidEntry>,
    #[serde(rename = "generalAdvice")]
    pub general_advice: String,
    #[serde(rename = "totalScanned")]
    pub total_scanned: usize,
    #[serde(rename = "totalSafe")]
    pub total_safe: usize,
}

/// Point values for the additive scoring scale
#[derive(Debug, Clone, Copy)]
pub struct ScoringPoints {
    pub species: i32,
    pub age_bucket: i32,
    pub health_strong: i32,
    pub health_gentle: i32,
    pub popularity: i32,
    pub allergy_penalty: i32,
    pub popularity_threshold: u32,
    pub budget_price: f64,
    pub premium_price: f64,
}

impl Default for ScoringPoints {
    fn default() -> Self {
        Self {
            species: 15,
            age_bucket: 15,
            health_strong: 10,
            health_gentle: 5,
            popularity: 10,
            allergy_penalty: 30,
            popularity_threshold: 50,
            budget_price: 30.0,
            premium_price: 40.0,
        }
    }
}
