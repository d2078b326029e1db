use crate::core::{explain::explain, filters::partition, scoring::score_product};
use crate::models::{
    PetProfile, Product, ProductSummary, RankedEntry, Recommendation, ScoredProduct, ScoringPoints,
    SuitabilityTier,
};
use thiserror::Error;

/// Usage errors surfaced to the caller before any scoring happens
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Recommendation pipeline
///
/// # Pipeline stages
/// 1. Allergen partition (safe vs avoid)
/// 2. Scoring of each safe candidate
/// 3. Stable descending sort (ties keep catalog order)
/// 4. Rank, tier and explanation for the top N
/// 5. General advice keyed by the top score
///
/// Pure function of its inputs: no clock, no randomness, no I/O.
#[derive(Debug, Clone)]
pub struct Advisor {
    points: ScoringPoints,
}

impl Advisor {
    pub fn new(points: ScoringPoints) -> Self {
        Self { points }
    }

    pub fn with_default_points() -> Self {
        Self {
            points: ScoringPoints::default(),
        }
    }

    pub fn points(&self) -> &ScoringPoints {
        &self.points
    }

    /// Produce a ranked, explained shortlist for a pet profile
    ///
    /// An empty candidate list is not an error: the result carries empty lists
    /// and the no-matches advice message.
    pub fn recommend(
        &self,
        pet: &PetProfile,
        candidates: Vec<Product>,
        top_n: usize,
    ) -> Recommendation {
        let total_scanned = candidates.len();

        let (safe, avoid) = partition(candidates, &pet.allergies);
        let total_safe = safe.len();

        let mut scored: Vec<ScoredProduct> = safe
            .into_iter()
            .map(|product| {
                let score = score_product(&product, pet, &self.points);
                ScoredProduct { product, score }
            })
            .collect();

        // Vec::sort_by is stable, so equal scores keep catalog order
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        let top_score = scored.first().map(|entry| entry.score);

        let recommendations: Vec<RankedEntry> = scored
            .iter()
            .take(top_n)
            .enumerate()
            .map(|(index, entry)| RankedEntry {
                rank: index as u32 + 1,
                product: ProductSummary::from(&entry.product),
                score: entry.score,
                reasoning: explain(&entry.product, entry.score, pet, &self.points),
                suitability: SuitabilityTier::from_score(entry.score),
            })
            .collect();

        let general_advice = general_advice(pet, top_score);

        Recommendation {
            recommendations,
            avoid,
            general_advice,
            total_scanned,
            total_safe,
        }
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::with_default_points()
    }
}

/// Canned advice keyed by the top score: > 80, > 60, anything lower, or no
/// safe candidates at all
fn general_advice(pet: &PetProfile, top_score: Option<u8>) -> String {
    match top_score {
        None => "No products found matching your criteria. Consider broadening your search or consulting with a veterinarian.".to_string(),
        Some(score) if score > 80 => format!(
            "Great match! The top recommendation is highly suitable for {}'s age and health profile.",
            pet.name
        ),
        Some(score) if score > 60 => format!(
            "Good options available. Consider {}'s specific health needs when making your final choice.",
            pet.name
        ),
        Some(_) => format!(
            "Limited matches found. Consult with your veterinarian for personalized recommendations for {}.",
            pet.name
        ),
    }
}
