use crate::models::{PetProfile, Species};
use serde::{Deserialize, Serialize};

/// Rule-based health analysis of a pet profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAnalysis {
    pub summary: String,
    pub recommendation: String,
    pub alert: String,
    #[serde(rename = "healthScore")]
    pub health_score: u8,
    #[serde(rename = "nutritionAdvice")]
    pub nutrition_advice: String,
    #[serde(rename = "exerciseAdvice")]
    pub exercise_advice: String,
}

/// Compute a health score from age and declared conditions
///
/// Starts at 100; senior age, each health issue and each allergy subtract
/// fixed penalties. Clamped to [0, 100].
pub fn health_score(age: f64, health_issues: &[String], allergies: &[String]) -> u8 {
    let mut score: i32 = 100;

    if age > 10.0 {
        score -= 10;
    } else if age > 7.0 {
        score -= 5;
    }

    score -= health_issues.len() as i32 * 10;
    score -= allergies.len() as i32 * 5;

    score.clamp(0, 100) as u8
}

/// Produce the canned health analysis for a profile
///
/// Deterministic: messages are keyed by the health score bands >= 80 / >= 60 /
/// below, with an allergy alert appended when allergens are declared.
pub fn analyze(pet: &PetProfile) -> HealthAnalysis {
    let score = pet.health_score;

    let (summary, recommendation, mut alert) = if score >= 80 {
        (
            "Your pet is in good health!",
            "Keep up the current feeding and care routine",
            "No special alerts".to_string(),
        )
    } else if score >= 60 {
        (
            "Health is fair and worth keeping an eye on",
            "Consider nutritional supplements and regular checkups",
            "Watch appetite and energy levels".to_string(),
        )
    } else {
        (
            "Health needs attention",
            "Schedule a veterinary visit as soon as possible",
            "Warning: low health score, act promptly".to_string(),
        )
    };

    if !pet.allergies.is_empty() {
        alert.push_str(&format!("\nKnown allergens: {}", pet.allergies.join(", ")));
    }

    let exercise_advice = match pet.species {
        Species::Dog => "At least a 30-minute walk every day",
        Species::Cat => "Provide toys and enough room to roam",
    };

    HealthAnalysis {
        summary: summary.to_string(),
        recommendation: recommendation.to_string(),
        alert,
        health_score: score,
        nutrition_advice: "Pick food appropriate for age and weight, keep the diet balanced"
            .to_string(),
        exercise_advice: exercise_advice.to_string(),
    }
}
