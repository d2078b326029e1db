use crate::core::text::has_species_tag;
use crate::models::{PetProfile, Product, Reasoning, ScoringPoints};

/// Generate the pros/cons explanation for a scored product
///
/// Rules run in a fixed order and each appends at most one string, so the same
/// inputs always produce the same list.
pub fn explain(product: &Product, score: u8, pet: &PetProfile, points: &ScoringPoints) -> Reasoning {
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    if has_species_tag(product, pet.species) {
        pros.push(format!("Designed specifically for {}s", pet.species));
    }
    if score > 75 {
        pros.push("High compatibility with pet profile".to_string());
    }
    if product.price < points.budget_price {
        pros.push("Budget-friendly option".to_string());
    }

    if score < 60 {
        cons.push("Moderate compatibility concerns".to_string());
    }
    if product.price > points.premium_price {
        cons.push("Premium pricing".to_string());
    }

    let match_details = format!("Matched {} key criteria for {}", pros.len(), pet.name);

    Reasoning {
        pros,
        cons,
        match_details,
    }
}
