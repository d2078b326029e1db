use crate::core::text::{combined_text, contains_token, has_species_tag, matches_age_bucket, AgeBucket};
use crate::models::{PetProfile, Product, ScoringPoints};

/// Calculate a product suitability score (0-100) for a pet profile
///
/// Additive point scale, base 50:
/// - species tag matches the pet's species
/// - product targets the pet's age bucket (or carries an all-ages tag)
/// - health modifier: robust pets (> 80) get a bonus, fragile pets (< 60) a
///   smaller one, so gentler products still rise rather than flatline
/// - popularity bonus above a fixed sold-count threshold
/// - allergy penalty when any allergen token appears in the product text;
///   applied on top of the hard exclusion done by the partition filter
pub fn score_product(product: &Product, pet: &PetProfile, points: &ScoringPoints) -> u8 {
    let text = combined_text(product);
    let mut score: i32 = 50;

    if has_species_tag(product, pet.species) {
        score += points.species;
    }

    let bucket = AgeBucket::from_age(pet.age);
    if matches_age_bucket(product, &text, bucket) {
        score += points.age_bucket;
    }

    if pet.health_score > 80 {
        score += points.health_strong;
    } else if pet.health_score < 60 {
        score += points.health_gentle;
    }

    if product.sold_count > points.popularity_threshold {
        score += points.popularity;
    }

    if pet
        .allergies
        .iter()
        .any(|allergen| contains_token(&text, allergen))
    {
        score -= points.allergy_penalty;
    }

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductCategory, Species};

    fn create_test_pet(age: f64, health_score: u8, allergies: &[&str]) -> PetProfile {
        PetProfile {
            name: "Mimi".to_string(),
            species: Species::Cat,
            breed: None,
            age,
            weight: None,
            health_score,
            allergies: allergies.iter().map(|a| a.to_string()).collect(),
            health_issues: vec![],
            dietary_restrictions: vec![],
        }
    }

    fn create_test_product(name: &str, tags: &[&str], sold_count: u32) -> Product {
        Product {
            id: "p1".to_string(),
            name: name.to_string(),
            description: String::new(),
            category: ProductCategory::Food,
            price: 25.0,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            sold_count,
        }
    }

    #[test]
    fn test_worked_example_scores_100() {
        // cat, age 3, healthScore 85: 50 + 15 species + 15 adult + 10 health + 10 popularity
        let pet = create_test_pet(3.0, 85, &["chicken"]);
        let product = create_test_product("Fish Cat Food", &["cat", "adult"], 60);

        let score = score_product(&product, &pet, &ScoringPoints::default());
        assert_eq!(score, 100);
    }

    #[test]
    fn test_base_score_without_matches() {
        let pet = create_test_pet(3.0, 70, &[]);
        let product = create_test_product("Bird Seed", &["bird"], 0);

        let score = score_product(&product, &pet, &ScoringPoints::default());
        assert_eq!(score, 50);
    }

    #[test]
    fn test_species_bonus() {
        let pet = create_test_pet(3.0, 70, &[]);
        let product = create_test_product("Cat Scratcher", &["cat"], 0);

        let score = score_product(&product, &pet, &ScoringPoints::default());
        assert_eq!(score, 65);
    }

    #[test]
    fn test_young_bucket_matches_kitten_token() {
        let pet = create_test_pet(0.5, 70, &[]);
        let product = create_test_product("Kitten Milk", &["cat"], 0);

        // 50 + 15 species + 15 age
        let score = score_product(&product, &pet, &ScoringPoints::default());
        assert_eq!(score, 80);
    }

    #[test]
    fn test_senior_bucket() {
        let pet = create_test_pet(9.0, 70, &[]);
        let senior = create_test_product("Senior Cat Food", &["cat", "senior"], 0);
        let adult = create_test_product("Adult Cat Food", &["cat", "adult"], 0);

        let points = ScoringPoints::default();
        assert_eq!(score_product(&senior, &pet, &points), 80);
        assert_eq!(score_product(&adult, &pet, &points), 65);
    }

    #[test]
    fn test_gentle_bonus_for_fragile_pet() {
        let pet = create_test_pet(3.0, 55, &[]);
        let product = create_test_product("Cat Food", &["cat", "adult"], 0);

        // 50 + 15 + 15 + 5 gentle
        let score = score_product(&product, &pet, &ScoringPoints::default());
        assert_eq!(score, 85);
    }

    #[test]
    fn test_allergy_penalty_applies() {
        let pet = create_test_pet(3.0, 70, &["chicken"]);
        let product = create_test_product("Chicken Cat Food", &["cat", "adult"], 0);

        // 50 + 15 + 15 - 30
        let score = score_product(&product, &pet, &ScoringPoints::default());
        assert_eq!(score, 50);
    }

    #[test]
    fn test_score_clamped_to_zero() {
        let pet = create_test_pet(3.0, 70, &["seed"]);
        let product = create_test_product("Bird Seed Mix", &["bird"], 0);

        // 50 - 30 = 20; push below zero with a harsher penalty
        let points = ScoringPoints {
            allergy_penalty: 80,
            ..ScoringPoints::default()
        };
        let score = score_product(&product, &pet, &points);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_popularity_threshold_is_exclusive() {
        let pet = create_test_pet(3.0, 70, &[]);
        let at_threshold = create_test_product("Cat Toy", &["cat"], 50);
        let above = create_test_product("Cat Toy", &["cat"], 51);

        let points = ScoringPoints::default();
        assert_eq!(score_product(&at_threshold, &pet, &points), 65);
        assert_eq!(score_product(&above, &pet, &points), 75);
    }
}
