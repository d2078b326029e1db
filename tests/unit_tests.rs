// Unit tests for the PetSuite advisor core

use petsuite_advisor::core::{
    explain::explain,
    filters::{allergen_match, partition},
    intent::classify_intent,
    profile::health_score,
    scoring::score_product,
    text::AgeBucket,
};
use petsuite_advisor::models::{
    PetProfile, Product, ProductCategory, ScoringPoints, Species, SuitabilityTier,
};

fn create_pet(
    species: Species,
    age: f64,
    health_score: u8,
    allergies: &[&str],
) -> PetProfile {
    PetProfile {
        name: "Mimi".to_string(),
        species,
        breed: None,
        age,
        weight: None,
        health_score,
        allergies: allergies.iter().map(|a| a.to_string()).collect(),
        health_issues: vec![],
        dietary_restrictions: vec![],
    }
}

fn create_product(
    id: &str,
    name: &str,
    tags: &[&str],
    price: f64,
    sold_count: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: ProductCategory::Food,
        price,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        sold_count,
    }
}

#[test]
fn test_score_stays_in_range() {
    let points = ScoringPoints::default();
    let pet = create_pet(Species::Cat, 3.0, 85, &["chicken"]);

    let products = vec![
        create_product("1", "Chicken Cat Food", &["cat", "adult"], 20.0, 100),
        create_product("2", "Fish Cat Food", &["cat", "adult"], 25.0, 60),
        create_product("3", "Bird Seed", &["bird"], 5.0, 0),
    ];

    for product in &products {
        let score = score_product(product, &pet, &points);
        assert!(score <= 100, "Score {} out of range", score);
    }
}

#[test]
fn test_spec_example_scores() {
    // cat, age 3, healthScore 85, allergic to chicken
    let pet = create_pet(Species::Cat, 3.0, 85, &["chicken"]);
    let points = ScoringPoints::default();

    let fish = create_product("2", "Fish Cat Food", &["cat", "adult"], 25.0, 60);
    assert_eq!(score_product(&fish, &pet, &points), 100);
    assert_eq!(SuitabilityTier::from_score(100), SuitabilityTier::High);
}

#[test]
fn test_age_bucket_boundaries() {
    assert_eq!(AgeBucket::from_age(0.0), AgeBucket::Young);
    assert_eq!(AgeBucket::from_age(0.99), AgeBucket::Young);
    assert_eq!(AgeBucket::from_age(1.0), AgeBucket::Adult);
    assert_eq!(AgeBucket::from_age(7.0), AgeBucket::Senior);
}

#[test]
fn test_allergen_match_over_all_text_fields() {
    let allergies: Vec<String> = vec!["beef".to_string()];

    let in_name = create_product("1", "Beef Jerky", &[], 10.0, 0);
    assert!(allergen_match(&in_name, &allergies).is_some());

    let mut in_description = create_product("2", "Meaty Sticks", &[], 10.0, 0);
    in_description.description = "made with real Beef".to_string();
    assert!(allergen_match(&in_description, &allergies).is_some());

    let in_tags = create_product("3", "Protein Mix", &["beef", "dog"], 10.0, 0);
    assert!(allergen_match(&in_tags, &allergies).is_some());

    let clean = create_product("4", "Salmon Bites", &["dog"], 10.0, 0);
    assert!(allergen_match(&clean, &allergies).is_none());
}

#[test]
fn test_partition_never_leaks_allergens_into_safe() {
    let allergies: Vec<String> = vec!["chicken".to_string(), "grain".to_string()];

    let products = vec![
        create_product("1", "Chicken Feast", &["cat"], 10.0, 0),
        create_product("2", "Whole Grain Mix", &["cat"], 10.0, 0),
        create_product("3", "Fish Dinner", &["cat"], 10.0, 0),
    ];

    let (safe, avoid) = partition(products, &allergies);

    assert_eq!(safe.len(), 1);
    assert_eq!(avoid.len(), 2);
    for product in &safe {
        assert!(allergen_match(product, &allergies).is_none());
    }
}

#[test]
fn test_explain_rules_fire_in_order() {
    let pet = create_pet(Species::Cat, 3.0, 85, &[]);
    let points = ScoringPoints::default();
    let product = create_product("1", "Cat Food", &["cat"], 45.0, 0);

    let reasoning = explain(&product, 80, &pet, &points);

    // Species pro before compatibility pro; premium con present
    assert_eq!(reasoning.pros[0], "Designed specifically for cats");
    assert_eq!(reasoning.pros[1], "High compatibility with pet profile");
    assert_eq!(reasoning.cons, vec!["Premium pricing"]);
}

#[test]
fn test_intent_classification_categories() {
    assert_eq!(
        classify_intent("best food for kittens").category,
        Some(ProductCategory::Food)
    );
    assert_eq!(
        classify_intent("fun toys").category,
        Some(ProductCategory::Toy)
    );
    assert_eq!(classify_intent("a gift").category, None);
}

#[test]
fn test_health_score_penalties_accumulate() {
    let issues: Vec<String> = vec!["arthritis".to_string()];
    let allergies: Vec<String> = vec!["chicken".to_string(), "dairy".to_string()];

    // 100 - 10 (age > 10) - 10 (issue) - 10 (two allergies)
    assert_eq!(health_score(12.0, &issues, &allergies), 70);
}
