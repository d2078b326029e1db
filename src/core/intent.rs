use crate::models::ProductCategory;

/// Classified shopping intent for a free-text query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intent {
    /// Category to narrow the catalog fetch; None means no constraint
    pub category: Option<ProductCategory>,
    pub confidence: f64,
}

/// Keyword classification of a user query into a catalog category
///
/// Unrecognized queries fall through to a general (unconstrained) intent with
/// lower confidence.
pub fn classify_intent(query: &str) -> Intent {
    let query = query.to_lowercase();

    let category = if contains_any(&query, &["food", "eat", "diet"]) {
        Some(ProductCategory::Food)
    } else if contains_any(&query, &["toy", "play"]) {
        Some(ProductCategory::Toy)
    } else if contains_any(&query, &["health", "medicine", "vet"]) {
        Some(ProductCategory::Health)
    } else if contains_any(&query, &["groom", "bath", "clean"]) {
        Some(ProductCategory::Grooming)
    } else {
        None
    };

    Intent {
        category,
        confidence: if category.is_some() { 0.9 } else { 0.6 },
    }
}

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| query.contains(keyword))
}
