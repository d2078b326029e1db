use crate::core::text::{combined_text, contains_token};
use crate::models::{AvoidEntry, Product};

/// Find the first declared allergen appearing in the product's combined text
///
/// Case-insensitive substring match over name + description + tags.
pub fn allergen_match<'a>(product: &Product, allergies: &'a [String]) -> Option<&'a str> {
    let text = combined_text(product);
    allergies
        .iter()
        .find(|allergen| contains_token(&text, allergen))
        .map(String::as_str)
}

/// Split candidates into scoreable products and an avoid list
///
/// A product matching any allergen is routed to `avoid` and never ranked.
/// Malformed candidates (missing id or name) are dropped from both lists.
pub fn partition(products: Vec<Product>, allergies: &[String]) -> (Vec<Product>, Vec<AvoidEntry>) {
    let mut safe = Vec::with_capacity(products.len());
    let mut avoid = Vec::new();

    for product in products {
        if !product.is_well_formed() {
            tracing::debug!("Skipping malformed product: {:?}", product.id);
            continue;
        }

        match allergen_match(&product, allergies) {
            Some(allergen) => avoid.push(AvoidEntry {
                product: product.name.clone(),
                reason: format!("Matches declared allergen \"{}\"", allergen),
            }),
            None => safe.push(product),
        }
    }

    (safe, avoid)
}
