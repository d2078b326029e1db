use crate::models::{Product, Species};

/// Tokens accepted as an "any age" marker. Matched against tags only — "all"
/// as a substring would hit words like "small".
const ALL_AGES_TAGS: [&str; 2] = ["all", "all ages"];

/// Age bucket derived from a pet's age in years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    Young,
    Adult,
    Senior,
}

impl AgeBucket {
    /// Bucket boundaries: under 1 year young, 7 and over senior
    pub fn from_age(age: f64) -> Self {
        if age < 1.0 {
            AgeBucket::Young
        } else if age >= 7.0 {
            AgeBucket::Senior
        } else {
            AgeBucket::Adult
        }
    }

    /// Text tokens that identify products aimed at this bucket
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            AgeBucket::Young => &["puppy", "kitten", "young"],
            AgeBucket::Adult => &["adult"],
            AgeBucket::Senior => &["senior"],
        }
    }
}

/// Lowercased name + description + tags, the text every token match runs over
pub fn combined_text(product: &Product) -> String {
    let mut text = format!("{} {}", product.name, product.description);
    for tag in &product.tags {
        text.push(' ');
        text.push_str(tag);
    }
    text.to_lowercase()
}

/// Case-insensitive substring containment. Empty tokens never match.
pub fn contains_token(text: &str, token: &str) -> bool {
    let token = token.trim();
    if token.is_empty() {
        return false;
    }
    text.contains(&token.to_lowercase())
}

/// Whether the product carries the pet's species as a tag
pub fn has_species_tag(product: &Product, species: Species) -> bool {
    product
        .tags
        .iter()
        .any(|tag| tag.trim().eq_ignore_ascii_case(species.as_str()))
}

/// Whether the product's combined text targets the given age bucket
pub fn matches_age_bucket(product: &Product, text: &str, bucket: AgeBucket) -> bool {
    let all_ages = product.tags.iter().any(|tag| {
        let tag = tag.trim();
        ALL_AGES_TAGS.iter().any(|all| tag.eq_ignore_ascii_case(all))
    });
    if all_ages {
        return true;
    }

    bucket.tokens().iter().any(|token| contains_token(text, token))
}
