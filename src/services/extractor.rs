use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Health information extracted from a free-text pet description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedHealthInfo {
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(alias = "healthIssues", default)]
    pub health_issues: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(alias = "dietaryRestrictions", default)]
    pub dietary_restrictions: Vec<String>,
}

/// Errors from the LLM-backed extractor
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Allergen vocabulary for the rule-based scan
const ALLERGEN_KEYWORDS: [&str; 12] = [
    "chicken", "beef", "dairy", "milk", "wheat", "grain", "corn", "soy", "egg", "fish", "lamb",
    "pork",
];

/// Condition vocabulary for the rule-based scan
const CONDITION_KEYWORDS: [&str; 10] = [
    "arthritis",
    "diabetes",
    "obesity",
    "overweight",
    "dental",
    "kidney",
    "heart",
    "skin",
    "digestive",
    "anxiety",
];

/// Markers that indicate an allergy context in the description
const ALLERGY_MARKERS: [&str; 3] = ["allerg", "intoleran", "sensitive to"];

/// Dietary-restriction vocabulary
const DIET_KEYWORDS: [&str; 4] = ["grain-free", "low-fat", "hypoallergenic", "raw"];

/// Deterministic keyword extractor
///
/// Same description always yields the same result. Allergen keywords only
/// count when the text carries an allergy marker, so a mention of chicken in
/// a favorite-food sentence is not misread as an allergy.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedExtractor;

impl RuleBasedExtractor {
    pub fn extract(&self, description: &str) -> ExtractedHealthInfo {
        let text = description.to_lowercase();

        let allergies = if ALLERGY_MARKERS.iter().any(|marker| text.contains(marker)) {
            ALLERGEN_KEYWORDS
                .iter()
                .filter(|keyword| text.contains(**keyword))
                .map(|keyword| keyword.to_string())
                .collect()
        } else {
            Vec::new()
        };

        let health_issues = CONDITION_KEYWORDS
            .iter()
            .filter(|keyword| text.contains(**keyword))
            .map(|keyword| keyword.to_string())
            .collect();

        let dietary_restrictions = DIET_KEYWORDS
            .iter()
            .filter(|keyword| text.contains(**keyword))
            .map(|keyword| keyword.to_string())
            .collect();

        ExtractedHealthInfo {
            breed: None,
            health_issues,
            allergies,
            dietary_restrictions,
        }
    }
}

/// LLM-backed extractor against an OpenAI-compatible chat-completions API
pub struct LlmExtractor {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    provider: String,
    fallback: RuleBasedExtractor,
}

impl LlmExtractor {
    pub fn new(provider: String, base_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            api_key,
            model,
            provider,
            fallback: RuleBasedExtractor,
        }
    }

    async fn call(&self, description: &str) -> Result<ExtractedHealthInfo, ExtractorError> {
        let prompt = format!(
            "Extract health information from the following pet description:\n\"{}\"\n\n\
             Return a JSON object with:\n\
             {{\n  \"breed\": \"string (if mentioned)\",\n  \"healthIssues\": [\"array of health issues\"],\n  \
             \"allergies\": [\"array of allergies\"],\n  \"dietaryRestrictions\": [\"array of dietary restrictions\"]\n}}\n\n\
             Only include information explicitly mentioned or strongly implied in the description.\n\
             Return valid JSON only, no additional text.",
            description
        );

        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": 0.3,
            "max_tokens": 2000,
            "response_format": {"type": "json_object"},
            "stream": false,
        });

        let url = format!(
            "{}/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExtractorError::ApiError(format!(
                "{} returned {}",
                self.provider,
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let content = json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| ExtractorError::InvalidResponse("Missing message content".into()))?;

        // Some providers wrap JSON-mode output in markdown fences anyway
        let content = content
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();

        serde_json::from_str(content)
            .map_err(|e| ExtractorError::InvalidResponse(format!("Failed to parse extraction: {}", e)))
    }
}

/// Profile extractor capability
///
/// Two variants selected by configuration. The LLM variant fails closed: any
/// transport, API or parse failure falls back to the rule-based result.
pub enum ProfileExtractor {
    Rules(RuleBasedExtractor),
    Llm(LlmExtractor),
}

impl ProfileExtractor {
    /// Build the extractor named by configuration
    ///
    /// Unknown providers and LLM providers without an API key degrade to the
    /// rule-based variant with a logged warning.
    pub fn from_provider(
        provider: &str,
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Self {
        let (default_base, default_model) = match provider {
            "deepseek" => ("https://api.deepseek.com/v1", "deepseek-chat"),
            "kimi" => ("https://api.moonshot.cn/v1", "moonshot-v1-8k"),
            "rules" => return ProfileExtractor::Rules(RuleBasedExtractor),
            other => {
                tracing::warn!("Unknown extractor provider '{}', using rules", other);
                return ProfileExtractor::Rules(RuleBasedExtractor);
            }
        };

        match api_key {
            Some(api_key) if !api_key.is_empty() => ProfileExtractor::Llm(LlmExtractor::new(
                provider.to_string(),
                base_url.unwrap_or_else(|| default_base.to_string()),
                api_key,
                model.unwrap_or_else(|| default_model.to_string()),
            )),
            _ => {
                tracing::warn!(
                    "No API key configured for '{}', using rule-based extractor",
                    provider
                );
                ProfileExtractor::Rules(RuleBasedExtractor)
            }
        }
    }

    /// Provider tag recorded with audit records
    pub fn provider(&self) -> &str {
        match self {
            ProfileExtractor::Rules(_) => "rules",
            ProfileExtractor::Llm(llm) => &llm.provider,
        }
    }

    /// Extract health information from a description, never failing
    pub async fn extract(&self, description: &str) -> ExtractedHealthInfo {
        match self {
            ProfileExtractor::Rules(rules) => rules.extract(description),
            ProfileExtractor::Llm(llm) => match llm.call(description).await {
                Ok(info) => info,
                Err(e) => {
                    tracing::warn!("LLM extraction failed ({}), falling back to rules", e);
                    llm.fallback.extract(description)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_based_allergies_need_marker() {
        let extractor = RuleBasedExtractor;

        let with_marker = extractor.extract("He is allergic to chicken and dairy.");
        assert_eq!(with_marker.allergies, vec!["chicken", "dairy"]);

        // Chicken mentioned without an allergy context is not an allergy
        let without_marker = extractor.extract("He loves chicken treats.");
        assert!(without_marker.allergies.is_empty());
    }

    #[test]
    fn test_rule_based_conditions_and_diet() {
        let extractor = RuleBasedExtractor;
        let info = extractor.extract(
            "Senior dog with arthritis and early kidney disease, currently on a grain-free diet.",
        );

        assert_eq!(info.health_issues, vec!["arthritis", "kidney"]);
        assert_eq!(info.dietary_restrictions, vec!["grain-free"]);
        assert!(info.breed.is_none());
    }

    #[test]
    fn test_rule_based_is_deterministic() {
        let extractor = RuleBasedExtractor;
        let description = "Sensitive to grain, has skin issues.";
        assert_eq!(extractor.extract(description), extractor.extract(description));
    }

    #[tokio::test]
    async fn test_llm_extractor_parses_content() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"breed\": \"Maine Coon\", \"healthIssues\": [\"dental\"], \"allergies\": [\"fish\"], \"dietaryRestrictions\": []}"
                }
            }]
        });
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let extractor = ProfileExtractor::Llm(LlmExtractor::new(
            "deepseek".to_string(),
            server.url(),
            "test-key".to_string(),
            "deepseek-chat".to_string(),
        ));

        let info = extractor.extract("A Maine Coon with bad teeth.").await;
        assert_eq!(info.breed.as_deref(), Some("Maine Coon"));
        assert_eq!(info.health_issues, vec!["dental"]);
        assert_eq!(info.allergies, vec!["fish"]);
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back_to_rules() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let extractor = ProfileExtractor::Llm(LlmExtractor::new(
            "deepseek".to_string(),
            server.url(),
            "test-key".to_string(),
            "deepseek-chat".to_string(),
        ));

        let info = extractor.extract("She is allergic to beef.").await;
        assert_eq!(info.allergies, vec!["beef"]);
    }

    #[test]
    fn test_from_provider_without_key_degrades() {
        let extractor = ProfileExtractor::from_provider("deepseek", None, None, None);
        assert_eq!(extractor.provider(), "rules");

        let extractor = ProfileExtractor::from_provider("rules", None, None, None);
        assert_eq!(extractor.provider(), "rules");
    }
}
