use reqwest::Client;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Best-effort notifier for the external recommendation vault
///
/// Hashes the serialized input and output of a run and submits them after the
/// response has been computed. Never gates or mutates the result: failures are
/// logged and dropped, and an unconfigured notifier is a no-op.
pub struct VaultNotifier {
    client: Client,
    endpoint: Option<String>,
}

impl VaultNotifier {
    pub fn new(endpoint: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, endpoint }
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Submit hashes for one recommendation run
    pub async fn notify(&self, pet_name: &str, input: &Value, output: &Value) {
        let Some(endpoint) = &self.endpoint else {
            return;
        };

        let payload = json!({
            "petName": pet_name,
            "queryHash": hash_value(input),
            "resultHash": hash_value(output),
        });

        match self.client.post(endpoint).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Vault notified for {}", pet_name);
            }
            Ok(response) => {
                tracing::warn!("Vault rejected notification: {}", response.status());
            }
            Err(e) => {
                tracing::warn!("Vault notification failed: {}", e);
            }
        }
    }
}

/// Hex-encoded SHA-256 of a JSON value's canonical string form
fn hash_value(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_and_hex() {
        let value = json!({"a": 1, "b": ["x", "y"]});
        let first = hash_value(&value);
        let second = hash_value(&value);

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_different_inputs_hash_differently() {
        assert_ne!(hash_value(&json!({"a": 1})), hash_value(&json!({"a": 2})));
    }

    #[tokio::test]
    async fn test_unconfigured_notifier_is_noop() {
        let notifier = VaultNotifier::new(None);
        assert!(!notifier.is_enabled());
        // Must not panic or attempt any request
        notifier.notify("Mimi", &json!({}), &json!({})).await;
    }

    #[tokio::test]
    async fn test_notify_posts_hashes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/vault")
            .match_body(mockito::Matcher::PartialJson(json!({"petName": "Mimi"})))
            .with_status(200)
            .create_async()
            .await;

        let notifier = VaultNotifier::new(Some(format!("{}/vault", server.url())));
        notifier
            .notify("Mimi", &json!({"query": "food"}), &json!({"ok": true}))
            .await;

        mock.assert_async().await;
    }
}
