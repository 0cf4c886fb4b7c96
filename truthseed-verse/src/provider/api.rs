//! Live verse provider backed by the verse API.

use async_trait::async_trait;

use super::traits::{FetchVerseResult, VerseProvider};
use crate::client::VerseApiClient;
use crate::reference::Reference;

/// Provider that fetches verses over HTTP.
///
/// Wraps [`VerseApiClient`]; the client already collapses every transport,
/// content, and lookup failure to `None`, so this adapter only has to shape
/// the outcome into the provider contract.
pub struct ApiVerseProvider {
    client: VerseApiClient,
}

impl ApiVerseProvider {
    pub fn new(client: VerseApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VerseProvider for ApiVerseProvider {
    fn name(&self) -> &str {
        "verse-api"
    }

    fn is_configured(&self) -> bool {
        // The backing API is unauthenticated; holding a client means the
        // base URL was present at construction.
        true
    }

    async fn fetch_verse(&self, reference: &Reference) -> FetchVerseResult {
        match self.client.fetch_verse(reference).await {
            Some(data) => FetchVerseResult::verse(data.text, reference.clone(), data.translation),
            None => FetchVerseResult::error(
                format!("Unable to fetch verse: {}", reference.display),
                reference.clone(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_api_provider_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nvi/juan/3/16"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "verse": "Porque de tal manera amó Dios al mundo..."
            })))
            .mount(&server)
            .await;

        let client = VerseApiClient::new(server.uri(), "nvi")
            .with_timing(Duration::from_millis(500), Duration::from_millis(10));
        let provider = ApiVerseProvider::new(client);

        assert!(provider.is_configured());
        let reference = Reference::single("Juan", 3, 16, "Juan 3:16", "nvi");
        let result = provider.fetch_verse(&reference).await;
        let verse = result.as_verse().expect("should succeed");
        assert_eq!(verse.text, "Porque de tal manera amó Dios al mundo...");
        assert_eq!(verse.translation, "nvi");
        assert_eq!(verse.reference, reference);
    }

    #[tokio::test]
    async fn test_api_provider_failure_is_error_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = VerseApiClient::new(server.uri(), "nvi")
            .with_timing(Duration::from_millis(500), Duration::from_millis(10));
        let provider = ApiVerseProvider::new(client);

        let reference = Reference::single("Juan", 99, 99, "Juan 99:99", "nvi");
        let result = provider.fetch_verse(&reference).await;
        assert!(result.is_error());
    }
}
