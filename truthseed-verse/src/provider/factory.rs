//! Provider selection.
//!
//! Chooses the live provider when the verse API is configured, else falls
//! back to the mock provider with a warning. This is the deployment-time
//! half of the fallback chain; the call-time half lives in the service.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::api::ApiVerseProvider;
use super::mock::MockVerseProvider;
use super::traits::VerseProvider;
use crate::client::VerseApiClient;

/// Configuration for provider construction.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the verse API; `None` selects the mock provider
    pub base_url: Option<String>,
    /// Translation used when a reference carries none
    pub default_translation: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Delay before the single server-error retry
    pub retry_delay: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            default_translation: "RVR60".to_string(),
            timeout: Duration::from_secs(10),
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl ProviderConfig {
    /// Whether the live provider can be constructed from this config.
    pub fn has_upstream(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Create the provider selected by the configuration.
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn VerseProvider> {
    match config.base_url.as_deref() {
        Some(base_url) if !base_url.is_empty() => {
            let client = VerseApiClient::new(base_url, &config.default_translation)
                .with_timing(config.timeout, config.retry_delay);
            Arc::new(ApiVerseProvider::new(client))
        }
        _ => {
            warn!("verse API not configured, falling back to mock provider");
            Arc::new(MockVerseProvider::new())
        }
    }
}
