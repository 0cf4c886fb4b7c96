//! Configuration for the TruthSeed gateway.
//!
//! CLI arguments and environment variable handling using clap.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use truthseed_verse::ProviderConfig;
use uuid::Uuid;

/// TruthSeed gateway - verse retrieval over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "truthseed-gateway")]
#[command(about = "HTTP gateway for TruthSeed verse retrieval")]
pub struct Args {
    /// Unique node identifier for this gateway instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Base URL of the verse API (e.g. "https://bible-api.deno.dev/api/read")
    /// When unset, the gateway serves canned mock verses instead.
    #[arg(long, env = "VERSE_API_URL")]
    pub verse_api_url: Option<String>,

    /// Translation used when a request carries none and no preference is stored
    #[arg(long, env = "VERSE_DEFAULT_TRANSLATION", default_value = "RVR60")]
    pub default_translation: String,

    /// Directory for the verse cache and preference files
    /// When unset, both stores are memory-only.
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to a truths content file overriding the embedded catalog
    #[arg(long, env = "CONTENT_PATH")]
    pub content_path: Option<PathBuf>,

    /// Verse API request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "10000")]
    pub request_timeout_ms: u64,

    /// Delay before the single server-error retry, in milliseconds
    #[arg(long, env = "RETRY_DELAY_MS", default_value = "1000")]
    pub retry_delay_ms: u64,

    /// How many recent selections /truths/random avoids repeating
    #[arg(long, env = "RECENT_AVOID_COUNT", default_value = "3")]
    pub avoid_count: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Provider configuration derived from the arguments.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.verse_api_url.clone(),
            default_translation: self.default_translation.clone(),
            timeout: Duration::from_millis(self.request_timeout_ms),
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Location of the verse cache file, when persistence is configured.
    pub fn cache_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("verse-cache.json"))
    }

    /// Location of the prefs file, when persistence is configured.
    pub fn prefs_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("prefs.json"))
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_ms == 0 {
            return Err("REQUEST_TIMEOUT_MS must be greater than zero".to_string());
        }

        if self.default_translation.is_empty() {
            return Err("VERSE_DEFAULT_TRANSLATION must not be empty".to_string());
        }

        if self.avoid_count == 0 {
            return Err("RECENT_AVOID_COUNT must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["truthseed-gateway"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults_validate() {
        let args = args(&[]);
        assert!(args.validate().is_ok());
        assert_eq!(args.default_translation, "RVR60");
        assert!(args.cache_path().is_none());
    }

    #[test]
    fn test_data_dir_derives_store_paths() {
        let args = args(&["--data-dir", "/var/lib/truthseed"]);
        assert_eq!(
            args.cache_path(),
            Some(PathBuf::from("/var/lib/truthseed/verse-cache.json"))
        );
        assert_eq!(
            args.prefs_path(),
            Some(PathBuf::from("/var/lib/truthseed/prefs.json"))
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = args(&["--request-timeout-ms", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_provider_config_mapping() {
        let args = args(&["--verse-api-url", "https://example.test/api/read"]);
        let config = args.provider_config();
        assert!(config.has_upstream());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry_delay, Duration::from_secs(1));
    }
}
