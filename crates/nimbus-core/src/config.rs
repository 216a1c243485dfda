//! Client configuration for the Nimbus SDK.
//!
//! All settings can be overridden through environment variables, so a
//! client built with [`NimbusConfig::from_env`] picks up deployment
//! defaults without code changes.

use crate::types::NimbusRegion;

/// Shared configuration for Nimbus service clients.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NimbusConfig {
    /// Base endpoint URL for API calls.
    pub endpoint: String,
    /// Region requests are addressed to.
    pub region: NimbusRegion,
    /// Whether listing iterators speculatively fetch the next page while
    /// the current one is being consumed.
    pub prefetch: bool,
    /// Log level.
    pub log_level: String,
}

impl Default for NimbusConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.nimbus.cloud".to_owned(),
            region: NimbusRegion::default(),
            prefetch: true,
            log_level: "info".to_owned(),
        }
    }
}

impl NimbusConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("NIMBUS_ENDPOINT") {
            config.endpoint = v;
        }
        if let Ok(v) = std::env::var("NIMBUS_REGION") {
            config.region = NimbusRegion::new(v);
        }
        if let Ok(v) = std::env::var("NIMBUS_PREFETCH") {
            config.prefetch = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Disable next-page prefetching.
    #[must_use]
    pub fn without_prefetch(mut self) -> Self {
        self.prefetch = false;
        self
    }
}
