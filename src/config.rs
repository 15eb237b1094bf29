//! Static configuration.

use crate::filter::{FilterField, FilterModifier, FilterRule};

/// Classifier configuration.
///
/// All values are static per deployment; nothing here is derived from the
/// mail being classified.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site identifier embedded in the monitor's status marker.
    pub site_id: String,
    /// Filter value the inbound event's rule must carry to be in scope.
    pub sender_marker: String,
    /// Metric name recorded per verdict.
    pub metric_name: String,
    /// Name of the single dimension attached to each datum.
    pub dimension_name: String,
    /// Value of the single dimension attached to each datum.
    pub dimension_value: String,
    /// Base URL of the mail store.
    pub store_url: String,
    /// Endpoint URL of the metric sink.
    pub sink_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_id: "214785651".to_string(),
            sender_marker: "@jetpack".to_string(),
            metric_name: "ExternalHealthCheckStatus".to_string(),
            dimension_name: "HostedZoneId".to_string(),
            dimension_value: "Z04702051WDZH2C7LSLUO".to_string(),
            store_url: "http://localhost:9000".to_string(),
            sink_url: "http://localhost:9100/metrics".to_string(),
        }
    }
}

impl Config {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            site_id: env_or("MAILGAUGE_SITE_ID", defaults.site_id),
            sender_marker: env_or("MAILGAUGE_SENDER_MARKER", defaults.sender_marker),
            metric_name: env_or("MAILGAUGE_METRIC_NAME", defaults.metric_name),
            dimension_name: env_or("MAILGAUGE_DIMENSION_NAME", defaults.dimension_name),
            dimension_value: env_or("MAILGAUGE_DIMENSION_VALUE", defaults.dimension_value),
            store_url: env_or("MAILGAUGE_STORE_URL", defaults.store_url),
            sink_url: env_or("MAILGAUGE_SINK_URL", defaults.sink_url),
        }
    }

    /// The one rule this classifier accepts on inbound events: mails the
    /// receiver selected because the sender marker contained their From
    /// address.
    pub fn expected_rule(&self) -> FilterRule {
        FilterRule::new(
            FilterField::From,
            FilterModifier::Contains,
            self.sender_marker.clone(),
        )
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}
