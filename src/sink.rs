//! Metric sink collaborator — records the health verdict as a datum.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::SinkError;

/// Write access to the metrics backend.
///
/// One call per invocation. Emission is not idempotent — every call
/// records a new datum; deduplication belongs to the backend, not here.
#[async_trait]
pub trait MetricSink: Send + Sync {
    /// Record one health verdict.
    async fn emit_health(&self, healthy: bool) -> Result<(), SinkError>;
}

/// One timestamped metric value with its single dimension.
#[derive(Debug, Serialize)]
struct Datum<'a> {
    metric: &'a str,
    dimension: Dimension<'a>,
    value: f64,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct Dimension<'a> {
    name: &'a str,
    value: &'a str,
}

/// HTTP-backed metric sink: POSTs one JSON datum per verdict.
pub struct HttpMetricSink {
    endpoint: String,
    client: reqwest::Client,
    metric_name: String,
    dimension_name: String,
    dimension_value: String,
}

impl HttpMetricSink {
    pub fn new(
        endpoint: impl Into<String>,
        metric_name: impl Into<String>,
        dimension_name: impl Into<String>,
        dimension_value: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
            metric_name: metric_name.into(),
            dimension_name: dimension_name.into(),
            dimension_value: dimension_value.into(),
        }
    }
}

#[async_trait]
impl MetricSink for HttpMetricSink {
    async fn emit_health(&self, healthy: bool) -> Result<(), SinkError> {
        let datum = Datum {
            metric: &self.metric_name,
            dimension: Dimension {
                name: &self.dimension_name,
                value: &self.dimension_value,
            },
            value: if healthy { 1.0 } else { 0.0 },
            timestamp: Utc::now(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&datum)
            .send()
            .await
            .map_err(|e| SinkError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SinkError::UnexpectedStatus(response.status().as_u16()));
        }

        info!(
            metric = %self.metric_name,
            value = datum.value,
            "Recorded health datum"
        );
        Ok(())
    }
}
