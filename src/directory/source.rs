//! Upstream doctor list.
//!
//! # Responsibilities
//! - Issue the single GET against the configured endpoint
//! - Require a JSON array at the top level
//! - Hand back raw records; normalization happens in the session
//!
//! # Design Decisions
//! - Errors are typed here and swallowed by the session, which substitutes
//!   an empty list
//! - Request timeout comes from configuration

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::SourceConfig;

/// Errors that can occur while fetching the doctor list.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure or timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Body was not valid JSON.
    #[error("Invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Body was JSON but not an array of records.
    #[error("Expected a JSON array of doctors, got {0}")]
    NotAnArray(&'static str),

    /// Configured endpoint is not a valid URL.
    #[error("Invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Anything that can produce the raw doctor records.
pub trait DoctorSource: Send + Sync {
    /// Fetch every raw record.
    fn fetch(&self) -> impl Future<Output = SourceResult<Vec<Value>>> + Send;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// Fetches records from a remote JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpDoctorSource {
    client: reqwest::Client,
    url: url::Url,
}

impl HttpDoctorSource {
    /// Create a source from configuration.
    pub fn new(config: &SourceConfig) -> SourceResult<Self> {
        let url: url::Url = config.url.parse().map_err(|e: url::ParseError| {
            SourceError::InvalidUrl {
                url: config.url.clone(),
                reason: e.to_string(),
            }
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

impl DoctorSource for HttpDoctorSource {
    async fn fetch(&self) -> SourceResult<Vec<Value>> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        records_from(value)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// A fixed set of raw records, for tests and offline fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticDoctorSource {
    records: Vec<Value>,
}

impl StaticDoctorSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Build from a JSON document that must be an array.
    pub fn from_json(body: &str) -> SourceResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::new(records_from(value)?))
    }
}

impl DoctorSource for StaticDoctorSource {
    async fn fetch(&self) -> SourceResult<Vec<Value>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }
}

fn records_from(value: Value) -> SourceResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Err(SourceError::NotAnArray("object")),
        Value::String(_) => Err(SourceError::NotAnArray("string")),
        Value::Number(_) => Err(SourceError::NotAnArray("number")),
        Value::Bool(_) => Err(SourceError::NotAnArray("boolean")),
        Value::Null => Err(SourceError::NotAnArray("null")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        let config = SourceConfig {
            url: "not a url".to_string(),
            ..SourceConfig::default()
        };
        let err = HttpDoctorSource::new(&config).unwrap_err();
        assert!(matches!(err, SourceError::InvalidUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_default_source_url() {
        let source = HttpDoctorSource::new(&SourceConfig::default()).unwrap();
        assert_eq!(source.url().scheme(), "https");
    }

    #[test]
    fn test_static_source_requires_array() {
        assert!(StaticDoctorSource::from_json(r#"[{"name": "Dr. A"}]"#).is_ok());

        let err = StaticDoctorSource::from_json(r#"{"doctors": []}"#).unwrap_err();
        assert_eq!(err.to_string(), "Expected a JSON array of doctors, got object");

        assert!(matches!(
            StaticDoctorSource::from_json("not json"),
            Err(SourceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_static_source_fetch() {
        let source = StaticDoctorSource::from_json(r#"[{"id": "1"}, {"id": "2"}]"#).unwrap();
        let records = source.fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(source.describe(), "static (2 records)");
    }
}
