//! Inbound event envelope.
//!
//! The mail receiver publishes each filtered mail as a notification whose
//! record carries a JSON string; that string decodes to a destination
//! event whose `responsePayload` is the part we consume: where the raw
//! mail is stored and which filter rule selected it. Everything else in
//! the envelope (timestamps, topic metadata) is ignored.

use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::filter::FilterRule;

/// Outer notification envelope: a list of records.
#[derive(Debug, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "Records")]
    pub records: Vec<NotificationRecord>,
}

/// One record, wrapping the published message.
#[derive(Debug, Deserialize)]
pub struct NotificationRecord {
    #[serde(rename = "Sns")]
    pub topic: TopicMessage,
}

/// The published message body — itself a JSON document.
#[derive(Debug, Deserialize)]
pub struct TopicMessage {
    #[serde(rename = "Message")]
    pub message: String,
}

/// The nested destination event carried inside the record message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationEvent {
    pub response_payload: StoredMail,
}

/// The payload this classifier consumes: a stored mail reference plus the
/// filter rule that selected it upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredMail {
    /// Bucket holding the raw mail file.
    #[serde(rename = "s3Bucket")]
    pub bucket: String,
    /// Object key of the raw mail file.
    #[serde(rename = "s3Key")]
    pub key: String,
    /// Rule the upstream receiver matched this mail with.
    pub filter: FilterRule,
}

/// Decode a raw event into the stored-mail payload.
///
/// Works through the envelope layer by layer; any missing piece — no
/// records, unparseable JSON at either level — is `Error::MalformedEvent`.
pub fn parse_event(raw: &str) -> Result<StoredMail, Error> {
    let envelope: NotificationEvent = serde_json::from_str(raw)
        .map_err(|e| Error::MalformedEvent(format!("envelope: {e}")))?;

    let record = envelope
        .records
        .first()
        .ok_or_else(|| Error::MalformedEvent("no records in event".into()))?;

    let destination: DestinationEvent = serde_json::from_str(&record.topic.message)
        .map_err(|e| Error::MalformedEvent(format!("destination event: {e}")))?;

    let payload = destination.response_payload;
    debug!(bucket = %payload.bucket, key = %payload.key, "Decoded event payload");

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterField, FilterModifier};

    fn wrap(message: &str) -> String {
        serde_json::json!({
            "Records": [{
                "EventSource": "notification",
                "Sns": {
                    "Type": "Notification",
                    "Timestamp": "2024-06-01T10:00:00.000Z",
                    "Message": message,
                }
            }]
        })
        .to_string()
    }

    #[test]
    fn parses_full_envelope() {
        let message = serde_json::json!({
            "version": "1.0",
            "timestamp": "2024-06-01T10:00:00.000Z",
            "responsePayload": {
                "s3Bucket": "monitor-mail",
                "s3Key": "incoming/alert.eml",
                "filter": {"field": "FROM", "modifier": "CONTAINS", "value": "@jetpack"},
            }
        })
        .to_string();

        let payload = parse_event(&wrap(&message)).unwrap();
        assert_eq!(payload.bucket, "monitor-mail");
        assert_eq!(payload.key, "incoming/alert.eml");
        assert_eq!(payload.filter.field, FilterField::From);
        assert_eq!(payload.filter.modifier, FilterModifier::Contains);
        assert_eq!(payload.filter.value, "@jetpack");
    }

    #[test]
    fn unknown_envelope_fields_are_ignored() {
        let message = serde_json::json!({
            "responsePayload": {
                "s3Bucket": "b",
                "s3Key": "k",
                "filter": {"field": "FROM", "modifier": "EXACT", "value": "v"},
                "extra": {"nested": true},
            },
            "requestContext": {"condition": "Success"},
        })
        .to_string();

        assert!(parse_event(&wrap(&message)).is_ok());
    }

    #[test]
    fn invalid_outer_json_is_malformed() {
        let err = parse_event("not json at all").unwrap_err();
        assert!(matches!(err, Error::MalformedEvent(_)));
    }

    #[test]
    fn empty_record_list_is_malformed() {
        let err = parse_event(r#"{"Records": []}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedEvent(_)));
    }

    #[test]
    fn invalid_nested_message_is_malformed() {
        let err = parse_event(&wrap("{{ broken")).unwrap_err();
        assert!(matches!(err, Error::MalformedEvent(_)));
    }

    #[test]
    fn missing_payload_fields_are_malformed() {
        let message = serde_json::json!({
            "responsePayload": {"s3Bucket": "only-the-bucket"}
        })
        .to_string();
        let err = parse_event(&wrap(&message)).unwrap_err();
        assert!(matches!(err, Error::MalformedEvent(_)));
    }
}
