//! Classification pipeline — one pass from raw event to recorded verdict.
//!
//! Flow:
//! 1. Decode the event envelope into a stored-mail reference + filter rule
//! 2. Scope gate — the rule must be the configured monitor rule
//! 3. Fetch the raw mail from the store
//! 4. Parse and flatten the body to text
//! 5. Classify against the site id
//! 6. Record the verdict in the metric sink
//!
//! No retries, no state across invocations. Out-of-scope events abort
//! before the store is ever contacted, and a run that fails anywhere
//! never reaches the sink.

use std::sync::Arc;

use tracing::{debug, info};

use crate::classify;
use crate::config::Config;
use crate::error::Error;
use crate::event;
use crate::extract;
use crate::message::Mail;
use crate::sink::MetricSink;
use crate::store::MailStore;

/// The classification pipeline, with its collaborators injected at
/// construction.
pub struct Pipeline {
    store: Arc<dyn MailStore>,
    sink: Arc<dyn MetricSink>,
    config: Config,
}

impl Pipeline {
    pub fn new(store: Arc<dyn MailStore>, sink: Arc<dyn MetricSink>, config: Config) -> Self {
        Self {
            store,
            sink,
            config,
        }
    }

    /// Classify one notification event and record the verdict.
    ///
    /// Returns the result string callers observe: `"healthy : true"` or
    /// `"healthy : false"`.
    pub async fn classify(&self, raw_event: &str) -> Result<String, Error> {
        let payload = event::parse_event(raw_event)?;

        info!(
            bucket = %payload.bucket,
            key = %payload.key,
            "Processing notification event"
        );

        if payload.filter != self.config.expected_rule() {
            return Err(Error::NotInScope(format!(
                "event filter ({:?} {:?} {:?}) is not the monitor rule",
                payload.filter.field, payload.filter.modifier, payload.filter.value
            )));
        }

        let raw_mail = self.store.fetch(&payload.bucket, &payload.key).await?;
        let mail = Mail::parse(&raw_mail)?;

        debug!(
            content_type = %mail.content_type,
            senders = ?mail.senders.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Parsed stored mail"
        );

        let text = extract::flatten_text(&mail.body)?;
        let classification = classify::classify_text(&text, &self.config.site_id);

        info!(
            healthy = classification.healthy,
            reference = ?classification.reference,
            "Derived health verdict"
        );

        self.sink.emit_health(classification.healthy).await?;

        Ok(format!("healthy : {}", classification.healthy))
    }
}
