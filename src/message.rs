//! Parsed mail model.
//!
//! `Mail` is the transient, owned view of one notification message: the
//! sender mailboxes and a recursive `Body` tree. It lives only for the
//! duration of a single classification and is never persisted.

use mail_parser::{Message, MessagePart, MessageParser, MimeHeaders, PartType};
use tracing::debug;

use crate::error::Error;

// ── Mailbox ─────────────────────────────────────────────────────────

/// One sender address, with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name, if the header carried one.
    pub name: Option<String>,
    /// The addr-spec itself (`user@host`).
    pub address: String,
}

impl std::fmt::Display for Mailbox {
    /// `"Name <user@host>"` when a display name is present, else the bare
    /// addr-spec. Filter matching relies on this exact form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

// ── Body ────────────────────────────────────────────────────────────

/// Recursive mail body.
///
/// Text parts carry their decoded content (HTML parts decode to their raw
/// markup). Multiparts hold an ordered sequence of child bodies. Anything
/// else — binary attachments, inline images — is `Opaque` and contributes
/// nothing when the body is flattened to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Multipart(Vec<Body>),
    Opaque,
}

// ── Mail ────────────────────────────────────────────────────────────

/// A parsed notification mail.
#[derive(Debug, Clone)]
pub struct Mail {
    /// All `From:` mailboxes, in header order.
    pub senders: Vec<Mailbox>,
    /// Content type of the top-level entity, e.g. `multipart/alternative`.
    pub content_type: String,
    /// The body tree.
    pub body: Body,
}

impl Mail {
    /// Decode raw RFC 822 bytes into a `Mail`.
    ///
    /// Fails with `Error::MalformedContent` only when the bytes cannot be
    /// decoded as a message at all. Unsupported or empty parts are not an
    /// error — they become `Opaque` leaves.
    pub fn parse(raw: &[u8]) -> Result<Self, Error> {
        let parsed = MessageParser::default()
            .parse(raw)
            .ok_or_else(|| Error::MalformedContent("undecodable mail bytes".into()))?;

        let senders: Vec<Mailbox> = parsed
            .from()
            .map(|addrs| {
                addrs
                    .iter()
                    .map(|addr| Mailbox {
                        name: addr.name().map(str::to_string),
                        address: addr.address().unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let content_type = content_type_of(parsed.root_part());
        let body = body_from_part(&parsed, parsed.root_part());

        debug!(
            senders = senders.len(),
            content_type = %content_type,
            "Decoded mail"
        );

        Ok(Self {
            senders,
            content_type,
            body,
        })
    }
}

/// `type/subtype` of a part, defaulting to `text/plain` when absent.
fn content_type_of(part: &MessagePart<'_>) -> String {
    part.content_type()
        .map(|ct| match ct.subtype() {
            Some(subtype) => format!("{}/{}", ct.ctype(), subtype),
            None => ct.ctype().to_string(),
        })
        .unwrap_or_else(|| "text/plain".to_string())
}

/// Convert one mail-parser part into a `Body` node.
///
/// Nesting depth is bounded by the parser itself, so plain recursion over
/// the part table is safe here.
fn body_from_part(message: &Message<'_>, part: &MessagePart<'_>) -> Body {
    match &part.body {
        PartType::Text(text) | PartType::Html(text) => Body::Text(text.to_string()),
        PartType::Multipart(children) => Body::Multipart(
            children
                .iter()
                .filter_map(|id| message.part(*id))
                .map(|child| body_from_part(message, child))
                .collect(),
        ),
        PartType::Message(nested) => body_from_part(nested, nested.root_part()),
        PartType::Binary(_) | PartType::InlineBinary(_) => Body::Opaque,
    }
}
