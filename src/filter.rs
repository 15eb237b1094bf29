//! Sender filter rules.
//!
//! A `FilterRule` is the declarative match spec attached to each inbound
//! event by the upstream mail receiver: which header field to look at,
//! how to compare, and the value to compare with. Rules are data, never
//! derived from the mail itself.

use serde::{Deserialize, Serialize};

use crate::message::Mailbox;

/// Mail field a rule matches against.
///
/// Unrecognized wire values deserialize to `Unrecognized` and never match,
/// rather than failing the whole event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterField {
    From,
    To,
    Subject,
    #[serde(other)]
    Unrecognized,
}

/// How a rule value is compared with the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterModifier {
    Contains,
    Exact,
    #[serde(other)]
    Unrecognized,
}

/// Declarative sender-match rule: field, modifier, value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    pub field: FilterField,
    pub modifier: FilterModifier,
    pub value: String,
}

impl FilterRule {
    pub fn new(field: FilterField, modifier: FilterModifier, value: impl Into<String>) -> Self {
        Self {
            field,
            modifier,
            value: value.into(),
        }
    }

    /// True iff a mail with the given senders is selected by this rule.
    ///
    /// Pure function of the rule and the sender list. `To` and `Subject`
    /// rules are accepted on the wire but select nothing yet, matching
    /// the upstream receiver's behavior.
    pub fn matches(&self, senders: &[Mailbox]) -> bool {
        match (self.field, self.modifier) {
            (FilterField::From, FilterModifier::Contains) => {
                // Note the direction: the configured value must contain the
                // sender's string form, not the other way around.
                // TODO: confirm the value-contains-address direction with the
                // monitor owners before ever inverting it.
                senders
                    .iter()
                    .any(|mailbox| self.value.contains(&mailbox.to_string()))
            }
            (FilterField::From, FilterModifier::Exact) => {
                let wanted = addr_spec(&self.value);
                senders
                    .iter()
                    .any(|mailbox| mailbox.address.eq_ignore_ascii_case(wanted))
            }
            _ => false,
        }
    }
}

/// Addr-spec portion of an address string that may carry a display name.
///
/// `"Website Monitor <alerts@jetpack.com>"` → `"alerts@jetpack.com"`;
/// a bare address passes through trimmed.
fn addr_spec(value: &str) -> &str {
    match (value.rfind('<'), value.rfind('>')) {
        (Some(open), Some(close)) if open < close => value[open + 1..close].trim(),
        _ => value.trim(),
    }
}
