//! Health-status classification of flattened mail text.
//!
//! The monitor embeds a marker of the form
//! `Error reference: <site id>/<status>` in its notification mails, with
//! status one of: server, blocked, client, intermittent, redirection,
//! success, unknown. Matching is a case-sensitive substring search on the
//! `<site id>/` prefix — anything may trail the status token.

use tracing::debug;

/// Marker preceding the site id in notification bodies.
const REFERENCE_MARKER: &str = "Error reference: ";

/// Status token reported for a healthy site.
const STATUS_SUCCESS: &str = "success";

/// Tri-state health reading of one mail body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// The marker reported `success`.
    Healthy,
    /// The marker reported any other status.
    Unhealthy,
    /// No marker for this site in the body. Treated as healthy: no error
    /// report means nothing went wrong, per the monitor's contract.
    Unreported,
}

impl HealthState {
    /// Collapse to the boolean verdict recorded in the metric.
    pub fn is_healthy(self) -> bool {
        !matches!(self, Self::Unhealthy)
    }
}

/// Outcome of classifying one body text.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The boolean verdict, `Unreported` collapsing to healthy.
    pub healthy: bool,
    /// The underlying tri-state reading.
    pub state: HealthState,
    /// Raw status token found after the marker, for observability.
    /// `None` when the marker is absent.
    pub reference: Option<String>,
}

/// Classify a flattened body text against the configured site id.
///
/// Pure function; empty input is simply an unreported (healthy) site.
pub fn classify_text(body: &str, site_id: &str) -> Classification {
    let prefix = format!("{REFERENCE_MARKER}{site_id}/");
    let success = format!("{prefix}{STATUS_SUCCESS}");

    let state = if body.contains(&success) {
        HealthState::Healthy
    } else if body.contains(&prefix) {
        HealthState::Unhealthy
    } else {
        HealthState::Unreported
    };

    // First occurrence only; the token runs to the next whitespace.
    let reference = body.find(&prefix).map(|at| {
        let rest = &body[at + prefix.len()..];
        rest.split_whitespace().next().unwrap_or("").to_string()
    });

    debug!(site_id, ?state, ?reference, "Classified body text");

    Classification {
        healthy: state.is_healthy(),
        state,
        reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "214785651";

    #[test]
    fn success_status_is_healthy() {
        let result = classify_text("Error reference: 214785651/success", SITE);
        assert!(result.healthy);
        assert_eq!(result.state, HealthState::Healthy);
        assert_eq!(result.reference.as_deref(), Some("success"));
    }

    #[test]
    fn success_is_healthy_regardless_of_surrounding_text() {
        let body = "Dear operator,\nstatus follows Error reference: 214785651/success -- regards";
        assert!(classify_text(body, SITE).healthy);
    }

    #[test]
    fn server_status_is_unhealthy() {
        let result = classify_text("... Error reference: 214785651/server ...", SITE);
        assert!(!result.healthy);
        assert_eq!(result.state, HealthState::Unhealthy);
        assert_eq!(result.reference.as_deref(), Some("server"));
    }

    #[test]
    fn every_non_success_status_is_unhealthy() {
        for status in ["server", "blocked", "client", "intermittent", "redirection", "unknown"] {
            let body = format!("Error reference: 214785651/{status}");
            assert!(!classify_text(&body, SITE).healthy, "status {status}");
        }
    }

    #[test]
    fn unlisted_trailing_token_is_still_unhealthy() {
        // Prefix match only — the status vocabulary is not enforced.
        let result = classify_text("Error reference: 214785651/gateway-timeout", SITE);
        assert!(!result.healthy);
        assert_eq!(result.reference.as_deref(), Some("gateway-timeout"));
    }

    #[test]
    fn absent_marker_defaults_to_healthy() {
        let result = classify_text("routine newsletter, nothing to see", SITE);
        assert!(result.healthy);
        assert_eq!(result.state, HealthState::Unreported);
        assert_eq!(result.reference, None);
    }

    #[test]
    fn empty_body_defaults_to_healthy() {
        let result = classify_text("", SITE);
        assert!(result.healthy);
        assert_eq!(result.state, HealthState::Unreported);
    }

    #[test]
    fn other_site_marker_is_unreported() {
        let result = classify_text("Error reference: 999999999/server", SITE);
        assert!(result.healthy);
        assert_eq!(result.state, HealthState::Unreported);
        assert_eq!(result.reference, None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let result = classify_text("error reference: 214785651/server", SITE);
        assert_eq!(result.state, HealthState::Unreported);

        let result = classify_text("Error reference: 214785651/SUCCESS", SITE);
        assert!(!result.healthy);
    }

    #[test]
    fn marker_split_across_parts_does_not_match() {
        // Flattening inserts no separator, so a marker split across two
        // sibling parts would have matched — this asserts the converse:
        // an interrupted marker does not.
        let result = classify_text("Error reference: 2147 85651/server", SITE);
        assert_eq!(result.state, HealthState::Unreported);
    }

    #[test]
    fn first_marker_occurrence_wins_for_the_reference_token() {
        let body = "Error reference: 214785651/server then Error reference: 214785651/success";
        let result = classify_text(body, SITE);
        // Success anywhere in the body wins the verdict.
        assert!(result.healthy);
        // The captured token reports the first occurrence.
        assert_eq!(result.reference.as_deref(), Some("server"));
    }
}
