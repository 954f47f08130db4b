//! # Escalation Secrets
//!
//! Shared secrets gating privileged role selection. The comparison is
//! constant-time over equal-length inputs; length is not hidden. There is no
//! rate limiting on failed attempts.

use std::fmt;

use subtle::ConstantTimeEq;

use super::assignment::RoleKind;

/// Configured secrets for privilege escalation.
///
/// The admin secret is mandatory; a doorman secret is a deployment choice.
#[derive(Clone)]
pub struct EscalationSecrets {
    admin: String,
    doorman: Option<String>,
}

impl EscalationSecrets {
    pub fn new(admin: impl Into<String>, doorman: Option<String>) -> Self {
        Self { admin: admin.into(), doorman }
    }

    /// Whether `candidate` unlocks `kind`. Only Admin and Doorman are
    /// escalatable; everything else is always `false`.
    pub fn matches(&self, kind: RoleKind, candidate: &str) -> bool {
        match kind {
            RoleKind::Admin => secret_matches(candidate, &self.admin),
            RoleKind::Doorman => self
                .doorman
                .as_deref()
                .is_some_and(|expected| secret_matches(candidate, expected)),
            RoleKind::Attendee | RoleKind::Venue => false,
        }
    }
}

// Secrets never appear in logs or panic messages.
impl fmt::Debug for EscalationSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscalationSecrets")
            .field("admin", &"<redacted>")
            .field("doorman", &self.doorman.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn secret_matches(candidate: &str, expected: &str) -> bool {
    if candidate.len() != expected.len() {
        return false;
    }
    candidate.as_bytes().ct_eq(expected.as_bytes()).into()
}
