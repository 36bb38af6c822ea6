//! Operator credential gating end and delete.

use std::fmt;

/// Static shared secret known only to the operator.
///
/// Compared by exact match. This is a deliberately simple scheme for a
/// low-stakes deployment, not a production trust boundary. The secret is
/// never printed by [`fmt::Debug`].
#[derive(Clone, PartialEq, Eq)]
pub struct OperatorToken(String);

impl OperatorToken {
    /// Wraps the configured secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns `true` if `candidate` is exactly the configured secret.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        !self.0.is_empty() && self.0 == candidate
    }
}

impl fmt::Debug for OperatorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OperatorToken(<redacted>)")
    }
}
