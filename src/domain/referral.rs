//! Referral click records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{GiveawayId, NetworkAddress, ParticipantId, ReferralId};

/// Referrer reference carried by a referral link, kept as supplied.
///
/// Links are shared outside the service, so the value may be anything. Only
/// a reference that parses as a [`ParticipantId`] can ever be credited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ReferrerRef(String);

impl ReferrerRef {
    /// Creates a reference from raw text, trimming surrounding whitespace.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Returns the reference text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the reference is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The participant this reference names, if it is a well-formed id.
    #[must_use]
    pub fn participant_id(&self) -> Option<ParticipantId> {
        uuid::Uuid::parse_str(&self.0)
            .ok()
            .map(ParticipantId::from_uuid)
    }
}

impl fmt::Display for ReferrerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ParticipantId> for ReferrerRef {
    fn from(id: ParticipantId) -> Self {
        Self(id.to_string())
    }
}

/// A visit to a giveaway through a participant's referral link.
///
/// At most one click exists per `(giveaway_id, clicker_address)`; the ledger
/// enforces this before insertion. `referrer_id` is stored as supplied even
/// when it matches no participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralClick {
    /// Click identifier.
    pub id: ReferralId,
    /// Giveaway the click targeted.
    pub giveaway_id: GiveawayId,
    /// Referrer named by the link.
    pub referrer_id: ReferrerRef,
    /// Address of the visitor.
    #[serde(rename = "clickerIp")]
    pub clicker_address: NetworkAddress,
    /// Click timestamp.
    pub timestamp: DateTime<Utc>,
    /// Always `true` for recorded clicks.
    pub is_valid: bool,
}
