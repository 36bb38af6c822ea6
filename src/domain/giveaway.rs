//! Giveaways and their participants.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::{CreatorId, GiveawayId, NetworkAddress, ParticipantId};

/// Seeds for the fallback avatar pool.
const AVATAR_SEEDS: [&str; 8] = [
    "Sakura", "Hikaru", "Yuki", "Ren", "Aiko", "Haru", "Kaito", "Mei",
];

/// Picks one avatar URL from the fixed fallback pool.
pub fn fallback_avatar<R: Rng + ?Sized>(rng: &mut R) -> String {
    AVATAR_SEEDS
        .choose(rng)
        .map(|seed| format!("https://api.dicebear.com/7.x/adventurer/svg?seed={seed}"))
        .unwrap_or_default()
}

/// Validated input for creating a giveaway.
#[derive(Debug, Clone)]
pub struct NewGiveaway {
    /// Giveaway title.
    pub title: String,
    /// Display name of the host.
    pub host_name: String,
    /// Reference to the host's external channel.
    pub channel_url: String,
    /// When the giveaway is meant to close.
    pub end_date: DateTime<Utc>,
}

/// Input for joining a giveaway.
#[derive(Debug, Clone)]
pub struct NewParticipant {
    /// Display name; must be non-blank.
    pub name: String,
    /// Avatar reference; a pool avatar is assigned when absent or blank.
    pub avatar: Option<String>,
}

/// An entrant of a single giveaway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Participant identifier, used in referral links.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Avatar reference.
    pub avatar: String,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
    /// Address the participant joined from.
    #[serde(rename = "ip")]
    pub address: NetworkAddress,
    /// Number of distinct addresses credited to this participant.
    pub referrals: u32,
}

/// A time-boxed contest with an ordered participant pool.
///
/// Participants are kept in join order. `winner` is `Some` exactly when
/// `is_active` is `false`: both are set together by
/// [`super::Ledger::end_giveaway`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Giveaway {
    /// Giveaway identifier.
    pub id: GiveawayId,
    /// Giveaway title.
    pub title: String,
    /// Display name of the host.
    pub host_name: String,
    /// Reference to the host's external channel.
    pub channel_url: String,
    /// Scheduled end.
    pub end_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Delete secret handed to the creator.
    pub creator_id: CreatorId,
    /// Participants in join order.
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Drawn winner, once ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Participant>,
    /// `false` once the giveaway has ended.
    pub is_active: bool,
}

impl Giveaway {
    /// Returns the participant that joined from `address`, if any.
    #[must_use]
    pub fn participant_by_address(&self, address: &NetworkAddress) -> Option<&Participant> {
        self.participants.iter().find(|p| p.address == *address)
    }

    /// Returns a mutable reference to the participant with the given id.
    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fallback_avatar_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let avatar = fallback_avatar(&mut rng);
            assert!(
                AVATAR_SEEDS
                    .iter()
                    .any(|seed| avatar.ends_with(&format!("seed={seed}")))
            );
        }
    }

    #[test]
    fn participant_address_serializes_as_ip() {
        let mut rng = StdRng::seed_from_u64(5);
        let participant = Participant {
            id: ParticipantId::generate(&mut rng),
            name: "Alice".to_string(),
            avatar: fallback_avatar(&mut rng),
            joined_at: Utc::now(),
            address: NetworkAddress::new("10.0.0.1"),
            referrals: 0,
        };
        let json = serde_json::to_value(&participant).unwrap_or_default();
        assert_eq!(json["ip"], "10.0.0.1");
        assert_eq!(json["referrals"], 0);
        assert!(json.get("joinedAt").is_some());
    }
}
