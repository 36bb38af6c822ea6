//! The giveaway ledger: all collections plus the lifecycle operations.
//!
//! [`Ledger`] is plain data. Every operation is a synchronous method that
//! validates its preconditions first and mutates only once all checks have
//! passed, so a failed call leaves the ledger untouched. Randomness (ids,
//! fallback avatars, winner draw) and the clock are supplied by the caller.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::giveaway::fallback_avatar;
use super::{
    CreatorId, Giveaway, GiveawayId, NetworkAddress, NewGiveaway, NewParticipant, Participant,
    ParticipantId, ReferralClick, ReferralId, ReferrerRef,
};
use crate::error::LedgerError;

/// Maximum number of entries returned by [`Ledger::leaderboard`].
pub const LEADERBOARD_SIZE: usize = 10;

/// Complete persisted state of the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ledger {
    giveaways: Vec<Giveaway>,
    referral_clicks: Vec<ReferralClick>,
    channel_joins: BTreeSet<NetworkAddress>,
}

/// Result of deleting a giveaway.
#[derive(Debug, Clone)]
pub struct DeletedGiveaway {
    /// The removed giveaway.
    pub giveaway: Giveaway,
    /// Number of referral clicks removed along with it.
    pub removed_clicks: usize,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All giveaways in creation order.
    #[must_use]
    pub fn giveaways(&self) -> &[Giveaway] {
        &self.giveaways
    }

    /// All recorded referral clicks in insertion order.
    #[must_use]
    pub fn referral_clicks(&self) -> &[ReferralClick] {
        &self.referral_clicks
    }

    /// Returns the giveaway with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::GiveawayNotFound`] if it does not exist.
    pub fn giveaway(&self, id: GiveawayId) -> Result<&Giveaway, LedgerError> {
        self.giveaways
            .iter()
            .find(|g| g.id == id)
            .ok_or(LedgerError::GiveawayNotFound(id))
    }

    fn giveaway_mut(&mut self, id: GiveawayId) -> Result<&mut Giveaway, LedgerError> {
        self.giveaways
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(LedgerError::GiveawayNotFound(id))
    }

    fn active_giveaway_mut(&mut self, id: GiveawayId) -> Result<&mut Giveaway, LedgerError> {
        let giveaway = self.giveaway_mut(id)?;
        if !giveaway.is_active {
            return Err(LedgerError::GiveawayInactive(id));
        }
        Ok(giveaway)
    }

    /// Creates a new, active giveaway with no participants.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidRequest`] if the title, host name or
    /// channel reference is blank.
    pub fn create_giveaway<R: Rng + ?Sized>(
        &mut self,
        new: NewGiveaway,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Giveaway, LedgerError> {
        let giveaway = Giveaway {
            id: GiveawayId::generate(rng),
            title: required("title", &new.title)?,
            host_name: required("hostName", &new.host_name)?,
            channel_url: required("channelUrl", &new.channel_url)?,
            end_date: new.end_date,
            created_at: now,
            creator_id: CreatorId::generate(rng),
            participants: Vec::new(),
            winner: None,
            is_active: true,
        };
        self.giveaways.push(giveaway.clone());
        Ok(giveaway)
    }

    /// Appends a participant joining from `address`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidRequest`] if the name is blank.
    /// - [`LedgerError::GiveawayNotFound`] / [`LedgerError::GiveawayInactive`]
    ///   if the giveaway is missing or ended.
    /// - [`LedgerError::DuplicateJoin`] if `address` already joined it.
    pub fn join<R: Rng + ?Sized>(
        &mut self,
        giveaway_id: GiveawayId,
        new: NewParticipant,
        address: NetworkAddress,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Participant, LedgerError> {
        let name = required("name", &new.name)?;
        let giveaway = self.active_giveaway_mut(giveaway_id)?;
        if giveaway.participant_by_address(&address).is_some() {
            return Err(LedgerError::DuplicateJoin);
        }

        let avatar = match new.avatar.as_deref().map(str::trim) {
            Some(avatar) if !avatar.is_empty() => avatar.to_string(),
            _ => fallback_avatar(rng),
        };
        let participant = Participant {
            id: ParticipantId::generate(rng),
            name,
            avatar,
            joined_at: now,
            address,
            referrals: 0,
        };
        giveaway.participants.push(participant.clone());
        Ok(participant)
    }

    /// Records a referral click from `clicker` and credits `referrer`.
    ///
    /// The referrer's count is incremented only when the reference names a
    /// current participant of the giveaway; otherwise the click is still
    /// recorded.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidRequest`] if the reference is blank.
    /// - [`LedgerError::GiveawayNotFound`] / [`LedgerError::GiveawayInactive`]
    ///   if the giveaway is missing or ended.
    /// - [`LedgerError::DuplicateReferral`] if `clicker` already clicked a
    ///   referral link for this giveaway.
    pub fn refer<R: Rng + ?Sized>(
        &mut self,
        giveaway_id: GiveawayId,
        referrer: ReferrerRef,
        clicker: NetworkAddress,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<ReferralClick, LedgerError> {
        if referrer.is_empty() {
            return Err(LedgerError::InvalidRequest("referrerId is required".to_string()));
        }
        self.active_giveaway_mut(giveaway_id)?;
        if self.has_referral_from(giveaway_id, &clicker) {
            return Err(LedgerError::DuplicateReferral);
        }

        let credited = referrer.participant_id();
        let click = ReferralClick {
            id: ReferralId::generate(rng),
            giveaway_id,
            referrer_id: referrer,
            clicker_address: clicker,
            timestamp: now,
            is_valid: true,
        };

        let giveaway = self.giveaway_mut(giveaway_id)?;
        if let Some(referrer) = credited.and_then(|id| giveaway.participant_mut(id)) {
            referrer.referrals = referrer.referrals.saturating_add(1);
        }
        self.referral_clicks.push(click.clone());
        Ok(click)
    }

    /// Returns `true` if `clicker` already has a click recorded for the
    /// giveaway.
    #[must_use]
    pub fn has_referral_from(&self, giveaway_id: GiveawayId, clicker: &NetworkAddress) -> bool {
        self.referral_clicks
            .iter()
            .any(|c| c.giveaway_id == giveaway_id && c.clicker_address == *clicker)
    }

    /// Ends the giveaway, drawing a winner uniformly from its participants.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::GiveawayNotFound`] / [`LedgerError::GiveawayInactive`]
    ///   if the giveaway is missing or already ended.
    /// - [`LedgerError::NoParticipants`] if nobody joined.
    pub fn end_giveaway<R: Rng + ?Sized>(
        &mut self,
        giveaway_id: GiveawayId,
        rng: &mut R,
    ) -> Result<Participant, LedgerError> {
        let giveaway = self.active_giveaway_mut(giveaway_id)?;
        let winner = giveaway
            .participants
            .choose(rng)
            .cloned()
            .ok_or(LedgerError::NoParticipants(giveaway_id))?;
        giveaway.winner = Some(winner.clone());
        giveaway.is_active = false;
        Ok(winner)
    }

    /// Removes the giveaway and every referral click that targets it.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::GiveawayNotFound`] if the giveaway does not exist.
    /// - [`LedgerError::CreatorMismatch`] if `creator_id` is not the one
    ///   issued at creation.
    pub fn delete_giveaway(
        &mut self,
        giveaway_id: GiveawayId,
        creator_id: CreatorId,
    ) -> Result<DeletedGiveaway, LedgerError> {
        let index = self
            .giveaways
            .iter()
            .position(|g| g.id == giveaway_id)
            .ok_or(LedgerError::GiveawayNotFound(giveaway_id))?;
        if self.giveaways.get(index).map(|g| g.creator_id) != Some(creator_id) {
            return Err(LedgerError::CreatorMismatch(giveaway_id));
        }

        let giveaway = self.giveaways.remove(index);
        let before = self.referral_clicks.len();
        self.referral_clicks.retain(|c| c.giveaway_id != giveaway_id);
        Ok(DeletedGiveaway {
            giveaway,
            removed_clicks: before - self.referral_clicks.len(),
        })
    }

    /// Top participants by referral count, ties in join order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::GiveawayNotFound`] if the giveaway does not
    /// exist.
    pub fn leaderboard(&self, giveaway_id: GiveawayId) -> Result<Vec<Participant>, LedgerError> {
        let mut ranked = self.giveaway(giveaway_id)?.participants.clone();
        // `sort_by` is stable, so equal counts keep join order.
        ranked.sort_by(|a, b| b.referrals.cmp(&a.referrals));
        ranked.truncate(LEADERBOARD_SIZE);
        Ok(ranked)
    }

    /// Records that `address` acknowledged the external channel.
    ///
    /// Returns `true` if the address was not recorded before.
    pub fn mark_channel_joined(&mut self, address: NetworkAddress) -> bool {
        self.channel_joins.insert(address)
    }

    /// Returns `true` if `address` acknowledged the external channel.
    #[must_use]
    pub fn has_joined_channel(&self, address: &NetworkAddress) -> bool {
        self.channel_joins.contains(address)
    }
}

/// Trims `value`, rejecting it when blank.
fn required(field: &str, value: &str) -> Result<String, LedgerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidRequest(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
