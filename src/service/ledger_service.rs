//! Ledger service: serializes ledger operations over an injected store.

use chrono::Utc;
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use super::OperatorToken;
use crate::domain::{
    CreatorId, Giveaway, GiveawayId, Ledger, NetworkAddress, NewGiveaway, NewParticipant,
    Participant, ReferralClick, ReferrerRef,
};
use crate::error::LedgerError;
use crate::persistence::LedgerStore;

/// Store and RNG, owned together behind the service mutex.
#[derive(Debug)]
struct Guarded<S> {
    store: S,
    rng: StdRng,
}

/// Orchestration layer for all ledger operations.
///
/// Every call follows the pattern: acquire the mutex → load the full ledger
/// → apply the operation → save the full ledger → release. A failed
/// operation returns before the save, so the store keeps its last successful
/// state. Holding one mutex across load and save makes the per-address
/// uniqueness checks read-then-write consistent under concurrent requests.
#[derive(Debug)]
pub struct LedgerService<S> {
    guarded: Mutex<Guarded<S>>,
    operator_token: OperatorToken,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a new `LedgerService`.
    #[must_use]
    pub fn new(store: S, rng: StdRng, operator_token: OperatorToken) -> Self {
        Self {
            guarded: Mutex::new(Guarded { store, rng }),
            operator_token,
        }
    }

    async fn read<T>(
        &self,
        op: impl FnOnce(&Ledger) -> Result<T, LedgerError> + Send,
    ) -> Result<T, LedgerError> {
        let guarded = self.guarded.lock().await;
        let ledger = guarded.store.load().await?;
        op(&ledger)
    }

    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Ledger, &mut StdRng) -> Result<T, LedgerError> + Send,
    ) -> Result<T, LedgerError> {
        let mut guarded = self.guarded.lock().await;
        let Guarded { store, rng } = &mut *guarded;
        let mut ledger = store.load().await?;
        let value = op(&mut ledger, rng)?;
        store.save(&ledger).await?;
        Ok(value)
    }

    fn authorize(&self, token: &str) -> Result<(), LedgerError> {
        if self.operator_token.verify(token) {
            Ok(())
        } else {
            tracing::warn!("rejected operator token");
            Err(LedgerError::InvalidCredential)
        }
    }

    /// Returns all giveaways in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the store cannot be read.
    pub async fn list_giveaways(&self) -> Result<Vec<Giveaway>, LedgerError> {
        self.read(|ledger| Ok(ledger.giveaways().to_vec())).await
    }

    /// Returns one giveaway.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::GiveawayNotFound`] for an unknown id.
    pub async fn get_giveaway(&self, id: GiveawayId) -> Result<Giveaway, LedgerError> {
        self.read(|ledger| ledger.giveaway(id).cloned()).await
    }

    /// Creates a giveaway and returns it, creator id included.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidRequest`] on blank fields.
    pub async fn create_giveaway(&self, new: NewGiveaway) -> Result<Giveaway, LedgerError> {
        let giveaway = self
            .mutate(|ledger, rng| ledger.create_giveaway(new, Utc::now(), rng))
            .await?;
        tracing::info!(
            giveaway_id = %giveaway.id,
            title = %giveaway.title,
            end_date = %giveaway.end_date,
            "giveaway created"
        );
        Ok(giveaway)
    }

    /// Adds a participant joining from `address`.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the name is blank, the giveaway is
    /// missing or ended, or `address` already joined.
    pub async fn join(
        &self,
        giveaway_id: GiveawayId,
        new: NewParticipant,
        address: NetworkAddress,
    ) -> Result<Participant, LedgerError> {
        let participant = self
            .mutate(|ledger, rng| ledger.join(giveaway_id, new, address, Utc::now(), rng))
            .await
            .inspect_err(|e| tracing::debug!(%giveaway_id, error = %e, "join rejected"))?;
        tracing::info!(%giveaway_id, participant_id = %participant.id, "participant joined");
        Ok(participant)
    }

    /// Records a referral click from `clicker` credited to `referrer`.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] if the reference is blank, the giveaway is
    /// missing or ended, or `clicker` already has a click recorded for it.
    pub async fn refer(
        &self,
        giveaway_id: GiveawayId,
        referrer: ReferrerRef,
        clicker: NetworkAddress,
    ) -> Result<ReferralClick, LedgerError> {
        let click = self
            .mutate(|ledger, rng| ledger.refer(giveaway_id, referrer, clicker, Utc::now(), rng))
            .await
            .inspect_err(|e| tracing::debug!(%giveaway_id, error = %e, "referral rejected"))?;
        tracing::info!(
            %giveaway_id,
            referral_id = %click.id,
            referrer_id = %click.referrer_id,
            "referral tracked"
        );
        Ok(click)
    }

    /// Ends the giveaway and returns the drawn winner.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidCredential`] for a wrong token, and a
    /// not-found or state error if the giveaway is missing, already ended or
    /// has no participants.
    pub async fn end_giveaway(
        &self,
        giveaway_id: GiveawayId,
        token: &str,
    ) -> Result<Participant, LedgerError> {
        self.authorize(token)?;
        let winner = self
            .mutate(|ledger, rng| ledger.end_giveaway(giveaway_id, rng))
            .await?;
        tracing::info!(%giveaway_id, winner_id = %winner.id, "giveaway ended");
        Ok(winner)
    }

    /// Deletes the giveaway and its referral clicks.
    ///
    /// Both the operator token and the giveaway's creator id must match.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidCredential`],
    /// [`LedgerError::GiveawayNotFound`] or [`LedgerError::CreatorMismatch`].
    pub async fn delete_giveaway(
        &self,
        giveaway_id: GiveawayId,
        creator_id: CreatorId,
        token: &str,
    ) -> Result<(), LedgerError> {
        self.authorize(token)?;
        let deleted = self
            .mutate(|ledger, _| ledger.delete_giveaway(giveaway_id, creator_id))
            .await?;
        tracing::info!(
            %giveaway_id,
            title = %deleted.giveaway.title,
            removed_clicks = deleted.removed_clicks,
            "giveaway deleted"
        );
        Ok(())
    }

    /// Returns the top participants of the giveaway by referral count.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::GiveawayNotFound`] for an unknown id.
    pub async fn leaderboard(
        &self,
        giveaway_id: GiveawayId,
    ) -> Result<Vec<Participant>, LedgerError> {
        self.read(|ledger| ledger.leaderboard(giveaway_id)).await
    }

    /// Records that `address` acknowledged the external channel. Saves only
    /// when the address is new.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] on store failure.
    pub async fn mark_channel_joined(&self, address: NetworkAddress) -> Result<(), LedgerError> {
        let guarded = self.guarded.lock().await;
        let mut ledger = guarded.store.load().await?;
        if ledger.mark_channel_joined(address) {
            guarded.store.save(&ledger).await?;
            tracing::debug!("channel acknowledgement recorded");
        }
        Ok(())
    }

    /// Returns `true` if `address` acknowledged the external channel.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] on store failure.
    pub async fn has_joined_channel(&self, address: &NetworkAddress) -> Result<bool, LedgerError> {
        self.read(|ledger| Ok(ledger.has_joined_channel(address))).await
    }
}
