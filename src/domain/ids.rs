//! Type-safe identifiers for ledger records.
//!
//! Every identifier is a newtype around [`uuid::Uuid`] so that a giveaway id
//! can never be passed where a participant id is expected. Fresh values are
//! drawn from the caller's random number generator, which keeps identifier
//! generation deterministic under a seeded RNG.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! ledger_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Draws a new random (version 4) identifier from `rng`.
            pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
                Self(uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid())
            }

            /// Wraps an existing [`uuid::Uuid`].
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner [`uuid::Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

ledger_id!(
    /// Unique identifier of a giveaway. Used in every URL path.
    GiveawayId
);

ledger_id!(
    /// Unique identifier of a participant, embedded in referral links.
    ParticipantId
);

ledger_id!(
    /// Unique identifier of a recorded referral click.
    ReferralId
);

ledger_id!(
    /// Per-giveaway delete secret.
    ///
    /// Returned once, in the create response, and required together with the
    /// operator credential to delete the giveaway.
    CreatorId
);
