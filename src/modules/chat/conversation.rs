//! Two-party conversation semantics shared by every store implementation.
//!
//! A conversation is addressed by an unordered pair of identities. The pair is
//! normalised to `(low, high)` when built, so `(a, b)` and `(b, a)` select the
//! same rows. Stores return a conversation ordered by `sent_at`, then by
//! insertion sequence.

use serde::Serialize;

use crate::{api::error::ValidationError, modules::chat::model::require_positive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "[i32; 2]")]
pub struct ParticipantPair {
    low: i32,
    high: i32,
}

impl ParticipantPair {
    pub fn new(user_a: i32, user_b: i32) -> Result<Self, ValidationError> {
        let user_a = require_positive("user_a", user_a)?;
        let user_b = require_positive("user_b", user_b)?;

        if user_a == user_b {
            return Err(ValidationError::SameParticipants { user_id: user_a });
        }

        let (low, high) = if user_a < user_b { (user_a, user_b) } else { (user_b, user_a) };
        Ok(Self { low, high })
    }

    pub fn low(&self) -> i32 {
        self.low
    }

    pub fn high(&self) -> i32 {
        self.high
    }
}

impl From<ParticipantPair> for [i32; 2] {
    fn from(pair: ParticipantPair) -> Self {
        [pair.low, pair.high]
    }
}
