//! Game state that survives power cycles.

use crate::config::{
    BET_MAX, BET_MIN, DEFAULT_BET, DEFAULT_CREDITS, DEFAULT_HIGH_SCORE, DEFAULT_JACKPOT_COUNT,
    DEFAULT_TOTAL_SPIN,
};
use crate::error::{Error, Field};
use crate::game::SpinOutcome;

/// The five persisted integers.
///
/// Only the state machine mutates this, and only the persistence gateway
/// in [`crate::storage`] moves it to and from durable storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedState {
    pub jackpot_count: i32,
    pub total_spin: i32,
    /// Unbounded below: a spin is never refused for lack of credits.
    pub credits: i32,
    /// Always within `BET_MIN..=BET_MAX`.
    pub bet: i32,
    pub high_score: i32,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            jackpot_count: DEFAULT_JACKPOT_COUNT,
            total_spin: DEFAULT_TOTAL_SPIN,
            credits: DEFAULT_CREDITS,
            bet: DEFAULT_BET,
            high_score: DEFAULT_HIGH_SCORE,
        }
    }
}

impl PersistedState {
    /// Check every field for plausibility.
    ///
    /// Erased flash reads back as all-ones (`-1` per field), so negative
    /// values are rejected along with an out-of-range bet.
    pub fn validate(&self) -> Result<(), Error> {
        let checks = [
            (self.jackpot_count >= 0, Field::JackpotCount),
            (self.total_spin >= 0, Field::TotalSpin),
            (self.credits >= 0, Field::Credits),
            ((BET_MIN..=BET_MAX).contains(&self.bet), Field::Bet),
            (self.high_score >= 0, Field::HighScore),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, field)) => Err(Error::CorruptState(*field)),
            None => Ok(()),
        }
    }

    /// Take the stake for one spin, before the outcome is known.
    pub fn debit_bet(&mut self) {
        self.credits = self.credits.saturating_sub(self.bet);
    }

    /// Apply a spin outcome after [`debit_bet`](Self::debit_bet).
    ///
    /// A jackpot refunds the stake on top of `credits_delta`, so the round
    /// nets `credits_delta` against the pre-debit balance.
    pub fn settle(&mut self, outcome: &SpinOutcome) {
        if outcome.jackpot {
            self.jackpot_count = self.jackpot_count.saturating_add(1);
            self.credits = self
                .credits
                .saturating_add(self.bet)
                .saturating_add(outcome.credits_delta);
        }
        self.total_spin = self.total_spin.saturating_add(1);
        if self.credits > self.high_score {
            self.high_score = self.credits;
        }
    }

    /// Set the bet, clamped to the allowed range.
    pub fn set_bet(&mut self, bet: i32) {
        self.bet = bet.clamp(BET_MIN, BET_MAX);
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
