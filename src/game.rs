//! Game outcome engine - reel draws, jackpot rule, RNG seeding.

use crate::config::{JACKPOT_MULTIPLIER, REEL_MAX, REEL_MIN};
use rand::{Rng, RngCore};

/// Anything that can draw one reel symbol in `REEL_MIN..=REEL_MAX`.
///
/// The firmware uses [`RandomReels`]; tests script the draws.
pub trait ReelSource {
    fn draw(&mut self) -> u8;
}

/// Uniform reel draws from any `rand` generator.
pub struct RandomReels<R> {
    rng: R,
}

impl<R: RngCore> RandomReels<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> ReelSource for RandomReels<R> {
    fn draw(&mut self) -> u8 {
        self.rng.gen_range(REEL_MIN..=REEL_MAX)
    }
}

/// Result of one committed spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinOutcome {
    pub reels: [u8; 3],
    pub jackpot: bool,
    /// Prize on top of the refunded stake; zero on a loss.
    pub credits_delta: i32,
}

/// Draw three independent reels.
pub fn draw_reels(source: &mut impl ReelSource) -> [u8; 3] {
    [source.draw(), source.draw(), source.draw()]
}

/// Apply the jackpot rule to a set of reels.
pub fn evaluate(reels: [u8; 3], bet: i32) -> SpinOutcome {
    let jackpot = reels[0] == reels[1] && reels[1] == reels[2];
    SpinOutcome {
        reels,
        jackpot,
        credits_delta: if jackpot {
            JACKPOT_MULTIPLIER.saturating_mul(bet)
        } else {
            0
        },
    }
}

/// Draw and evaluate one spin. The caller has already debited `bet`.
pub fn spin(bet: i32, source: &mut impl ReelSource) -> SpinOutcome {
    evaluate(draw_reels(source), bet)
}

/// Fold raw readings from a floating analog input into a 64-bit seed.
///
/// Only the low bits of each reading carry noise; the multiply/rotate
/// spreads them across the whole word.
pub fn seed_from_noise(samples: &[i16]) -> u64 {
    samples.iter().fold(0x853C_49E6_748F_EA9B, |acc, &s| {
        (acc ^ u64::from(s as u16))
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .rotate_left(29)
    })
}
