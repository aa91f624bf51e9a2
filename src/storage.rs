//! Persistence gateway for the game state.
//!
//! The core sees durable storage as a small byte store addressed by
//! offset.  The five persisted integers occupy fixed 4-byte slots:
//!
//! ```text
//! Offset  0: jackpot_count  (i32, little-endian)
//! Offset  4: total_spin
//! Offset  8: credits
//! Offset 12: bet
//! Offset 16: high_score
//! ```
//!
//! A save encodes the whole image first and hands it to the store in a
//! single `put`; a load reads the whole image with a single `get`.  The
//! core never observes a half-written state.

use crate::error::Error;
use crate::state::PersistedState;

/// Size of one persisted field.
const FIELD_SIZE: usize = core::mem::size_of::<i32>();

/// Size of the full state image (5 fields).
pub const IMAGE_LEN: usize = 5 * FIELD_SIZE;

pub const OFFSET_JACKPOT_COUNT: usize = 0;
pub const OFFSET_TOTAL_SPIN: usize = FIELD_SIZE;
pub const OFFSET_CREDITS: usize = 2 * FIELD_SIZE;
pub const OFFSET_BET: usize = 3 * FIELD_SIZE;
pub const OFFSET_HIGH_SCORE: usize = 4 * FIELD_SIZE;

/// Key-offset byte store.
pub trait ByteStore {
    /// Fill `buf` with the bytes starting at `offset`.
    fn get(&self, offset: usize, buf: &mut [u8]) -> Result<(), Error>;
    /// Write `data` starting at `offset`.
    fn put(&mut self, offset: usize, data: &[u8]) -> Result<(), Error>;
}

/// RAM mirror of the state image.
///
/// The firmware loads it from flash at boot and writes it back whenever
/// [`take_dirty`](Self::take_dirty) hands out a changed image.
#[derive(Clone, Debug)]
pub struct RamStore {
    image: [u8; IMAGE_LEN],
    /// True if the image differs from what flash holds.
    dirty: bool,
}

impl RamStore {
    /// Store filled with the erased-flash pattern.
    pub const fn erased() -> Self {
        Self {
            image: [0xFF; IMAGE_LEN],
            dirty: false,
        }
    }

    /// Store seeded with an image read back from flash.
    pub const fn from_image(image: [u8; IMAGE_LEN]) -> Self {
        Self {
            image,
            dirty: false,
        }
    }

    pub fn image(&self) -> &[u8; IMAGE_LEN] {
        &self.image
    }

    /// Return the image if it changed since the last call.
    pub fn take_dirty(&mut self) -> Option<[u8; IMAGE_LEN]> {
        if self.dirty {
            self.dirty = false;
            Some(self.image)
        } else {
            None
        }
    }
}

impl ByteStore for RamStore {
    fn get(&self, offset: usize, buf: &mut [u8]) -> Result<(), Error> {
        let end = offset.checked_add(buf.len()).ok_or(Error::OutOfRange)?;
        let src = self.image.get(offset..end).ok_or(Error::OutOfRange)?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn put(&mut self, offset: usize, data: &[u8]) -> Result<(), Error> {
        let end = offset.checked_add(data.len()).ok_or(Error::OutOfRange)?;
        let dst = self.image.get_mut(offset..end).ok_or(Error::OutOfRange)?;
        if dst != data {
            dst.copy_from_slice(data);
            self.dirty = true;
        }
        Ok(())
    }
}

/// Serialize the state into its storage layout.
pub fn encode(state: &PersistedState) -> [u8; IMAGE_LEN] {
    let mut image = [0u8; IMAGE_LEN];
    for (offset, value) in [
        (OFFSET_JACKPOT_COUNT, state.jackpot_count),
        (OFFSET_TOTAL_SPIN, state.total_spin),
        (OFFSET_CREDITS, state.credits),
        (OFFSET_BET, state.bet),
        (OFFSET_HIGH_SCORE, state.high_score),
    ] {
        image[offset..offset + FIELD_SIZE].copy_from_slice(&value.to_le_bytes());
    }
    image
}

/// Deserialize a storage image. No validation.
pub fn decode(image: &[u8; IMAGE_LEN]) -> PersistedState {
    let field = |offset: usize| {
        let mut bytes = [0u8; FIELD_SIZE];
        bytes.copy_from_slice(&image[offset..offset + FIELD_SIZE]);
        i32::from_le_bytes(bytes)
    };
    PersistedState {
        jackpot_count: field(OFFSET_JACKPOT_COUNT),
        total_spin: field(OFFSET_TOTAL_SPIN),
        credits: field(OFFSET_CREDITS),
        bet: field(OFFSET_BET),
        high_score: field(OFFSET_HIGH_SCORE),
    }
}

/// Read and validate the persisted state.
pub fn load_all(store: &impl ByteStore) -> Result<PersistedState, Error> {
    let mut image = [0u8; IMAGE_LEN];
    store.get(0, &mut image)?;
    let state = decode(&image);
    state.validate()?;
    Ok(state)
}

/// Like [`load_all`], but an unreadable or implausible image yields the
/// defaults (first boot, erased flash).
pub fn load_or_default(store: &impl ByteStore) -> PersistedState {
    load_all(store).unwrap_or_default()
}

/// Write the complete state in one store operation.
pub fn save_all(store: &mut impl ByteStore, state: &PersistedState) -> Result<(), Error> {
    store.put(0, &encode(state))
}
