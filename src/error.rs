//! Unified error type for slotbox.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Storage
    /// Flash read/write/erase failed.
    Storage,

    /// A byte-store access fell outside the backing image.
    OutOfRange,

    /// The stored image decoded to an implausible value, which is what
    /// erased or never-written storage looks like.
    CorruptState(Field),

    // UI / Display
    /// I²C transaction to the display failed.
    Display,
}

/// Persisted field that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    JackpotCount,
    TotalSpin,
    Credits,
    Bet,
    HighScore,
}
