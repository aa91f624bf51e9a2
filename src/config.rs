//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, display geometry, game rules and storage
//! placement live here so they can be tuned in one place.

// Display

/// Character columns per display row.
pub const LCD_COLS: usize = 16;

/// Number of display rows.
pub const LCD_ROWS: u8 = 2;

// Timing

/// UI poll period (ms). Input is sampled and scroll timers are checked
/// once per tick.
pub const TICK_MS: u64 = 50;

/// Scroll step of the idle status line (ms per character).
pub const IDLE_SCROLL_MS: u64 = 800;

/// Scroll step of menu rows (ms per character).
pub const MENU_SCROLL_MS: u64 = 400;

/// Number of random frames shown before the committed spin outcome.
pub const SPIN_FRAMES: u8 = 10;

/// Delay between two spin animation frames (ms).
pub const SPIN_FRAME_MS: u64 = 100;

/// How long the spin result stays on screen (ms).
pub const RESULT_HOLD_MS: u64 = 2000;

/// How long short messages ("No Action", "Canceled", ...) stay on screen (ms).
pub const MESSAGE_HOLD_MS: u64 = 1000;

/// How long informational screens (high score, stats) stay on screen (ms).
pub const INFO_HOLD_MS: u64 = 2000;

// Game rules

/// Smallest allowed bet.
pub const BET_MIN: i32 = 1;

/// Largest allowed bet.
pub const BET_MAX: i32 = 5;

/// Jackpot prize as a multiple of the bet.
pub const JACKPOT_MULTIPLIER: i32 = 5;

/// Inclusive range of a single reel symbol.
pub const REEL_MIN: u8 = 1;
pub const REEL_MAX: u8 = 7;

// Defaults written on first boot and after a reset

pub const DEFAULT_JACKPOT_COUNT: i32 = 0;
pub const DEFAULT_TOTAL_SPIN: i32 = 0;
pub const DEFAULT_CREDITS: i32 = 1000;
pub const DEFAULT_BET: i32 = 1;
pub const DEFAULT_HIGH_SCORE: i32 = 1000;

// GPIO / analog assignments (nRF52840-DK defaults)
//
// These are logical names; the actual `embassy_nrf::peripherals::*`
// are picked in `board.rs`.  Adjust for your custom PCB.
//
//   Keypad ladder  → P0.03 (AIN1)
//   Entropy (open) → P0.04 (AIN2), leave unconnected
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   Light LED      → P0.13

/// Number of samples taken from the floating analog line to seed the RNG.
pub const SEED_SAMPLES: usize = 16;

// Persisted state storage

/// Flash page index where game-state storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 252;

/// Number of flash pages reserved for game-state storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
