//! Host-testable core of the slotbox firmware.
//!
//! Everything that does not touch hardware lives here: keypad decoding,
//! row rendering, the screen state machine, the persisted-state layout
//! and the game rules.  The embedded binary (`main.rs`, `#![no_std]`,
//! `#![no_main]`) wires these to the SAADC, the OLED, the LED and the
//! internal flash.
//!
//! Usage: `cargo test --lib`
//!
//! The library never logs; [`ui::machine::Machine::tick`] returns
//! [`ui::machine::Event`]s and the firmware logs them with `defmt`.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod game;
pub mod state;
pub mod storage;
pub mod ui;

pub use error::Error;
pub use state::PersistedState;
pub use ui::machine::{Event, Events, Machine};
pub use ui::{ButtonSymbol, CharDisplay, Indicator, ScreenKind};

// ═══════════════════════════════════════════════════════════════════════════
// Cross-module Tests
// ═══════════════════════════════════════════════════════════════════════════
