//! User interface subsystem - 16x2 character display + analog keypad.
//!
//! The UI task feeds the [`machine::Machine`] one keypad sample per tick;
//! the machine decides which screen owns the display and renders it.
//!
//! ## Components
//!
//! - **Keypad**: 5 buttons on one analog line (resistor ladder)
//! - **Rows**: fixed-width and scrolling text for each display row
//! - **Machine**: screen state machine (idle, spin, menu, sub-screens)

pub mod input_logic;
pub mod keypad;
pub mod machine;
pub mod row;
pub mod screens;


/// Logical button decoded from one keypad sample.
///
/// Carries no state between polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonSymbol {
    Right,
    Up,
    Down,
    Left,
    Select,
    None,
}

/// A 2-row character display.
///
/// Implementations own the cursor; `write_cells` writes exactly
/// `cells.len()` characters starting at (`col`, `row`).
pub trait CharDisplay {
    fn clear(&mut self);
    fn write_cells(&mut self, col: u8, row: u8, cells: &[u8]);
}

/// The single binary output toggled from the Light menu entry.
pub trait Indicator {
    fn set(&mut self, on: bool);
}

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenKind {
    /// Status line + instructions, waiting for input.
    Idle,
    /// Reel animation and result hold.
    Spin,
    /// Settings/actions list.
    Menu,
    /// Bet adjustment.
    SetBet,
    /// "Reset all data?" prompt.
    ConfirmReset,
    /// Timed message or informational screen.
    Notice,
}
