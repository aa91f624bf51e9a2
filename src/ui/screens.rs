//! Text shown by each screen.
//!
//! Everything here is pure formatting; the state machine decides when
//! and where it is drawn.

use core::fmt::Write;

use crate::config::{INFO_HOLD_MS, MESSAGE_HOLD_MS};
use crate::state::PersistedState;
use heapless::String;

/// Capacity of the idle status line (four `i32` plus labels).
pub const STATUS_CAP: usize = 64;

/// Capacity of a notice line. Longer text is cut at 16 cells anyway.
pub const LINE_CAP: usize = 24;

pub const IDLE_HINT: &str = "SEL:Spin L:Menu";
pub const SPIN_BANNER: &str = "Spinning...";
pub const JACKPOT_TEXT: &str = "JACKPOT!!!";
pub const LOSE_TEXT: &str = "No luck, retry";
pub const MENU_HINT: &str = "UP/DN:Browse SEL:Open L/R:Exit";
pub const SET_BET_HINT: &str = "UP/DN SEL:Save";
pub const RESET_PROMPT: &str = "Reset all data?";
pub const RESET_HINT: &str = "SEL:Yes Other:No";

pub const SAVED_TEXT: &str = "Game Saved";
pub const NO_ACTION_TEXT: &str = "No Action";
pub const RESET_DONE_TEXT: &str = "Data Reset";
pub const CANCELED_TEXT: &str = "Canceled";

/// Menu entries, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    SetBet,
    HighScore,
    Reset,
    Light,
    Stats,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::SetBet,
        MenuItem::HighScore,
        MenuItem::Reset,
        MenuItem::Light,
        MenuItem::Stats,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::SetBet => "Set Bet",
            MenuItem::HighScore => "High Score",
            MenuItem::Reset => "Reset",
            MenuItem::Light => "Light",
            MenuItem::Stats => "Stats",
        }
    }
}

/// Idle row 0: `Cr:<credits> Spn:<spins> Win:<jackpots> Bet:<bet>`.
pub fn status_line(state: &PersistedState) -> String<STATUS_CAP> {
    let mut s = String::new();
    let _ = write!(
        s,
        "Cr:{} Spn:{} Win:{} Bet:{}",
        state.credits, state.total_spin, state.jackpot_count, state.bet
    );
    s
}

/// One reel frame, always exactly 16 cells: `   [a] [b] [c]  `.
pub fn reel_frame(reels: [u8; 3]) -> String<16> {
    let mut s = String::new();
    let _ = write!(
        s,
        "   [{}] [{}] [{}]  ",
        reels[0] % 10,
        reels[1] % 10,
        reels[2] % 10
    );
    s
}

pub fn set_bet_line(bet: i32) -> String<LINE_CAP> {
    let mut s = String::new();
    let _ = write!(s, "Set Bet: {}", bet);
    s
}

/// Content of a timed, input-blind screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub top: String<LINE_CAP>,
    pub bottom: String<LINE_CAP>,
    pub hold_ms: u64,
}

impl Notice {
    fn new(top: &str, bottom: &str, hold_ms: u64) -> Self {
        let mut notice = Self {
            top: String::new(),
            bottom: String::new(),
            hold_ms,
        };
        let _ = notice.top.push_str(top);
        let _ = notice.bottom.push_str(bottom);
        notice
    }

    /// One-line transient message.
    pub fn message(text: &str) -> Self {
        Self::new(text, "", MESSAGE_HOLD_MS)
    }

    pub fn high_score(state: &PersistedState) -> Self {
        let mut notice = Self::new("High Score:", "", INFO_HOLD_MS);
        let _ = write!(notice.bottom, "{}", state.high_score);
        notice
    }

    pub fn stats(state: &PersistedState) -> Self {
        let mut notice = Self::new("", "", INFO_HOLD_MS);
        let _ = write!(notice.top, "Spins:{}", state.total_spin);
        let _ = write!(notice.bottom, "Wins:{}", state.jackpot_count);
        notice
    }

    pub fn light(on: bool) -> Self {
        Self::message(if on { "Light ON" } else { "Light OFF" })
    }
}
