//! Analog keypad decoding and debounce-on-release.
//!
//! Five buttons share one ADC input through a resistor ladder, so each
//! button pulls the line to a distinct voltage:
//!
//! ```text
//! Right  <  50
//! Up     < 200
//! Down   < 400
//! Left   < 600
//! Select < 800
//! (none) otherwise, and anything above 1000
//! ```
//!
//! Values are 10-bit samples (0..=1023).

use super::ButtonSymbol;

/// Samples above this are an open line (no button).
const IDLE_LEVEL: u16 = 1000;

/// Upper band edges, ascending. Order matters.
const BANDS: [(u16, ButtonSymbol); 5] = [
    (50, ButtonSymbol::Right),
    (200, ButtonSymbol::Up),
    (400, ButtonSymbol::Down),
    (600, ButtonSymbol::Left),
    (800, ButtonSymbol::Select),
];

/// Largest value a 10-bit sample can take.
const SAMPLE_MAX: u16 = 1023;

/// Map one analog sample to a button.
pub fn read_button(sample: u16) -> ButtonSymbol {
    if sample > IDLE_LEVEL {
        return ButtonSymbol::None;
    }
    BANDS
        .iter()
        .find(|(edge, _)| sample < *edge)
        .map_or(ButtonSymbol::None, |&(_, symbol)| symbol)
}

/// Fold a raw SAADC reading into the 10-bit keypad range.
///
/// Single-ended SAADC conversions can come out slightly negative because
/// of offset error near ground.
pub fn normalize_sample(raw: i16) -> u16 {
    (raw.max(0) as u16).min(SAMPLE_MAX)
}

/// Edge-triggered press detection.
///
/// A press is reported once; the gate then stays armed until the line
/// stops reporting that button. Polling keeps going while armed, so the
/// caller's loop is never blocked by a held button.
#[derive(Clone, Copy, Debug, Default)]
pub struct Debouncer {
    held: Option<ButtonSymbol>,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self { held: None }
    }

    /// Swallow `symbol` until it is released.
    pub fn wait_for_release(&mut self, symbol: ButtonSymbol) {
        if symbol != ButtonSymbol::None {
            self.held = Some(symbol);
        }
    }

    /// Returns `true` while a press is still being held.
    pub fn is_waiting(&self) -> bool {
        self.held.is_some()
    }

    /// Track the line without reporting presses.
    ///
    /// Screens that ignore input call this every tick so a release seen
    /// while they are up still disarms the gate.
    pub fn observe(&mut self, sample: u16) {
        if self.held.is_some_and(|held| read_button(sample) != held) {
            self.held = None;
        }
    }

    /// Sample the keypad. Yields each physical press exactly once.
    pub fn poll(&mut self, sample: u16) -> Option<ButtonSymbol> {
        let symbol = read_button(sample);
        if let Some(held) = self.held {
            if symbol == held {
                return None;
            }
            self.held = None;
        }
        if symbol == ButtonSymbol::None {
            return None;
        }
        self.wait_for_release(symbol);
        Some(symbol)
    }
}
