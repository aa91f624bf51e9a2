//! Row renderer - fixed-width and scrolling text on one display row.
//!
//! Every write covers the full remaining row width so a shorter label
//! never leaves stale characters from a longer one behind.

use super::CharDisplay;
use crate::config::LCD_COLS;

/// Scroll cursor and timer of one marquee row.
///
/// Owned by the screen showing the row; reset whenever the text changes
/// identity or the screen is entered again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    /// Offset into the text of the first visible character.
    pub index: usize,
    /// Time of the last advance; `None` until the first window is drawn.
    pub last_advance_ms: Option<u64>,
}

impl ScrollState {
    /// Fresh cursor: the next render draws the first window immediately.
    pub const fn new() -> Self {
        Self {
            index: 0,
            last_advance_ms: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Write `text` at (`col`, `row`), padded with spaces or truncated to
/// exactly `LCD_COLS - col` cells.
pub fn render_static(display: &mut impl CharDisplay, text: &str, row: u8, col: u8) {
    let col = usize::from(col);
    if col >= LCD_COLS {
        return;
    }
    let width = LCD_COLS - col;
    let mut cells = [b' '; LCD_COLS];
    let bytes = text.as_bytes();
    let n = bytes.len().min(width);
    cells[..n].copy_from_slice(&bytes[..n]);
    display.write_cells(col as u8, row, &cells[..width]);
}

/// The 16-cell circular window of `text` starting at `index`.
///
/// `text` must not be empty.
pub fn window(text: &[u8], index: usize) -> [u8; LCD_COLS] {
    let mut cells = [b' '; LCD_COLS];
    for (i, cell) in cells.iter_mut().enumerate() {
        *cell = text[(index + i) % text.len()];
    }
    cells
}

/// Render `text` on `row`, scrolling it one step per `interval_ms` if it
/// is wider than the display.
///
/// Cheap to call every tick: before the interval has elapsed neither the
/// display nor `scroll` is touched. Returns `true` if anything was written.
pub fn render_scrolling(
    display: &mut impl CharDisplay,
    text: &str,
    row: u8,
    scroll: &mut ScrollState,
    interval_ms: u64,
    now_ms: u64,
) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() <= LCD_COLS {
        render_static(display, text, row, 0);
        return true;
    }

    if let Some(last) = scroll.last_advance_ms {
        if now_ms.saturating_sub(last) < interval_ms {
            return false;
        }
    }

    display.write_cells(0, row, &window(bytes, scroll.index));
    scroll.last_advance_ms = Some(now_ms);
    scroll.index = (scroll.index + 1) % bytes.len();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "Cr:1000 Spn:0 Win:0 Bet:1";

    /// Records the last write per row.
    #[derive(Default)]
    struct Rows {
        rows: [[u8; LCD_COLS]; 2],
        writes: usize,
        last_len: usize,
    }

    impl CharDisplay for Rows {
        fn clear(&mut self) {
            self.rows = [[b' '; LCD_COLS]; 2];
        }

        fn write_cells(&mut self, col: u8, row: u8, cells: &[u8]) {
            let col = col as usize;
            self.rows[row as usize][col..col + cells.len()].copy_from_slice(cells);
            self.writes += 1;
            self.last_len = cells.len();
        }
    }

    #[test]
    fn static_pads_to_full_width() {
        let mut d = Rows::default();
        render_static(&mut d, "Hi", 0, 0);
        assert_eq!(d.last_len, 16);
        assert_eq!(&d.rows[0], b"Hi              ");
    }

    #[test]
    fn static_from_column_writes_remaining_width() {
        let mut d = Rows::default();
        d.clear();
        render_static(&mut d, "Bet", 1, 10);
        assert_eq!(d.last_len, 6);
        assert_eq!(&d.rows[1], b"          Bet   ");
    }

    #[test]
    fn static_truncates() {
        let mut d = Rows::default();
        render_static(&mut d, "ABCDEFGHIJKLMNOPQRS", 0, 12);
        assert_eq!(d.last_len, 4);
        assert_eq!(&d.rows[0][12..], b"ABCD");
    }

    #[test]
    fn static_past_the_edge_writes_nothing() {
        let mut d = Rows::default();
        render_static(&mut d, "x", 0, 16);
        assert_eq!(d.writes, 0);
    }

    #[test]
    fn short_text_renders_every_call_without_touching_scroll() {
        let mut d = Rows::default();
        let mut s = ScrollState::new();
        for t in 0..5 {
            assert!(render_scrolling(&mut d, "Set Bet", 0, &mut s, 800, t));
        }
        assert_eq!(d.writes, 5);
        assert_eq!(&d.rows[0], b"Set Bet         ");
        assert_eq!(s, ScrollState::new());
    }

    #[test]
    fn exactly_sixteen_is_static() {
        let mut d = Rows::default();
        let mut s = ScrollState::new();
        render_scrolling(&mut d, "SEL:Yes Other:No", 1, &mut s, 800, 0);
        assert_eq!(&d.rows[1], b"SEL:Yes Other:No");
        assert_eq!(s.index, 0);
    }

    #[test]
    fn long_text_draws_first_window_immediately() {
        let mut d = Rows::default();
        let mut s = ScrollState::new();
        assert!(render_scrolling(&mut d, LONG, 0, &mut s, 800, 5000));
        assert_eq!(&d.rows[0], b"Cr:1000 Spn:0 Wi");
        assert_eq!(s.index, 1);
        assert_eq!(s.last_advance_ms, Some(5000));
    }

    #[test]
    fn early_calls_are_no_ops() {
        let mut d = Rows::default();
        let mut s = ScrollState::new();
        render_scrolling(&mut d, LONG, 0, &mut s, 800, 0);
        let before = (s, d.rows, d.writes);
        for t in [1, 50, 400, 799] {
            assert!(!render_scrolling(&mut d, LONG, 0, &mut s, 800, t));
        }
        assert_eq!((s, d.rows, d.writes), before);

        assert!(render_scrolling(&mut d, LONG, 0, &mut s, 800, 800));
        assert_eq!(&d.rows[0], b"r:1000 Spn:0 Win");
        assert_eq!(s.index, 2);
    }

    #[test]
    fn windows_are_circular_and_cycle_through_every_rotation() {
        let text = LONG.as_bytes();
        let mut d = Rows::default();
        let mut s = ScrollState::new();
        let mut seen = [false; 25];
        let mut now = 0;

        for _ in 0..text.len() {
            let index = s.index;
            assert!(render_scrolling(&mut d, LONG, 0, &mut s, 800, now));
            for i in 0..LCD_COLS {
                assert_eq!(d.rows[0][i], text[(index + i) % text.len()]);
            }
            seen[index] = true;
            now += 800;
        }

        assert!(seen.iter().all(|&v| v));
        assert_eq!(s.index, 0);
    }

    #[test]
    fn wrap_window_joins_end_to_start() {
        let w = window(b"ABCDEFGHIJKLMNOPQR", 16);
        assert_eq!(&w, b"QRABCDEFGHIJKLMN");
    }

    #[test]
    fn reset_restores_fresh_cursor() {
        let mut s = ScrollState {
            index: 7,
            last_advance_ms: Some(90),
        };
        s.reset();
        assert_eq!(s, ScrollState::new());
    }
}
