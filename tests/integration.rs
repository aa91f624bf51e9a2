//! Integration tests for slotbox host-testable logic.

use slotbox::config::{LCD_COLS, TICK_MS};
use slotbox::game::ReelSource;
use slotbox::storage::{self, RamStore};
use slotbox::{CharDisplay, Event, Indicator, Machine, PersistedState, ScreenKind};

struct Lcd([[u8; LCD_COLS]; 2]);

impl CharDisplay for Lcd {
    fn clear(&mut self) {
        self.0 = [[b' '; LCD_COLS]; 2];
    }

    fn write_cells(&mut self, col: u8, row: u8, cells: &[u8]) {
        let col = col as usize;
        self.0[row as usize][col..col + cells.len()].copy_from_slice(cells);
    }
}

struct NoLed;

impl Indicator for NoLed {
    fn set(&mut self, _on: bool) {}
}

struct Fours;

impl ReelSource for Fours {
    fn draw(&mut self) -> u8 {
        4
    }
}

const SELECT: u16 = 700;
const RIGHT: u16 = 10;
const NONE: u16 = 1023;

fn run(
    m: &mut Machine<Lcd, RamStore, NoLed, Fours>,
    now: &mut u64,
    sample: u16,
    ticks: usize,
) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        *now += TICK_MS;
        events.extend(m.tick(*now, sample));
    }
    events
}

#[test]
fn boot_spin_save_reboot() {
    // First boot: erased flash falls back to defaults.
    let store = RamStore::erased();
    let mut state = storage::load_or_default(&store);
    state.set_bet(3);

    let mut now = 0;
    let mut m = Machine::new(Lcd([[0; LCD_COLS]; 2]), store, NoLed, Fours, state, now);

    run(&mut m, &mut now, SELECT, 1);
    let events = run(&mut m, &mut now, NONE, 80);
    assert!(events.iter().any(|e| matches!(e, Event::Spun(o) if o.jackpot)));
    assert_eq!(m.screen(), ScreenKind::Idle);

    let after = *m.state();
    assert_eq!(after.credits, 1015);
    assert_eq!(after.total_spin, 1);
    assert_eq!(after.jackpot_count, 1);
    assert_eq!(after.high_score, 1015);

    // Nothing reaches storage until the player saves.
    assert!(m.store_mut().take_dirty().is_none());
    let events = run(&mut m, &mut now, RIGHT, 1);
    assert!(events.contains(&Event::Saved));
    let image = m.store_mut().take_dirty().expect("save must dirty the image");

    // Second boot from the flushed image.
    let reloaded = storage::load_or_default(&RamStore::from_image(image));
    assert_eq!(reloaded, after);
}

#[test]
fn corrupt_image_boots_with_defaults() {
    let mut image = storage::encode(&PersistedState::default());
    image[storage::OFFSET_BET..storage::OFFSET_BET + 4].copy_from_slice(&9i32.to_le_bytes());
    let state = storage::load_or_default(&RamStore::from_image(image));
    assert_eq!(state, PersistedState::default());
}
