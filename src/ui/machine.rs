//! Screen state machine.
//!
//! One [`Machine::tick`] per UI poll period. Each screen owns its transient
//! render state (scroll cursors, deadlines) inside its [`Screen`] variant;
//! the persisted game state is owned by the machine and only reaches
//! durable storage through [`storage::save_all`] at explicit checkpoints.
//!
//! Screens come in two kinds:
//!
//! - *interactive* (Idle, Menu, SetBet, ConfirmReset): poll the keypad
//!   every tick and keep their scrolling rows moving;
//! - *timed* (Spin, Notice): never act on the keypad before their deadline,
//!   though a release still disarms the press gate.
//!
//! Every screen entry clears the display and redraws from scratch.

use super::input_logic::{bet_down, bet_up, select_next, select_prev};
use super::keypad::Debouncer;
use super::row::{render_scrolling, render_static, ScrollState};
use super::screens::{self, MenuItem, Notice};
use super::{ButtonSymbol, CharDisplay, Indicator, ScreenKind};
use crate::config::{IDLE_SCROLL_MS, MENU_SCROLL_MS, RESULT_HOLD_MS, SPIN_FRAMES, SPIN_FRAME_MS};
use crate::error::Error;
use crate::game::{self, ReelSource, SpinOutcome};
use crate::state::PersistedState;
use crate::storage::{self, ByteStore};

/// What a tick did, for the caller to log or act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A screen was entered (and drawn).
    Entered(ScreenKind),
    /// A spin was committed and settled.
    Spun(SpinOutcome),
    /// The state was written to the byte store.
    Saved,
    /// The byte store rejected the write.
    SaveFailed(Error),
    /// All persisted fields were restored to defaults.
    Reset,
    /// The indicator output changed.
    Light(bool),
}

/// Events produced by one tick.
pub type Events = heapless::Vec<Event, 4>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SpinPhase {
    /// `frame` random frames drawn so far; the next one is due at `next_ms`.
    Reeling { frame: u8, next_ms: u64 },
    /// Outcome on screen until `until_ms`.
    Showing { until_ms: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Idle {
        status: ScrollState,
    },
    Spin(SpinPhase),
    Menu {
        selected: usize,
        item: ScrollState,
        hint: ScrollState,
    },
    SetBet,
    ConfirmReset,
    Notice {
        until_ms: u64,
    },
}

impl Screen {
    fn kind(&self) -> ScreenKind {
        match self {
            Screen::Idle { .. } => ScreenKind::Idle,
            Screen::Spin(_) => ScreenKind::Spin,
            Screen::Menu { .. } => ScreenKind::Menu,
            Screen::SetBet => ScreenKind::SetBet,
            Screen::ConfirmReset => ScreenKind::ConfirmReset,
            Screen::Notice { .. } => ScreenKind::Notice,
        }
    }
}

/// The interaction engine: owns the display, the byte store, the indicator
/// output, the reel source and the game state.
pub struct Machine<D, S, L, R> {
    display: D,
    store: S,
    light: L,
    reels: R,
    state: PersistedState,
    screen: Screen,
    keypad: Debouncer,
    light_on: bool,
}

impl<D, S, L, R> Machine<D, S, L, R>
where
    D: CharDisplay,
    S: ByteStore,
    L: Indicator,
    R: ReelSource,
{
    /// Build the machine around a loaded state and draw the idle screen.
    pub fn new(
        display: D,
        store: S,
        mut light: L,
        reels: R,
        state: PersistedState,
        now_ms: u64,
    ) -> Self {
        light.set(false);
        let mut machine = Self {
            display,
            store,
            light,
            reels,
            state,
            screen: Screen::Idle {
                status: ScrollState::new(),
            },
            keypad: Debouncer::new(),
            light_on: false,
        };
        let mut events = Events::new();
        machine.enter_idle(now_ms, &mut events);
        machine
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn screen(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn light_on(&self) -> bool {
        self.light_on
    }

    pub fn indicator(&self) -> &L {
        &self.light
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Advance the machine by one poll period.
    ///
    /// `sample` is the current keypad reading. Timed screens never act on
    /// it but still let a release disarm the press gate.
    pub fn tick(&mut self, now_ms: u64, sample: u16) -> Events {
        let mut events = Events::new();
        match self.screen {
            Screen::Idle { status } => self.tick_idle(status, now_ms, sample, &mut events),
            Screen::Spin(phase) => {
                self.keypad.observe(sample);
                self.tick_spin(phase, now_ms, &mut events);
            }
            Screen::Menu {
                selected,
                item,
                hint,
            } => self.tick_menu(selected, item, hint, now_ms, sample, &mut events),
            Screen::SetBet => self.tick_set_bet(now_ms, sample, &mut events),
            Screen::ConfirmReset => self.tick_confirm_reset(now_ms, sample, &mut events),
            Screen::Notice { until_ms } => {
                self.keypad.observe(sample);
                if now_ms >= until_ms {
                    self.enter_idle(now_ms, &mut events);
                }
            }
        }
        events
    }

    // Idle

    fn enter_idle(&mut self, now_ms: u64, events: &mut Events) {
        self.display.clear();
        render_static(&mut self.display, screens::IDLE_HINT, 1, 0);
        let mut status = ScrollState::new();
        self.render_status(&mut status, now_ms);
        self.screen = Screen::Idle { status };
        let _ = events.push(Event::Entered(ScreenKind::Idle));
    }

    fn render_status(&mut self, status: &mut ScrollState, now_ms: u64) {
        let line = screens::status_line(&self.state);
        render_scrolling(&mut self.display, &line, 0, status, IDLE_SCROLL_MS, now_ms);
    }

    fn tick_idle(
        &mut self,
        mut status: ScrollState,
        now_ms: u64,
        sample: u16,
        events: &mut Events,
    ) {
        match self.keypad.poll(sample) {
            Some(ButtonSymbol::Select) => self.enter_spin(now_ms, events),
            Some(ButtonSymbol::Left) => self.enter_menu(now_ms, events),
            Some(ButtonSymbol::Right) => {
                self.save(events);
                self.enter_notice(&Notice::message(screens::SAVED_TEXT), now_ms, events);
            }
            Some(ButtonSymbol::Up | ButtonSymbol::Down) => {
                self.enter_notice(&Notice::message(screens::NO_ACTION_TEXT), now_ms, events);
            }
            Some(ButtonSymbol::None) | None => {
                self.render_status(&mut status, now_ms);
                self.screen = Screen::Idle { status };
            }
        }
    }

    // Spin

    fn enter_spin(&mut self, now_ms: u64, events: &mut Events) {
        self.state.debit_bet();
        self.display.clear();
        render_static(&mut self.display, screens::SPIN_BANNER, 1, 0);
        self.draw_random_frame();
        self.screen = Screen::Spin(SpinPhase::Reeling {
            frame: 1,
            next_ms: now_ms + SPIN_FRAME_MS,
        });
        let _ = events.push(Event::Entered(ScreenKind::Spin));
    }

    fn draw_random_frame(&mut self) {
        let reels = game::draw_reels(&mut self.reels);
        render_static(&mut self.display, &screens::reel_frame(reels), 0, 0);
    }

    fn tick_spin(&mut self, phase: SpinPhase, now_ms: u64, events: &mut Events) {
        match phase {
            SpinPhase::Reeling { frame, next_ms } if now_ms >= next_ms => {
                if frame < SPIN_FRAMES {
                    self.draw_random_frame();
                    self.screen = Screen::Spin(SpinPhase::Reeling {
                        frame: frame + 1,
                        next_ms: now_ms + SPIN_FRAME_MS,
                    });
                } else {
                    self.commit_spin(now_ms, events);
                }
            }
            SpinPhase::Showing { until_ms } if now_ms >= until_ms => {
                self.enter_idle(now_ms, events);
            }
            _ => {}
        }
    }

    fn commit_spin(&mut self, now_ms: u64, events: &mut Events) {
        let outcome = game::spin(self.state.bet, &mut self.reels);
        self.state.settle(&outcome);

        render_static(&mut self.display, &screens::reel_frame(outcome.reels), 0, 0);
        let verdict = if outcome.jackpot {
            screens::JACKPOT_TEXT
        } else {
            screens::LOSE_TEXT
        };
        render_static(&mut self.display, verdict, 1, 0);

        self.screen = Screen::Spin(SpinPhase::Showing {
            until_ms: now_ms + RESULT_HOLD_MS,
        });
        let _ = events.push(Event::Spun(outcome));
    }

    // Menu

    fn enter_menu(&mut self, now_ms: u64, events: &mut Events) {
        self.display.clear();
        let mut item = ScrollState::new();
        let mut hint = ScrollState::new();
        self.render_menu(0, &mut item, &mut hint, now_ms);
        self.screen = Screen::Menu {
            selected: 0,
            item,
            hint,
        };
        let _ = events.push(Event::Entered(ScreenKind::Menu));
    }

    fn render_menu(
        &mut self,
        selected: usize,
        item: &mut ScrollState,
        hint: &mut ScrollState,
        now_ms: u64,
    ) {
        let label = MenuItem::ALL[selected].label();
        render_scrolling(&mut self.display, label, 0, item, MENU_SCROLL_MS, now_ms);
        render_scrolling(
            &mut self.display,
            screens::MENU_HINT,
            1,
            hint,
            MENU_SCROLL_MS,
            now_ms,
        );
    }

    fn tick_menu(
        &mut self,
        mut selected: usize,
        mut item: ScrollState,
        mut hint: ScrollState,
        now_ms: u64,
        sample: u16,
        events: &mut Events,
    ) {
        let count = MenuItem::ALL.len();
        match self.keypad.poll(sample) {
            Some(ButtonSymbol::Select) => {
                return self.open(MenuItem::ALL[selected], now_ms, events);
            }
            Some(ButtonSymbol::Left | ButtonSymbol::Right) => {
                return self.enter_idle(now_ms, events);
            }
            Some(ButtonSymbol::Up) => {
                selected = select_prev(selected, count);
                item.reset();
            }
            Some(ButtonSymbol::Down) => {
                selected = select_next(selected, count);
                item.reset();
            }
            Some(ButtonSymbol::None) | None => {}
        }
        self.render_menu(selected, &mut item, &mut hint, now_ms);
        self.screen = Screen::Menu {
            selected,
            item,
            hint,
        };
    }

    fn open(&mut self, item: MenuItem, now_ms: u64, events: &mut Events) {
        let notice = match item {
            MenuItem::SetBet => return self.enter_set_bet(events),
            MenuItem::Reset => return self.enter_confirm_reset(events),
            MenuItem::HighScore => Notice::high_score(&self.state),
            MenuItem::Stats => Notice::stats(&self.state),
            MenuItem::Light => {
                self.light_on = !self.light_on;
                self.light.set(self.light_on);
                let _ = events.push(Event::Light(self.light_on));
                Notice::light(self.light_on)
            }
        };
        self.enter_notice(&notice, now_ms, events);
    }

    // Set bet

    fn enter_set_bet(&mut self, events: &mut Events) {
        self.display.clear();
        render_static(&mut self.display, &screens::set_bet_line(self.state.bet), 0, 0);
        render_static(&mut self.display, screens::SET_BET_HINT, 1, 0);
        self.screen = Screen::SetBet;
        let _ = events.push(Event::Entered(ScreenKind::SetBet));
    }

    fn tick_set_bet(&mut self, now_ms: u64, sample: u16, events: &mut Events) {
        let bet = match self.keypad.poll(sample) {
            Some(ButtonSymbol::Up) => bet_up(self.state.bet),
            Some(ButtonSymbol::Down) => bet_down(self.state.bet),
            Some(ButtonSymbol::Select | ButtonSymbol::Left | ButtonSymbol::Right) => {
                self.save(events);
                return self.enter_idle(now_ms, events);
            }
            Some(ButtonSymbol::None) | None => return,
        };
        self.state.set_bet(bet);
        render_static(&mut self.display, &screens::set_bet_line(self.state.bet), 0, 0);
    }

    // Reset

    fn enter_confirm_reset(&mut self, events: &mut Events) {
        self.display.clear();
        render_static(&mut self.display, screens::RESET_PROMPT, 0, 0);
        render_static(&mut self.display, screens::RESET_HINT, 1, 0);
        self.screen = Screen::ConfirmReset;
        let _ = events.push(Event::Entered(ScreenKind::ConfirmReset));
    }

    fn tick_confirm_reset(&mut self, now_ms: u64, sample: u16, events: &mut Events) {
        match self.keypad.poll(sample) {
            Some(ButtonSymbol::Select) => {
                self.state.reset();
                let _ = events.push(Event::Reset);
                self.save(events);
                self.enter_notice(&Notice::message(screens::RESET_DONE_TEXT), now_ms, events);
            }
            Some(ButtonSymbol::None) | None => {}
            Some(_) => {
                self.enter_notice(&Notice::message(screens::CANCELED_TEXT), now_ms, events);
            }
        }
    }

    // Notices

    fn enter_notice(&mut self, notice: &Notice, now_ms: u64, events: &mut Events) {
        self.display.clear();
        render_static(&mut self.display, &notice.top, 0, 0);
        render_static(&mut self.display, &notice.bottom, 1, 0);
        self.screen = Screen::Notice {
            until_ms: now_ms + notice.hold_ms,
        };
        let _ = events.push(Event::Entered(ScreenKind::Notice));
    }

    fn save(&mut self, events: &mut Events) {
        let event = match storage::save_all(&mut self.store, &self.state) {
            Ok(()) => Event::Saved,
            Err(e) => Event::SaveFailed(e),
        };
        let _ = events.push(event);
    }
}
