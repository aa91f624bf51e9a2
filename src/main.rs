//! slotbox firmware entry point.
//!
//! Boot sequence:
//!   1. Bring up the SAADC, I2C, LED and internal flash.
//!   2. Seed the reel RNG from the floating analog pin.
//!   3. Load the persisted state (defaults on first boot or corruption).
//!   4. Tick the interaction engine forever, forwarding saves to flash.

#![no_std]
#![no_main]

mod board;
mod flash;
mod oled;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::Twim;
use embassy_time::{Instant, Timer};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use slotbox::config::TICK_MS;
use slotbox::game::{self, RandomReels};
use slotbox::storage::{self, RamStore};
use slotbox::{Event, Machine};
use {defmt_rtt as _, panic_probe as _};

use crate::flash::SAVE_CHANNEL;
use crate::oled::Oled;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("slotbox starting");

    let board::Board {
        mut analog,
        i2c,
        led,
        mut flash,
    } = board::init().await;

    let seed = game::seed_from_noise(&analog.noise().await);
    info!("Reel seed: {=u64:x}", seed);
    let reels = RandomReels::new(SmallRng::seed_from_u64(seed));

    let mirror = match flash::load_mirror(&mut flash).await {
        Ok(mirror) => mirror,
        Err(e) => {
            warn!("State image unreadable ({:?})", e);
            RamStore::erased()
        }
    };
    let state = match storage::load_all(&mirror) {
        Ok(state) => state,
        Err(e) => {
            warn!("Stored state unusable ({:?}), starting from defaults", e);
            Default::default()
        }
    };
    info!("State: {:?}", state);

    if spawner.spawn(flash::persist_task(flash)).is_err() {
        warn!("Persist task failed to start, progress will not be saved");
    }

    let display = Oled::new(i2c);
    let mut machine = Machine::new(display, mirror, led, reels, state, now_ms());
    flush(&mut machine);

    loop {
        Timer::after_millis(TICK_MS).await;

        let sample = analog.keypad().await;
        for event in machine.tick(now_ms(), sample) {
            log_event(&event);
        }
        flush(&mut machine);

        if let Some(image) = machine.store_mut().take_dirty() {
            if SAVE_CHANNEL.try_send(image).is_err() {
                warn!("Save queue full, image dropped");
            }
        }
    }
}

type Engine = Machine<Oled<Twim<'static, TWISPI0>>, RamStore, board::Led, RandomReels<SmallRng>>;

fn flush(machine: &mut Engine) {
    if let Err(e) = machine.display_mut().flush() {
        warn!("Display update failed: {:?}", e);
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

fn log_event(event: &Event) {
    match event {
        Event::Entered(screen) => info!("Screen: {:?}", screen),
        Event::Spun(outcome) => info!(
            "Spin {:?} jackpot={} delta={}",
            outcome.reels, outcome.jackpot, outcome.credits_delta
        ),
        Event::Saved => info!("Game saved"),
        Event::SaveFailed(e) => warn!("Save failed: {:?}", e),
        Event::Reset => info!("Game data reset"),
        Event::Light(on) => info!("Light {}", on),
    }
}
