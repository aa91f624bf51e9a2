//! Peripheral bring-up for the nRF52840 board.
//!
//! Pin map lives in [`slotbox::config`].  Everything the engine needs from
//! the hardware is handed out through [`Board`].

use defmt::info;
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use slotbox::config::SEED_SAMPLES;
use slotbox::ui::keypad::normalize_sample;
use slotbox::Indicator;

use crate::flash::Flash;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// SAADC channel index of the keypad ladder (AIN1).
const KEYPAD_CHANNEL: usize = 0;

/// SAADC channel index of the floating entropy pin (AIN2).
const ENTROPY_CHANNEL: usize = 1;

/// Both analog inputs, sampled together.
pub struct Analog {
    saadc: Saadc<'static, 2>,
}

impl Analog {
    async fn read(&mut self) -> [i16; 2] {
        let mut buf = [0i16; 2];
        self.saadc.sample(&mut buf).await;
        buf
    }

    /// One keypad reading on the 0..=1023 scale.
    pub async fn keypad(&mut self) -> u16 {
        normalize_sample(self.read().await[KEYPAD_CHANNEL])
    }

    /// Raw readings from the floating pin, used to seed the reel RNG.
    pub async fn noise(&mut self) -> [i16; SEED_SAMPLES] {
        let mut noise = [0i16; SEED_SAMPLES];
        for n in noise.iter_mut() {
            *n = self.read().await[ENTROPY_CHANNEL];
        }
        noise
    }
}

/// On-board LED1 (active-low).
pub struct Led(Output<'static>);

impl Indicator for Led {
    fn set(&mut self, on: bool) {
        if on {
            self.0.set_low();
        } else {
            self.0.set_high();
        }
    }
}

pub struct Board {
    pub analog: Analog,
    pub i2c: Twim<'static, TWISPI0>,
    pub led: Led,
    pub flash: Flash,
}

/// Initialise clocks and every peripheral the firmware uses.
pub async fn init() -> Board {
    let p = embassy_nrf::init(Default::default());

    let mut config = saadc::Config::default();
    config.resolution = saadc::Resolution::_10BIT;
    let keypad = ChannelConfig::single_ended(p.P0_03);
    let entropy = ChannelConfig::single_ended(p.P0_04);
    let saadc = Saadc::new(p.SAADC, Irqs, config, [keypad, entropy]);
    saadc.calibrate().await;

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());

    let led = Led(Output::new(p.P0_13, Level::High, OutputDrive::Standard));

    let flash = BlockingAsync::new(Nvmc::new(p.NVMC));

    info!("Board initialised");

    Board {
        analog: Analog { saadc },
        i2c,
        led,
        flash,
    }
}
