//! SSD1306 OLED driven as a 16x2 character grid.
//!
//! `FONT_8X13` gives 16 columns across the 128 px panel; the two text rows
//! sit on 16 px lines.  Writes go to a shadow grid first, so only rows
//! that actually changed are redrawn and the frame buffer is pushed over
//! I2C at most once per [`Oled::flush`].

use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use slotbox::config::{LCD_COLS, LCD_ROWS};
use slotbox::{CharDisplay, Error};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const CELL_WIDTH: u32 = 8;
const ROW_PITCH: i32 = 16;

/// Character grid on top of the SSD1306 driver.
pub struct Oled<I2C> {
    display: Driver<I2C>,
    shadow: [[u8; LCD_COLS]; LCD_ROWS as usize],
    /// Rows whose pixels differ from the panel.
    stale: [bool; LCD_ROWS as usize],
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and blank it.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        if display.init().is_err() {
            defmt::warn!("OLED init failed");
        }
        display.clear_buffer();
        let _ = display.flush();
        Self {
            display,
            shadow: [[b' '; LCD_COLS]; LCD_ROWS as usize],
            stale: [false; LCD_ROWS as usize],
        }
    }

    /// Redraw stale rows and push the frame buffer to the panel.
    pub fn flush(&mut self) -> Result<(), Error> {
        if !self.stale.iter().any(|s| *s) {
            return Ok(());
        }
        for row in 0..LCD_ROWS as usize {
            if self.stale[row] {
                self.draw_row(row);
                self.stale[row] = false;
            }
        }
        self.display.flush().map_err(|_| Error::Display)
    }

    fn draw_row(&mut self, row: usize) {
        let top = row as i32 * ROW_PITCH;
        let _ = Rectangle::new(
            Point::new(0, top),
            Size::new(CELL_WIDTH * LCD_COLS as u32, ROW_PITCH as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(&mut self.display);

        let text = core::str::from_utf8(&self.shadow[row]).unwrap_or("?");
        let _ = Text::with_baseline(text, Point::new(0, top), text_style(), Baseline::Top)
            .draw(&mut self.display);
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_8X13)
        .text_color(BinaryColor::On)
        .build()
}

impl<I2C> CharDisplay for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        for row in 0..LCD_ROWS as usize {
            if self.shadow[row].iter().any(|c| *c != b' ') {
                self.shadow[row] = [b' '; LCD_COLS];
                self.stale[row] = true;
            }
        }
    }

    fn write_cells(&mut self, col: u8, row: u8, cells: &[u8]) {
        let Some(line) = self.shadow.get_mut(row as usize) else {
            return;
        };
        let col = col as usize;
        let end = (col + cells.len()).min(LCD_COLS);
        if col >= end {
            return;
        }
        let cells = &cells[..end - col];
        if &line[col..end] != cells {
            line[col..end].copy_from_slice(cells);
            self.stale[row as usize] = true;
        }
    }
}
