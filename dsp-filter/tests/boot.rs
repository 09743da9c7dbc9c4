// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Boot sequence against a simulated expander + HD44780, followed by a few ticks.

use core::convert::Infallible;

use dsp_filter::display::show_status;
use dsp_filter::drivers::mcp23s17::reg;
use dsp_filter::drivers::{Lcd, RegisterWriter};
use dsp_filter::filter::{FilterConfig, RunningAverage};
use dsp_filter::sampling::{Adc, OutputBus, Sampler, TickTimer};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

const RS: u8 = 0x40;
const EN: u8 = 0x80;

/// Minimal HD44780 model behind an MCP23S17: latches on the falling edge of EN.
struct SimulatedLcd {
    port_a: u8,
    port_b: u8,
    ddram: [u8; 0x80],
    address: usize,
    cursor_visible: bool,
}

impl SimulatedLcd {
    fn new() -> Self {
        Self {
            port_a: 0,
            port_b: 0,
            ddram: [b' '; 0x80],
            address: 0,
            cursor_visible: true,
        }
    }

    fn latch(&mut self, rs: bool, value: u8) {
        if rs {
            self.ddram[self.address & 0x7F] = value;
            self.address += 1;
            return;
        }
        match value {
            0x01 => {
                self.ddram = [b' '; 0x80];
                self.address = 0;
            }
            0x0C => self.cursor_visible = false,
            0x0E | 0x0F => self.cursor_visible = true,
            v if v & 0x80 != 0 => self.address = (v & 0x7F) as usize,
            _ => {}
        }
    }

    fn row(&self, row: usize) -> String {
        let start = [0x00, 0x40, 0x14, 0x54][row];
        let bytes = &self.ddram[start..start + 20];
        String::from_utf8_lossy(bytes).trim_end().to_string()
    }
}

impl RegisterWriter for SimulatedLcd {
    type Error = Infallible;

    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Infallible> {
        match register {
            reg::GPIOA => {
                let falling = self.port_a & EN != 0 && data & EN == 0;
                self.port_a = data;
                if falling {
                    let (rs, value) = (data & RS != 0, self.port_b);
                    self.latch(rs, value);
                }
            }
            reg::GPIOB => self.port_b = data,
            _ => {}
        }
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn boot_screen(input_port: u32) -> SimulatedLcd {
    let mut lcd = Lcd::new(SimulatedLcd::new(), NoDelay);
    lcd.init().unwrap();
    show_status(&mut lcd, FilterConfig::from_input_port(input_port)).unwrap();
    lcd.free().0
}

#[test]
fn status_screen_with_depth_four() {
    let screen = boot_screen(0x2000);

    assert_eq!(screen.row(0), "STM32F767ZI");
    assert_eq!(screen.row(1), "Running avg. filter");
    assert_eq!(screen.row(2), "");
    assert_eq!(screen.row(3), "Steps: 4");
    assert!(!screen.cursor_visible);
}

#[test]
fn status_screen_unfiltered() {
    let screen = boot_screen(0x9000);
    assert_eq!(screen.row(3), "Signal not filtered");
}

struct ConstAdc(u16);

impl Adc for ConstAdc {
    type Error = Infallible;

    fn discard_stale(&mut self) {}

    fn start_conversion(&mut self) {}

    fn read_result(&mut self) -> nb::Result<u16, Infallible> {
        Ok(self.0)
    }
}

#[derive(Default)]
struct Latch(Vec<u16>);

impl OutputBus for Latch {
    fn write(&mut self, value: u16) {
        self.0.push(value);
    }
}

/// Timer whose period has always just elapsed.
struct ExpiredTimer;

impl TickTimer for ExpiredTimer {
    fn reload(&mut self) {}

    fn is_pending(&mut self) -> bool {
        true
    }

    fn clear_pending(&mut self) {}
}

struct NullPin;

impl ErrorType for NullPin {
    type Error = Infallible;
}

impl OutputPin for NullPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

fn run_ticks(input_port: u32, sample: u16, ticks: usize) -> Vec<u16> {
    let filter = RunningAverage::with_config(FilterConfig::from_input_port(input_port));
    let mut sampler = Sampler::new(
        ConstAdc(sample),
        Latch::default(),
        ExpiredTimer,
        NullPin,
        filter,
    );
    for _ in 0..ticks {
        assert!(matches!(sampler.on_interrupt(), Some(Ok(_))));
    }
    let (_, bus, _, _) = sampler.free();
    bus.0
}

#[test]
fn constant_input_settles_after_depth_ticks() {
    assert_eq!(run_ticks(0x2000, 4000, 6), [1000, 2000, 3000, 4000, 4000, 4000]);
}

#[test]
fn unfiltered_bus_stays_at_zero() {
    assert_eq!(run_ticks(0x9000, 4000, 4), [0, 0, 0, 0]);
}
