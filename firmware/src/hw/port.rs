// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! GPIOF as a combined DAC bus and configuration input.
//!
//! - PF0..PF11: 12-bit parallel output to the DAC, written once per tick.
//! - PF12..PF15: configuration switches (pulled down), read once at boot.

use dsp_filter::sampling::OutputBus;
use stm32f7xx_hal::pac;

/// Bits of the port driving the DAC.
pub const OUTPUT_MASK: u32 = 0x0FFF;

pub struct ParallelPort {
    port: pac::GPIOF,
}

impl ParallelPort {
    /// Enable the GPIOF clock and set the pin modes.
    pub fn gpiof(port: pac::GPIOF) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.ahb1enr.modify(|_, w| w.gpiofen().set_bit());

        // MODER: 01 (output) for pins 0..11, 00 (input) for 12..15
        port.moder.write(|w| unsafe { w.bits(0x0055_5555) });
        // Push-pull outputs
        port.otyper.write(|w| unsafe { w.bits(0) });
        // PUPDR: 10 (pull-down) for pins 12..15
        port.pupdr.write(|w| unsafe { w.bits(0xAA00_0000) });
        port.odr.write(|w| unsafe { w.bits(0) });

        Self { port }
    }

    /// Raw input data register; the configuration field is bits 12..15.
    #[inline]
    pub fn input_bits(&self) -> u32 {
        self.port.idr.read().bits()
    }
}

impl OutputBus for ParallelPort {
    /// Set and reset all twelve lines in one BSRR write so the DAC never sees a mixed value.
    #[inline]
    fn write(&mut self, value: u16) {
        let set = value as u32 & OUTPUT_MASK;
        let reset = !set & OUTPUT_MASK;
        self.port.bsrr.write(|w| unsafe { w.bits((reset << 16) | set) });
    }
}
