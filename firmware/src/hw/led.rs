// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tick indicator output.
//!
//! `OutputLine` adapts a HAL push-pull pin to `embedded_hal::digital::OutputPin`. The sampler's
//! tick pin is LD1 (active high), so each tick shows on the LED as well as on a scope probe.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::gpio::{self, Output, PushPull};

/// Push-pull GPIO output exposed through the `embedded-hal` 1.0 traits, initialized low.
pub struct OutputLine<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> OutputLine<P, N> {
    pub fn new(mut pin: gpio::Pin<P, N, Output<PushPull>>) -> Self {
        pin.set_low();
        Self { pin }
    }
}

impl<const P: char, const N: u8> ErrorType for OutputLine<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for OutputLine<P, N> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_high();
        Ok(())
    }
}
