// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial Peripheral Interface (SPI) abstraction layer.
//!
//! - `SpiBus` wraps a configured HAL SPI instance with 8-bit words and exposes it as an
//!   `embedded_hal::spi::SpiBus` for the device drivers.
//! - `ChipSelect` is an active-low GPIO output wrapper for manual CS control.

use core::convert::Infallible;

use embedded_hal::{digital, spi as eh_spi};
use stm32f7xx_hal::{
    gpio::{self, Output, PinState, PushPull},
    prelude::*,
    spi::{self, Enabled, Spi},
};

/// HAL SPI error, mapped onto the `embedded-hal` error kinds.
#[derive(Debug)]
pub struct SpiError(pub spi::Error);

impl eh_spi::Error for SpiError {
    fn kind(&self) -> eh_spi::ErrorKind {
        match self.0 {
            spi::Error::Overrun => eh_spi::ErrorKind::Overrun,
            spi::Error::ModeFault => eh_spi::ErrorKind::ModeFault,
            _ => eh_spi::ErrorKind::Other,
        }
    }
}

/// Wrapper around an enabled HAL SPI instance (8-bit words).
pub struct SpiBus<I, P> {
    spi: Spi<I, P, Enabled<u8>>,
}

impl<I, P> SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    pub fn new(spi: Spi<I, P, Enabled<u8>>) -> Self {
        Self { spi }
    }

    /// Perform a blocking, full-duplex transfer of one byte.
    ///
    /// Returns once the received byte is in, i.e. the transmission has completed.
    pub fn transfer_byte(&mut self, byte: u8) -> Result<u8, SpiError> {
        let mut tmp = [byte];
        self.spi.transfer(&mut tmp).map_err(SpiError)?;
        Ok(tmp[0])
    }
}

impl<I, P> eh_spi::ErrorType for SpiBus<I, P> {
    type Error = SpiError;
}

impl<I, P> eh_spi::SpiBus<u8> for SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    fn read(&mut self, words: &mut [u8]) -> Result<(), SpiError> {
        for w in words.iter_mut() {
            *w = self.transfer_byte(0x00)?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), SpiError> {
        for &w in words {
            self.transfer_byte(w)?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), SpiError> {
        let len = read.len().max(write.len());
        for i in 0..len {
            let out = write.get(i).copied().unwrap_or(0x00);
            let b = self.transfer_byte(out)?;
            if let Some(slot) = read.get_mut(i) {
                *slot = b;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), SpiError> {
        for b in words.iter_mut() {
            *b = self.transfer_byte(*b)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SpiError> {
        // Every byte is already waited out in `transfer_byte`.
        Ok(())
    }
}

/// Manual chip-select line, active-low, generic over any GPIO pin.
pub struct ChipSelect<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> ChipSelect<P, N> {
    /// Create an active-low chip select and set to the inactive state (i.e., high).
    pub fn active_low<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(PinState::High);
        Self { pin }
    }

    /// Assert the chip select.
    #[inline]
    pub fn select(&mut self) {
        self.pin.set_low();
    }

    /// Deassert the chip select.
    #[inline]
    pub fn deselect(&mut self) {
        self.pin.set_high();
    }
}

impl<const P: char, const N: u8> digital::ErrorType for ChipSelect<P, N> {
    type Error = Infallible;
}

// Pin level, not logical state: drivers drive CS low to select.
impl<const P: char, const N: u8> digital::OutputPin for ChipSelect<P, N> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.select();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.deselect();
        Ok(())
    }
}
