// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCP23S17 SPI GPIO expander driver.
//!
//! Only the write path is implemented: every transaction is a fixed 3-byte frame
//! `[opcode, register, data]` bracketed by the chip-select line. The device is assumed to be in
//! `BANK = 0` mode with hardware address `000`.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Control byte for a write: `0 1 0 0 A2 A1 A0 R/W` with A = 000 and R/W = 0.
pub const WRITE_OPCODE: u8 = 0x40;

// Register addresses (BANK = 0)
pub mod reg {
    pub const IODIRA: u8 = 0x00;
    pub const IODIRB: u8 = 0x01;
    pub const GPIOA: u8 = 0x12;
    pub const GPIOB: u8 = 0x13;
}

/// One of the expander's two 8-bit ports.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Port {
    A,
    B,
}

impl Port {
    /// I/O direction register (bit set = input).
    #[inline]
    pub fn direction_register(self) -> u8 {
        match self {
            Port::A => reg::IODIRA,
            Port::B => reg::IODIRB,
        }
    }

    /// Port data register; writes drive the output latches.
    #[inline]
    pub fn output_register(self) -> u8 {
        match self {
            Port::A => reg::GPIOA,
            Port::B => reg::GPIOB,
        }
    }
}

/// A single register write, as it goes out on the wire.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RegisterWrite {
    pub register: u8,
    pub data: u8,
}

impl RegisterWrite {
    #[inline]
    pub fn new(register: u8, data: u8) -> Self {
        Self { register, data }
    }

    /// Serialize to the 3-byte SPI frame.
    #[inline]
    pub fn frame(&self) -> [u8; 3] {
        [WRITE_OPCODE, self.register, self.data]
    }
}

/// Anything that can write one expander register.
///
/// The LCD driver is written against this trait rather than against [`Mcp23s17`] directly.
pub trait RegisterWriter {
    type Error;

    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Self::Error>;
}

impl<T: RegisterWriter + ?Sized> RegisterWriter for &mut T {
    type Error = T::Error;

    #[inline]
    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Self::Error> {
        T::write_register(self, register, data)
    }
}

/// Error from a single expander transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error<SpiE, PinE> {
    Spi(SpiE),
    Pin(PinE),
}

/// MCP23S17 driver owning its SPI bus and active-low chip-select pin.
///
/// The chip select is expected to be idle (high) when the driver is constructed.
pub struct Mcp23s17<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Mcp23s17<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Release the bus and the chip-select pin.
    pub fn free(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Send one frame with chip select asserted.
    ///
    /// Chip select is released even if the bus fails part-way, so the device never sees a
    /// truncated frame followed by the next one.
    pub fn transfer(&mut self, write: RegisterWrite) -> Result<(), Error<SPI::Error, CS::Error>> {
        self.cs.set_low().map_err(Error::Pin)?;
        let sent = self.send_frame(&write.frame());
        let released = self.cs.set_high().map_err(Error::Pin);
        sent?;
        released
    }

    /// Write `0x00` to the direction register of `port`, making all eight lines outputs.
    pub fn configure_outputs(&mut self, port: Port) -> Result<(), Error<SPI::Error, CS::Error>> {
        self.transfer(RegisterWrite::new(port.direction_register(), 0x00))
    }

    /// Drive the output latches of `port`.
    pub fn write_port(&mut self, port: Port, value: u8) -> Result<(), Error<SPI::Error, CS::Error>> {
        self.transfer(RegisterWrite::new(port.output_register(), value))
    }

    fn send_frame(&mut self, frame: &[u8; 3]) -> Result<(), Error<SPI::Error, CS::Error>> {
        // One byte at a time, each one waited out before the next.
        for &byte in frame {
            self.spi.write(&[byte]).map_err(Error::Spi)?;
            self.spi.flush().map_err(Error::Spi)?;
        }
        Ok(())
    }
}

impl<SPI, CS> RegisterWriter for Mcp23s17<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    type Error = Error<SPI::Error, CS::Error>;

    #[inline]
    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Self::Error> {
        self.transfer(RegisterWrite::new(register, data))
    }
}
