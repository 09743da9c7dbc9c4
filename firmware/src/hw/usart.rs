// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Debug console over USART.
//!
//! Blocking, TX-only line logger. Lines are tagged with a level (`[INFO]`, `[WARN]`) and end in
//! CRLF. Use `write!` / `writeln!` for formatted output; be sure to include `\r` before the `\n`.
//!
//! On the NUCLEO-F767ZI, USART3 is wired to the ST-LINK virtual COM port:
//! ```
//! $ screen /dev/tty.usbmodem* 115200
//! ```
//!
//! Nothing here is called from interrupt context.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Level {
    Info,
    Warn,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "[INFO] ",
            Level::Warn => "[WARN] ",
        }
    }
}

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Start a log line; the caller finishes it with `println` or `writeln!`.
    #[inline]
    pub fn begin(&mut self, level: Level) {
        self.write_str(level.tag());
    }

    pub fn log(&mut self, level: Level, msg: &str) {
        self.begin(level);
        self.println(msg);
    }

    #[inline]
    pub fn info(&mut self, msg: &str) {
        self.log(Level::Info, msg);
    }

    #[inline]
    pub fn warn(&mut self, msg: &str) {
        self.log(Level::Warn, msg);
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}
