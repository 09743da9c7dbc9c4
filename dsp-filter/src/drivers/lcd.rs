// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HD44780-compatible character LCD (LM044L, 4x20) driven through an MCP23S17 expander.
//!
//! Wiring: expander port B carries the 8-bit data bus, port A bit 6 is RS and bit 7 is EN. Every
//! command or character is latched with one enable pulse and followed by a settle delay; the
//! controller cannot be polled for busy in this wiring, so the delays are the only flow control.
//!
//! There is no software copy of the cursor position. Callers that care where text lands pass a
//! [`Line`] to [`Lcd::send_text`].

use embedded_hal::delay::DelayNs;

use crate::config::{LCD_CHAR_SETTLE_US, LCD_COMMAND_SETTLE_MS, LCD_INIT_STEP_MS};
use crate::drivers::mcp23s17::{reg, RegisterWriter};

// Instruction bytes
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
    pub const DISPLAY_ON_CURSOR_ON: u8 = 0x0E;
    pub const DISPLAY_ON_CURSOR_BLINK: u8 = 0x0F;
    pub const FUNCTION_SET_8BIT_2LINE: u8 = 0x38;
    /// Legacy-mode prime sent twice at power-on.
    pub const WAKE: u8 = 0x33;

    pub const LINE_1: u8 = 0x80;
    pub const LINE_2: u8 = 0xC0;
    pub const LINE_3: u8 = 0x94;
    pub const LINE_4: u8 = 0xD4;
}

/// Port A control bits.
pub mod ctrl {
    pub const RS: u8 = 1 << 6;
    pub const EN: u8 = 1 << 7;
}

/// Where [`Lcd::send_text`] should start writing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// Continue at the current cursor position.
    Cursor,
    First,
    Second,
    Third,
    Fourth,
}

impl Line {
    /// Numeric row selector: `1..=4` pick a row, anything else keeps the cursor.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Line::First,
            2 => Line::Second,
            3 => Line::Third,
            4 => Line::Fourth,
            _ => Line::Cursor,
        }
    }

    /// DDRAM set-address command for the start of this row.
    pub fn address_command(self) -> Option<u8> {
        match self {
            Line::Cursor => None,
            Line::First => Some(cmd::LINE_1),
            Line::Second => Some(cmd::LINE_2),
            Line::Third => Some(cmd::LINE_3),
            Line::Fourth => Some(cmd::LINE_4),
        }
    }
}

/// Cursor appearance (display always on).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CursorMode {
    Off,
    Underline,
    Blink,
}

impl CursorMode {
    #[inline]
    pub fn command(self) -> u8 {
        match self {
            CursorMode::Off => cmd::DISPLAY_ON_CURSOR_OFF,
            CursorMode::Underline => cmd::DISPLAY_ON_CURSOR_ON,
            CursorMode::Blink => cmd::DISPLAY_ON_CURSOR_BLINK,
        }
    }
}

/// Character LCD on top of any [`RegisterWriter`].
pub struct Lcd<X, D> {
    expander: X,
    delay: D,
}

impl<X, D> Lcd<X, D>
where
    X: RegisterWriter,
    D: DelayNs,
{
    pub fn new(expander: X, delay: D) -> Self {
        Self { expander, delay }
    }

    /// Release the expander and the delay provider.
    pub fn free(self) -> (X, D) {
        (self.expander, self.delay)
    }

    /// Bring up the expander ports and run the controller's power-on sequence.
    ///
    /// The sequence is the one from the HD44780 datasheet and is sent in full whatever state the
    /// controller is in; the repeated `0x33` is what makes it work after a warm reset.
    pub fn init(&mut self) -> Result<(), X::Error> {
        self.expander.write_register(reg::IODIRA, 0x00)?;
        self.expander.write_register(reg::GPIOA, 0x00)?;
        self.expander.write_register(reg::IODIRB, 0x00)?;
        self.expander.write_register(reg::GPIOB, 0x00)?;

        self.send_command(cmd::WAKE)?;
        self.delay.delay_ms(LCD_INIT_STEP_MS);
        self.send_command(cmd::WAKE)?;
        self.delay.delay_ms(LCD_INIT_STEP_MS);
        self.send_command(cmd::FUNCTION_SET_8BIT_2LINE)?;
        self.delay.delay_ms(LCD_INIT_STEP_MS);
        self.send_command(cmd::DISPLAY_ON_CURSOR_OFF)?;
        self.send_command(cmd::ENTRY_MODE_INCREMENT)?;

        self.send_command(cmd::CLEAR)?;
        self.send_command(cmd::LINE_1)
    }

    /// Send an instruction byte (RS = 0) and wait for it to execute.
    pub fn send_command(&mut self, command: u8) -> Result<(), X::Error> {
        self.strobe(0, command)?;
        self.delay.delay_ms(LCD_COMMAND_SETTLE_MS);
        Ok(())
    }

    /// Send a data byte (RS = 1) and wait for it to be written.
    pub fn send_char(&mut self, data: u8) -> Result<(), X::Error> {
        self.strobe(ctrl::RS, data)?;
        self.delay.delay_us(LCD_CHAR_SETTLE_US);
        Ok(())
    }

    /// Write `text` starting at `line`. Stops at the first NUL byte, if any.
    pub fn send_text(&mut self, text: &[u8], line: Line) -> Result<(), X::Error> {
        self.set_line(line)?;
        for &b in text.iter().take_while(|&&b| b != 0) {
            self.send_char(b)?;
        }
        Ok(())
    }

    /// [`Lcd::send_text`] for string slices.
    #[inline]
    pub fn write_str(&mut self, text: &str, line: Line) -> Result<(), X::Error> {
        self.send_text(text.as_bytes(), line)
    }

    /// Move the cursor to the start of `line`. [`Line::Cursor`] sends nothing.
    pub fn set_line(&mut self, line: Line) -> Result<(), X::Error> {
        match line.address_command() {
            Some(address) => self.send_command(address),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn clear(&mut self) -> Result<(), X::Error> {
        self.send_command(cmd::CLEAR)
    }

    #[inline]
    pub fn set_cursor(&mut self, mode: CursorMode) -> Result<(), X::Error> {
        self.send_command(mode.command())
    }

    /// Put `value` on the data port and latch it with one EN pulse.
    fn strobe(&mut self, rs: u8, value: u8) -> Result<(), X::Error> {
        self.expander.write_register(reg::GPIOA, rs)?;
        self.expander.write_register(reg::GPIOB, value)?;
        self.expander.write_register(reg::GPIOA, rs | ctrl::EN)?;
        self.expander.write_register(reg::GPIOA, rs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    enum Event {
        Write(u8, u8),
        DelayNs(u64),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct FakeExpander(Log);

    impl RegisterWriter for FakeExpander {
        type Error = ();

        fn write_register(&mut self, register: u8, data: u8) -> Result<(), ()> {
            self.0.borrow_mut().push(Event::Write(register, data));
            Ok(())
        }
    }

    struct FakeDelay(Log);

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Event::DelayNs(ns as u64));
        }

        fn delay_us(&mut self, us: u32) {
            self.0.borrow_mut().push(Event::DelayNs(us as u64 * 1_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Event::DelayNs(ms as u64 * 1_000_000));
        }
    }

    fn lcd() -> (Lcd<FakeExpander, FakeDelay>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let lcd = Lcd::new(FakeExpander(log.clone()), FakeDelay(log.clone()));
        (lcd, log)
    }

    fn command(c: u8) -> Vec<Event> {
        vec![
            Event::Write(reg::GPIOA, 0x00),
            Event::Write(reg::GPIOB, c),
            Event::Write(reg::GPIOA, 0x80),
            Event::Write(reg::GPIOA, 0x00),
            Event::DelayNs(4_000_000),
        ]
    }

    fn character(c: u8) -> Vec<Event> {
        vec![
            Event::Write(reg::GPIOA, 0x40),
            Event::Write(reg::GPIOB, c),
            Event::Write(reg::GPIOA, 0xC0),
            Event::Write(reg::GPIOA, 0x40),
            Event::DelayNs(10_000),
        ]
    }

    #[test]
    fn command_is_one_enable_pulse_then_settle() {
        let (mut lcd, log) = lcd();
        lcd.send_command(0x38).unwrap();
        assert_eq!(*log.borrow(), command(0x38));
    }

    #[test]
    fn char_is_one_enable_pulse_with_rs_high() {
        let (mut lcd, log) = lcd();
        lcd.send_char(b'A').unwrap();
        assert_eq!(*log.borrow(), character(b'A'));
    }

    #[test]
    fn every_write_is_framed_the_same_way() {
        let (mut lcd, log) = lcd();
        for b in 0..=255u8 {
            lcd.send_char(b).unwrap();
            lcd.send_command(b).unwrap();
        }

        let log = log.borrow();
        let writes: Vec<Event> = log
            .iter()
            .copied()
            .filter(|e| matches!(e, Event::Write(..)))
            .collect();
        assert_eq!(writes.len(), 256 * 2 * 4);
        for frame in writes.chunks(4) {
            let rs = match frame[0] {
                Event::Write(reg::GPIOA, rs) => rs,
                other => panic!("expected RS set first, got {:?}", other),
            };
            assert!(matches!(frame[1], Event::Write(reg::GPIOB, _)));
            assert_eq!(frame[2], Event::Write(reg::GPIOA, rs | ctrl::EN));
            assert_eq!(frame[3], Event::Write(reg::GPIOA, rs));
        }
    }

    #[test]
    fn text_on_a_line_sets_address_first() {
        let (mut lcd, log) = lcd();
        lcd.send_text(b"Hi", Line::Third).unwrap();

        let mut expected = command(cmd::LINE_3);
        expected.extend(character(b'H'));
        expected.extend(character(b'i'));
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn text_at_cursor_sends_no_address() {
        let (mut lcd, log) = lcd();
        lcd.send_text(b"ok", Line::Cursor).unwrap();

        let mut expected = character(b'o');
        expected.extend(character(b'k'));
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn text_stops_at_nul() {
        let (mut lcd, log) = lcd();
        lcd.send_text(b"ab\0cd", Line::Cursor).unwrap();

        let mut expected = character(b'a');
        expected.extend(character(b'b'));
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn line_index_mapping() {
        assert_eq!(Line::from_index(0), Line::Cursor);
        assert_eq!(Line::from_index(1).address_command(), Some(0x80));
        assert_eq!(Line::from_index(2).address_command(), Some(0xC0));
        assert_eq!(Line::from_index(3).address_command(), Some(0x94));
        assert_eq!(Line::from_index(4).address_command(), Some(0xD4));
        assert_eq!(Line::from_index(7), Line::Cursor);
    }

    #[test]
    fn init_sequence_is_complete() {
        let (mut lcd, log) = lcd();
        lcd.init().unwrap();

        let mut expected = vec![
            Event::Write(reg::IODIRA, 0x00),
            Event::Write(reg::GPIOA, 0x00),
            Event::Write(reg::IODIRB, 0x00),
            Event::Write(reg::GPIOB, 0x00),
        ];
        expected.extend(command(0x33));
        expected.push(Event::DelayNs(10_000_000));
        expected.extend(command(0x33));
        expected.push(Event::DelayNs(10_000_000));
        expected.extend(command(0x38));
        expected.push(Event::DelayNs(10_000_000));
        expected.extend(command(0x0C));
        expected.extend(command(0x06));
        expected.extend(command(0x01));
        expected.extend(command(0x80));
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn cursor_modes() {
        let (mut lcd, log) = lcd();
        lcd.set_cursor(CursorMode::Blink).unwrap();
        lcd.set_cursor(CursorMode::Underline).unwrap();

        let mut expected = command(0x0F);
        expected.extend(command(0x0E));
        assert_eq!(*log.borrow(), expected);
    }

    struct BrokenExpander {
        writes_left: usize,
    }

    impl RegisterWriter for BrokenExpander {
        type Error = &'static str;

        fn write_register(&mut self, _register: u8, _data: u8) -> Result<(), Self::Error> {
            if self.writes_left == 0 {
                return Err("bus down");
            }
            self.writes_left -= 1;
            Ok(())
        }
    }

    #[test]
    fn expander_errors_propagate() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut lcd = Lcd::new(BrokenExpander { writes_left: 2 }, FakeDelay(log.clone()));

        assert_eq!(lcd.send_command(cmd::CLEAR), Err("bus down"));
        // No settle delay after a failed strobe.
        assert!(log.borrow().is_empty());
    }
}
