// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Boot-time status screen.

use embedded_hal::delay::DelayNs;
use heapless::String;

use crate::config::{LCD_COLUMNS, STEPS_PREFIX, SUBTITLE, TITLE, UNFILTERED_TEXT};
use crate::drivers::lcd::{CursorMode, Lcd, Line};
use crate::drivers::mcp23s17::RegisterWriter;
use crate::filter::FilterConfig;

/// Text for the status row: `"Steps: N"` or the unfiltered notice.
pub fn status_line(config: FilterConfig) -> String<LCD_COLUMNS> {
    let mut line = String::new();
    let fits = match config.depth() {
        Some(depth) => {
            let mut digits = itoa::Buffer::new();
            line.push_str(STEPS_PREFIX)
                .and_then(|()| line.push_str(digits.format(depth.get())))
        }
        None => line.push_str(UNFILTERED_TEXT),
    };
    debug_assert!(fits.is_ok(), "status text wider than {} columns", LCD_COLUMNS);
    line
}

/// Clear the display, hide the cursor and draw title, subtitle and the filter status on row 4.
///
/// Expects [`Lcd::init`] to have run.
pub fn show_status<X, D>(lcd: &mut Lcd<X, D>, config: FilterConfig) -> Result<(), X::Error>
where
    X: RegisterWriter,
    D: DelayNs,
{
    lcd.clear()?;
    lcd.set_cursor(CursorMode::Off)?;
    lcd.write_str(TITLE, Line::First)?;
    lcd.write_str(SUBTITLE, Line::Second)?;
    lcd.write_str(&status_line(config), Line::Fourth)
}
