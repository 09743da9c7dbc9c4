// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration shared by the drivers and the application logic.

/// Settle time after an LCD command write, in milliseconds.
pub const LCD_COMMAND_SETTLE_MS: u32 = 4;

/// Settle time after an LCD character write, in microseconds.
pub const LCD_CHAR_SETTLE_US: u32 = 10;

/// Extra delay between the power-on initialization commands, in milliseconds.
pub const LCD_INIT_STEP_MS: u32 = 10;

/// Visible characters per LCD row (LM044L, 4x20).
pub const LCD_COLUMNS: usize = 20;

/// Title shown on the first LCD row.
pub const TITLE: &str = "STM32F767ZI";

/// Subtitle shown on the second LCD row.
pub const SUBTITLE: &str = "Running avg. filter";

/// Status text when the configuration input does not select a depth.
pub const UNFILTERED_TEXT: &str = "Signal not filtered";

/// Prefix of the status text when the filter is active.
pub const STEPS_PREFIX: &str = "Steps: ";

/// Bit position of the 4-bit configuration field in the input port.
pub const CONFIG_NIBBLE_SHIFT: u32 = 12;

/// Poll budget used by [`crate::sampling::WaitPolicy::bounded_default`].
///
/// A 12-bit conversion on the target takes well under a hundred polls; this leaves a wide margin
/// while still being far below one timer period.
pub const DEFAULT_MAX_POLLS: u32 = 10_000;
