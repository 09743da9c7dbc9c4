// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the board's `hw/` layer and below
//! the application logic.
//!
//! ## Existing drivers
//!
//! - [`mcp23s17`] – Microchip MCP23S17 16-bit SPI GPIO expander (write path)
//! - [`lcd`] – HD44780-compatible character LCD wired to both expander ports

pub mod lcd;
pub mod mcp23s17;

pub use lcd::{CursorMode, Lcd, Line};
pub use mcp23s17::{Mcp23s17, Port, RegisterWrite, RegisterWriter};
