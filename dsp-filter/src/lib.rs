// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # DSP Filter Firmware Core
//!
//! Hardware-independent part of the running-average filter firmware: a timer-driven sampler feeds
//! ADC readings through a configurable running-average filter onto a parallel DAC bus, and a
//! character LCD behind an MCP23S17 SPI expander shows the filter status at boot.
//!
//! Everything here is written against `embedded-hal` traits and a few small seams of our own, so
//! it runs unchanged on the board (see the `firmware/` crate) and on the host under `cargo test`.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`drivers`] | Device-level drivers (MCP23S17 expander, HD44780 LCD) |
//! | [`filter`] | Running-average filter and its boot-time configuration |
//! | [`sampling`] | Per-tick sample/filter/output sequence and hardware wait policy |
//! | [`display`] | Boot-time status screen |
//! | [`config`] | Compile-time constants shared by the above |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cd firmware && cargo run --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod display;
pub mod drivers;
pub mod filter;
pub mod sampling;
