// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Running-average filter with a depth chosen once at boot.
//!
//! Works in `no_std`, does not allocate, and uses integer arithmetic only.
//!
//! The divisor is always the configured depth. Until `depth` samples have been seen the missing
//! history slots count as zero, so the first `depth - 1` outputs ramp up from below the input.

use crate::config::CONFIG_NIBBLE_SHIFT;

/// Smallest supported averaging depth.
pub const MIN_DEPTH: u8 = 2;
/// Largest supported averaging depth; also the history capacity.
pub const MAX_DEPTH: u8 = 5;

/// Number of samples averaged, guaranteed to be in `MIN_DEPTH..=MAX_DEPTH`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Depth(u8);

impl Depth {
    pub const fn new(depth: u8) -> Option<Self> {
        if depth >= MIN_DEPTH && depth <= MAX_DEPTH {
            Some(Self(depth))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Filter setting read from the configuration input at boot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterConfig {
    Averaging(Depth),
    /// The input did not select a depth; the output bus is held at zero.
    Unfiltered,
}

impl FilterConfig {
    /// Decode the 4-bit configuration field: `0..=3` select depth `2..=5`.
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble {
            0..=3 => match Depth::new(nibble + MIN_DEPTH) {
                Some(depth) => FilterConfig::Averaging(depth),
                None => FilterConfig::Unfiltered,
            },
            _ => FilterConfig::Unfiltered,
        }
    }

    /// Decode from a raw input-port value whose bits 12..15 hold the configuration field.
    #[inline]
    pub fn from_input_port(bits: u32) -> Self {
        Self::from_nibble(((bits >> CONFIG_NIBBLE_SHIFT) & 0x0F) as u8)
    }

    #[inline]
    pub fn depth(self) -> Option<Depth> {
        match self {
            FilterConfig::Averaging(depth) => Some(depth),
            FilterConfig::Unfiltered => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Uninitialized,
    Active(Depth),
    Inactive,
}

/// Running-average filter over the most recent raw samples.
pub struct RunningAverage {
    /// Newest sample first. Only the first `depth` slots are used.
    history: [u16; MAX_DEPTH as usize],
    state: State,
}

impl RunningAverage {
    /// Create an unconfigured filter. It outputs zero until [`RunningAverage::configure`] is
    /// called.
    pub const fn new() -> Self {
        Self {
            history: [0; MAX_DEPTH as usize],
            state: State::Uninitialized,
        }
    }

    /// Create a filter already configured with `config`.
    pub fn with_config(config: FilterConfig) -> Self {
        let mut filter = Self::new();
        filter.configure(config);
        filter
    }

    /// Apply the boot-time configuration.
    ///
    /// Only the first call has any effect; returns `false` if the filter was already configured.
    pub fn configure(&mut self, config: FilterConfig) -> bool {
        if self.state != State::Uninitialized {
            return false;
        }

        self.state = match config {
            FilterConfig::Averaging(depth) => State::Active(depth),
            FilterConfig::Unfiltered => State::Inactive,
        };
        true
    }

    /// Current configuration, or `None` before [`RunningAverage::configure`].
    pub fn config(&self) -> Option<FilterConfig> {
        match self.state {
            State::Uninitialized => None,
            State::Active(depth) => Some(FilterConfig::Averaging(depth)),
            State::Inactive => Some(FilterConfig::Unfiltered),
        }
    }

    /// Feed one raw sample and return the new average.
    ///
    /// Without an active depth this returns 0 and leaves the history untouched.
    pub fn update(&mut self, sample: u16) -> u16 {
        let depth = match self.state {
            State::Active(depth) => depth.get() as usize,
            State::Uninitialized | State::Inactive => return 0,
        };

        let window = &mut self.history[..depth];
        window.rotate_right(1);
        window[0] = sample;

        let sum: u32 = window.iter().map(|&s| s as u32).sum();
        (sum / depth as u32) as u16
    }

    /// The samples currently averaged, newest first.
    pub fn history(&self) -> &[u16] {
        match self.state {
            State::Active(depth) => &self.history[..depth.get() as usize],
            State::Uninitialized | State::Inactive => &[],
        }
    }
}

impl Default for RunningAverage {
    fn default() -> Self {
        Self::new()
    }
}
