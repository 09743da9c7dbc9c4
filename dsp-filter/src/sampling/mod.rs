// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sampling
//!
//! The periodic sample → filter → output sequence run from the timer interrupt.
//!
//! [`Sampler::on_interrupt`] checks that the timer really raised the interrupt, then
//! [`Sampler::on_tick`] performs one tick in a fixed order:
//!
//! 1. reload the timer,
//! 2. raise the tick pin,
//! 3. drop any stale result, start one conversion and wait for it,
//! 4. run the filter,
//! 5. write the output bus,
//! 6. lower the tick pin,
//! 7. clear the timer's pending flag.
//!
//! The timer is reloaded before any other work. `on_tick` takes
//! `&mut self`, so a tick can never start while another one is still running.

pub mod wait;

pub use wait::{WaitError, WaitPolicy};

use embedded_hal::digital::OutputPin;

use crate::filter::RunningAverage;

/// Single-channel ADC converting on demand.
pub trait Adc {
    type Error;

    /// Drop a result left over from an earlier conversion that was given up on.
    fn discard_stale(&mut self);

    /// Start one conversion.
    fn start_conversion(&mut self);

    /// `WouldBlock` until the conversion started last has finished.
    fn read_result(&mut self) -> nb::Result<u16, Self::Error>;
}

/// Parallel output port feeding the DAC.
pub trait OutputBus {
    fn write(&mut self, value: u16);
}

/// Periodic timer that raised the tick interrupt.
pub trait TickTimer {
    /// Restart the current period.
    fn reload(&mut self);

    /// Whether the update interrupt flag is set.
    fn is_pending(&mut self) -> bool;

    /// Acknowledge the interrupt. The flag must read back clear once this returns.
    fn clear_pending(&mut self);
}

/// How far a tick got.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Phase {
    /// No tick has run yet.
    #[default]
    Idle,
    Sampling,
    Converting,
    Done,
}

/// A tick that did not produce an output.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Fault<E> {
    /// The conversion-complete flag never came up within the wait policy.
    ConversionTimeout,
    Adc(E),
}

impl<E> From<WaitError<E>> for Fault<E> {
    fn from(err: WaitError<E>) -> Self {
        match err {
            WaitError::TimedOut => Fault::ConversionTimeout,
            WaitError::Other(e) => Fault::Adc(e),
        }
    }
}

/// Running counters, readable from outside the interrupt.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TickStats {
    pub ticks: u32,
    pub faults: u32,
    /// Interrupts taken while the timer flag was already clear.
    pub spurious: u32,
    /// Last value written to the output bus.
    pub last_output: u16,
    /// Furthest phase the last tick reached; `Converting` after a conversion fault.
    pub last_phase: Phase,
}

/// Everything the tick interrupt touches.
pub struct Sampler<A, B, T, P> {
    adc: A,
    bus: B,
    timer: T,
    tick_pin: P,

    filter: RunningAverage,
    wait: WaitPolicy,

    stats: TickStats,
}

impl<A, B, T, P> Sampler<A, B, T, P>
where
    A: Adc,
    B: OutputBus,
    T: TickTimer,
    P: OutputPin,
{
    /// `filter` should already be configured; an unconfigured filter drives the bus to zero.
    pub fn new(adc: A, bus: B, timer: T, tick_pin: P, filter: RunningAverage) -> Self {
        Self {
            adc,
            bus,
            timer,
            tick_pin,
            filter,
            wait: WaitPolicy::Unbounded,
            stats: TickStats::default(),
        }
    }

    /// Set the policy for the conversion-complete wait.
    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    /// Tear down this sampler and return its hardware.
    pub fn free(self) -> (A, B, T, P) {
        (self.adc, self.bus, self.timer, self.tick_pin)
    }

    /// Timer interrupt entry point. Runs a tick only if the timer flag is set; returns `None`
    /// for an interrupt that arrived with the flag already clear.
    pub fn on_interrupt(&mut self) -> Option<Result<u16, Fault<A::Error>>> {
        if !self.timer.is_pending() {
            self.stats.spurious = self.stats.spurious.wrapping_add(1);
            return None;
        }
        Some(self.on_tick())
    }

    /// Run one tick. Returns the value written to the output bus.
    ///
    /// On a fault neither the filter history nor the output bus is touched, but the tick pin is
    /// still lowered and the interrupt still acknowledged.
    pub fn on_tick(&mut self) -> Result<u16, Fault<A::Error>> {
        self.timer.reload();
        self.tick_pin.set_high().ok();
        self.stats.last_phase = Phase::Sampling;

        let result = self.sample_and_output();

        self.tick_pin.set_low().ok();
        self.timer.clear_pending();

        self.stats.ticks = self.stats.ticks.wrapping_add(1);
        match result {
            Ok(out) => self.stats.last_output = out,
            Err(_) => self.stats.faults = self.stats.faults.wrapping_add(1),
        }
        result
    }

    fn sample_and_output(&mut self) -> Result<u16, Fault<A::Error>> {
        self.adc.discard_stale();
        self.adc.start_conversion();
        self.stats.last_phase = Phase::Converting;

        let policy = self.wait;
        let raw = policy.wait(|| self.adc.read_result())?;

        let out = self.filter.update(raw);
        self.bus.write(out);
        self.stats.last_phase = Phase::Done;
        Ok(out)
    }

    #[inline]
    pub fn stats(&self) -> TickStats {
        self.stats
    }

    #[inline]
    pub fn filter(&self) -> &RunningAverage {
        &self.filter
    }
}
