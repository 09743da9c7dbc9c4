// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-channel ADC1 support for STM32F7 using direct PAC register access.
//!
//! The channel and sample time are fixed at construction; each tick only sets `SWSTART` and then
//! polls `EOC`, so the conversion can be waited on through `dsp_filter::sampling::WaitPolicy`.
//!
//! Example:
//! ```no_run
//! let mut adc = Adc::adc1(dp.ADC1, 3);
//! adc.discard_stale();
//! adc.start_conversion();
//! let raw = nb::block!(adc.read_result());
//! ```

use dsp_filter::sampling;
use stm32f7xx_hal::pac;

/// Sample time selection `SMPx = 0b001` (15 ADC clock cycles).
const SAMPLE_TIME: u8 = 0b001;

/// A conversion result was overwritten before it was read.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Overrun;

/// Generic ADC wrapper over a PAC ADCx peripheral.
pub struct Adc<ADC> {
    adc: ADC,
}

fn configure_common() {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / 4
    common.ccr.modify(|_, w| w.adcpre().div4());
}

fn init_single_channel(adc: &pac::adc1::RegisterBlock, channel: u8) {
    // Power off to configure
    adc.cr2.modify(|_, w| w.adon().clear_bit());

    // 12-bit, right-aligned, software trigger
    adc.cr1.modify(|_, w| w.res().bits(0b00));
    adc.cr2.modify(|_, w| {
        w.cont().clear_bit();
        w.align().right();
        w.exten().disabled();
        w
    });

    if channel <= 9 {
        adc.smpr2.modify(|_, w| match channel {
            0 => w.smp0().bits(SAMPLE_TIME),
            1 => w.smp1().bits(SAMPLE_TIME),
            2 => w.smp2().bits(SAMPLE_TIME),
            3 => w.smp3().bits(SAMPLE_TIME),
            4 => w.smp4().bits(SAMPLE_TIME),
            5 => w.smp5().bits(SAMPLE_TIME),
            6 => w.smp6().bits(SAMPLE_TIME),
            7 => w.smp7().bits(SAMPLE_TIME),
            8 => w.smp8().bits(SAMPLE_TIME),
            _ => w.smp9().bits(SAMPLE_TIME),
        });
    }

    // Sequence length = 1 conversion of `channel`
    adc.sqr1.modify(|_, w| w.l().bits(0));
    adc.sqr3
        .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

    // Power on
    adc.cr2.modify(|_, w| w.adon().set_bit());
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1 for repeated single conversions of `channel` (0..=9).
    pub fn adc1(adc1: pac::ADC1, channel: u8) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        configure_common();
        init_single_channel(&adc1, channel);

        Self { adc: adc1 }
    }
}

impl sampling::Adc for Adc<pac::ADC1> {
    type Error = Overrun;

    /// A conversion abandoned by a bounded wait may have finished since; read DR to drop it.
    fn discard_stale(&mut self) {
        let sr = self.adc.sr.read();
        if sr.eoc().bit_is_set() {
            let _ = self.adc.dr.read();
        }
        if sr.ovr().bit_is_set() {
            self.adc.sr.modify(|_, w| w.ovr().clear_bit());
        }
    }

    #[inline]
    fn start_conversion(&mut self) {
        self.adc.cr2.modify(|_, w| w.swstart().set_bit());
    }

    fn read_result(&mut self) -> nb::Result<u16, Overrun> {
        let sr = self.adc.sr.read();
        if sr.ovr().bit_is_set() {
            self.adc.sr.modify(|_, w| w.ovr().clear_bit());
            return Err(nb::Error::Other(Overrun));
        }
        if sr.eoc().bit_is_clear() {
            return Err(nb::Error::WouldBlock);
        }

        // Reading DR clears EOC.
        Ok(self.adc.dr.read().data().bits() as u16)
    }
}
