// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic update interrupt on a general-purpose timer.
//!
//! TIM2 is set up in up-counting mode with the update interrupt enabled. The NVIC line is left
//! masked; `main` unmasks it once the sampler is in place.

use dsp_filter::sampling::TickTimer;
use stm32f7xx_hal::pac;

pub struct PeriodicTimer<TIM> {
    tim: TIM,
}

impl PeriodicTimer<pac::TIM2> {
    /// Configure TIM2 to raise an update interrupt `rate_hz` times per second.
    ///
    /// `timer_clk_hz` is the TIM2 kernel clock (PCLK1 with the default APB1 prescaler of 1).
    pub fn tim2(tim2: pac::TIM2, timer_clk_hz: u32, rate_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // No prescaler; the period is all in ARR (32-bit on TIM2)
        let period = (timer_clk_hz / rate_hz).max(2);
        tim.psc.write(|w| unsafe { w.bits(0) });
        tim.arr.write(|w| unsafe { w.bits(period - 1) });

        // Load PSC/ARR now, then drop the update flag that generated
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.dier.modify(|_, w| w.uie().set_bit());
        tim.cnt.write(|w| unsafe { w.bits(0) });

        // Enable the counter
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }
}

impl TickTimer for PeriodicTimer<pac::TIM2> {
    /// Restart the period from zero.
    #[inline]
    fn reload(&mut self) {
        self.tim.cnt.write(|w| unsafe { w.bits(0) });
    }

    #[inline]
    fn is_pending(&mut self) -> bool {
        self.tim.sr.read().uif().bit_is_set()
    }

    /// Clear UIF and wait for the write to land, so the NVIC does not see the line still pending
    /// when the handler returns.
    #[inline]
    fn clear_pending(&mut self) {
        self.tim.sr.modify(|_, w| w.uif().clear_bit());
        let _ = self.tim.sr.read();
        cortex_m::asm::dsb();
    }
}
