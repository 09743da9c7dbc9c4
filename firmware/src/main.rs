// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Running-average DSP filter firmware for the NUCLEO-F767ZI.
//!
//! Boot: read the filter depth from PF12..PF15, bring up the LCD behind the MCP23S17 and print
//! the status screen, then hand ADC1, the DAC bus, TIM2 and the tick LED to the TIM2 interrupt.
//! After that `main` only sleeps and reports sampler faults on the debug console.

#![no_main]
#![no_std]

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::{free, Mutex};
use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
    spi::{Mode, Phase, Polarity, Spi},
};
use stm32f7xx_hal as hal;

use dsp_filter::display::show_status;
use dsp_filter::drivers::{Lcd, Mcp23s17};
use dsp_filter::filter::{FilterConfig, RunningAverage};
use dsp_filter::sampling::{Sampler, WaitPolicy};

mod hw;
use hw::{
    Adc, BoardPins, ChipSelect, Level, OutputLine, ParallelPort, PeriodicTimer, SpiBus, SysDelay,
    Usart,
};

/// Tick rate of the sampling interrupt.
const SAMPLE_RATE_HZ: u32 = 20_000;

/// ADC1 input channel of the analog signal (PA3).
const SIGNAL_CHANNEL: u8 = 3;

#[cfg(feature = "bounded-wait")]
const ADC_WAIT: WaitPolicy = WaitPolicy::bounded_default();
#[cfg(not(feature = "bounded-wait"))]
const ADC_WAIT: WaitPolicy = WaitPolicy::Unbounded;

type TickSampler =
    Sampler<Adc<pac::ADC1>, ParallelPort, PeriodicTimer<pac::TIM2>, OutputLine<'B', 0>>;

/// Owned by the TIM2 interrupt once sampling has started.
static SAMPLER: Mutex<RefCell<Option<TickSampler>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb2 = rcc.apb2;

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD);

    // USART3 (DBG)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (pins.usart3.tx, pins.usart3.rx), &clocks, usart_cfg);
    let mut console = Usart::new(serial);
    console.info("dsp-filter booting");

    // Filter configuration, read once
    let port = ParallelPort::gpiof(dp.GPIOF);
    let config = FilterConfig::from_input_port(port.input_bits());
    match config.depth() {
        Some(depth) => {
            console.begin(Level::Info);
            let _ = writeln!(console, "running average over {} samples\r", depth.get());
        }
        None => console.warn("configuration input unmapped, output held at 0"),
    }

    // SPI1 -> MCP23S17 -> LCD
    let spi_mode = Mode {
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
    };
    let spi1 = Spi::new(dp.SPI1, (pins.spi1.sck, pins.spi1.miso, pins.spi1.mosi))
        .enable::<u8>(spi_mode, 1.MHz(), &clocks, &mut apb2);
    let expander = Mcp23s17::new(SpiBus::new(spi1), ChipSelect::active_low(pins.spi1.cs));
    let mut lcd = Lcd::new(expander, SysDelay::new(cp.SYST, clocks.sysclk().raw()));

    match lcd.init().and_then(|()| show_status(&mut lcd, config)) {
        Ok(()) => console.info("status screen up"),
        Err(e) => {
            console.begin(Level::Warn);
            let _ = writeln!(console, "LCD init failed: {:?}\r", e);
            console.warn("continuing without display");
        }
    }

    // Sampling path
    let _signal = pins.signal;
    let adc = Adc::adc1(dp.ADC1, SIGNAL_CHANNEL);
    let timer = PeriodicTimer::tim2(dp.TIM2, clocks.pclk1().raw(), SAMPLE_RATE_HZ);
    let tick = OutputLine::new(pins.tick);
    let sampler = Sampler::new(adc, port, timer, tick, RunningAverage::with_config(config))
        .with_wait_policy(ADC_WAIT);

    free(|cs| SAMPLER.borrow(cs).replace(Some(sampler)));
    unsafe {
        NVIC::unmask(pac::Interrupt::TIM2);
    }
    console.info("sampling started");

    let mut reported = (0, 0);
    loop {
        let stats = free(|cs| SAMPLER.borrow(cs).borrow().as_ref().map(|s| s.stats()));
        if let Some(stats) = stats {
            if (stats.faults, stats.spurious) != reported {
                reported = (stats.faults, stats.spurious);
                console.begin(Level::Warn);
                let _ = writeln!(
                    console,
                    "{} faulted ticks out of {} (last phase {:?}), {} spurious interrupts\r",
                    stats.faults, stats.ticks, stats.last_phase, stats.spurious
                );
            }
        }
        cortex_m::asm::wfi();
    }
}

#[interrupt]
fn TIM2() {
    free(|cs| {
        if let Some(sampler) = SAMPLER.borrow(cs).borrow_mut().as_mut() {
            // Faults are counted in the sampler's stats and reported from `main`.
            let _ = sampler.on_interrupt();
        }
    });
}
