pub mod adc;
pub mod delay;
pub mod led;
pub mod pins;
pub mod port;
pub mod spi;
pub mod timer;
pub mod usart;

pub use adc::Adc;
pub use delay::SysDelay;
pub use led::OutputLine;
pub use pins::BoardPins;
pub use port::ParallelPort;
pub use spi::{ChipSelect, SpiBus};
pub use timer::PeriodicTimer;
pub use usart::{Level, Usart};
