// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy-wait on a hardware ready flag.
//!
//! Hardware status checks are expressed as `nb` polls: `Err(nb::Error::WouldBlock)` until the
//! flag is set. [`WaitPolicy`] decides how long to keep polling.

use crate::config::DEFAULT_MAX_POLLS;

/// How long to spin on a hardware flag.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum WaitPolicy {
    /// Spin until the flag is set. A peripheral that never completes hangs the caller.
    #[default]
    Unbounded,
    /// Give up after `max_polls` unsuccessful polls. At least one poll is always made.
    Bounded { max_polls: u32 },
}

/// Why a wait did not produce a value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WaitError<E> {
    TimedOut,
    Other(E),
}

impl WaitPolicy {
    /// Bounded policy with [`DEFAULT_MAX_POLLS`].
    pub const fn bounded_default() -> Self {
        WaitPolicy::Bounded {
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    /// Poll until `poll` yields a value or an error, or until the policy runs out.
    pub fn wait<T, E, F>(&self, mut poll: F) -> Result<T, WaitError<E>>
    where
        F: FnMut() -> nb::Result<T, E>,
    {
        let mut polls: u32 = 0;
        loop {
            match poll() {
                Ok(value) => return Ok(value),
                Err(nb::Error::Other(e)) => return Err(WaitError::Other(e)),
                Err(nb::Error::WouldBlock) => {}
            }

            polls = polls.saturating_add(1);
            if let WaitPolicy::Bounded { max_polls } = *self {
                if polls >= max_polls {
                    return Err(WaitError::TimedOut);
                }
            }
            core::hint::spin_loop();
        }
    }
}
