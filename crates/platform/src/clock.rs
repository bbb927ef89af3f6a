//! Monotonic millisecond clock.
//!
//! The player's timebase is a free-running 32-bit millisecond counter that
//! wraps after ~49.7 days. Every elapsed-time computation in the core goes
//! through [`elapsed_ms`], which subtracts with wraparound so a deadline that
//! straddles the wrap still fires on time.

/// Monotonic clock capability.
pub trait Clock {
    /// Current time in milliseconds since an arbitrary epoch (wrapping).
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, correct across counter wrap.
#[must_use]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// [`Clock`] backed by the embassy time driver.
///
/// On hardware the driver is the RTC-clocked timer; on desktop it is the
/// `std` driver enabled through embassy-time's `std` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[allow(clippy::cast_possible_truncation)] // intentional: wraps like millis()
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
