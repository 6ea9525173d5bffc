//! Fixed-rate tick pacing
//!
//! Portable pacing without async or platform timers. The caller passes the
//! current time in and sleeps (or busy-waits) for the returned duration.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::config::{N_PARTICLES, TICK_RATE_HZ};
use crate::hoop::{Hoop, TickError};
use crate::sensor::Accelerometer;
use crate::ws2812::LATCH_INTERVAL;

/// Default tick duration based on [`TICK_RATE_HZ`].
pub const DEFAULT_TICK_DURATION: Duration = Duration::from_micros(1_000_000 / TICK_RATE_HZ);

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Scheduler that owns the hoop and both collaborators.
///
/// Every tick:
/// - resets the deadline if more than two ticks behind
/// - runs one sense, step, render cycle
/// - returns the time left until the next tick
///
/// The tick duration never drops below the strip's latch interval, so a
/// caller that honours the sleep never starts a frame too early.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(Hoop::new(), sensor, strip);
///
/// loop {
///     let result = scheduler.tick(Instant::now())?;
///     busy_wait(result.sleep_duration);
/// }
/// ```
pub struct FrameScheduler<S, O, const N: usize = N_PARTICLES> {
    hoop: Hoop<N>,
    sensor: S,
    output: O,
    next_tick: Instant,
    tick_duration: Duration,
}

impl<S, O, const N: usize> FrameScheduler<S, O, N>
where
    S: Accelerometer,
    O: OutputDriver,
{
    /// Create a scheduler ticking at [`TICK_RATE_HZ`].
    pub fn new(hoop: Hoop<N>, sensor: S, output: O) -> Self {
        Self::with_tick_duration(hoop, sensor, output, DEFAULT_TICK_DURATION)
    }

    /// Create a scheduler with a custom tick duration.
    ///
    /// Durations shorter than the latch interval are raised to it.
    pub fn with_tick_duration(hoop: Hoop<N>, sensor: S, output: O, tick_duration: Duration) -> Self {
        Self {
            hoop,
            sensor,
            output,
            next_tick: Instant::from_millis(0),
            tick_duration: tick_duration.max(LATCH_INTERVAL),
        }
    }

    /// Run one tick and return timing information.
    ///
    /// The deadline advances even when a collaborator fails, so a flaky
    /// sensor cannot make the loop spin.
    pub fn tick(&mut self, now: Instant) -> Result<TickResult, TickError<S::Error, O::Error>> {
        // Skip the backlog after a long stall instead of bursting
        let max_drift = self.tick_duration * 2;
        if now > self.next_tick + max_drift {
            #[cfg(feature = "esp32-log")]
            println!(
                "[FrameScheduler.tick] behind by {} us, resetting deadline",
                (now - self.next_tick).as_micros()
            );
            self.next_tick = now;
        }

        let outcome = self.hoop.tick(&mut self.sensor, &mut self.output);

        self.next_tick += self.tick_duration;
        let sleep_duration = if self.next_tick > now {
            self.next_tick - now
        } else {
            Duration::from_ticks(0)
        };

        outcome.map(|()| TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        })
    }

    pub const fn hoop(&self) -> &Hoop<N> {
        &self.hoop
    }

    pub fn hoop_mut(&mut self) -> &mut Hoop<N> {
        &mut self.hoop
    }

    /// Deadline of the next tick, also valid after a failed tick
    pub const fn next_deadline(&self) -> Instant {
        self.next_tick
    }

    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Give the collaborators back
    pub fn release(self) -> (Hoop<N>, S, O) {
        (self.hoop, self.sensor, self.output)
    }
}
