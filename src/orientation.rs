//! Gravity direction tracking
//!
//! Raw samples are noisy around shake and free-fall events, which the sensor
//! flags itself. Samples feed two moving averages, and a small hysteresis
//! machine decides when the averaged vector is trusted as "down".

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::angle::Angle;
use crate::config::{ACCEL_SAMPLE_SCALE, MAX_TILT_COUNT};
use crate::sensor::{AccelSample, Accelerometer};
use crate::trig::atan2;

/// Tilt hysteresis state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiltState {
    /// Upright; the estimate tracks new samples
    #[default]
    Settled,
    /// Consecutive tilted samples seen so far, below the threshold
    CountingTilt(u8),
    /// Threshold reached; the estimate is frozen
    FullyTilted,
    /// Consecutive upright samples seen since being fully tilted
    CountingRecovery(u8),
}

impl TiltState {
    /// State after one more sample
    #[must_use]
    pub const fn next(self, tilted: bool) -> Self {
        match (self, tilted) {
            (Self::Settled, false) => Self::Settled,
            (Self::Settled, true) => Self::count_tilt(1),
            (Self::CountingTilt(count), true) => Self::count_tilt(count + 1),
            (Self::CountingTilt(_), false) => Self::Settled,
            (Self::FullyTilted, true) => Self::FullyTilted,
            (Self::FullyTilted, false) => Self::count_recovery(1),
            (Self::CountingRecovery(count), false) => Self::count_recovery(count + 1),
            (Self::CountingRecovery(_), true) => Self::FullyTilted,
        }
    }

    /// The estimate may follow new samples
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Settled)
    }

    const fn count_tilt(count: u8) -> Self {
        if count >= MAX_TILT_COUNT {
            Self::FullyTilted
        } else {
            Self::CountingTilt(count)
        }
    }

    const fn count_recovery(count: u8) -> Self {
        if count >= MAX_TILT_COUNT {
            Self::Settled
        } else {
            Self::CountingRecovery(count)
        }
    }
}

/// One step of the moving average `avg = 3/4 * avg + sample * scale`
///
/// Stays inside `i16` for every `i8` sample: the fixed point of the average
/// is `256 * sample`.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn smooth(avg: i16, sample: i8) -> i16 {
    3 * (avg / 4) + sample as i16 * ACCEL_SAMPLE_SCALE
}

/// Smoothed acceleration and the gravity direction derived from it
#[derive(Debug, Clone, Default)]
pub struct Orientation {
    accel_x: i16,
    accel_y: i16,
    down_angle: Angle,
    tilt: TiltState,
}

impl Orientation {
    pub const fn new() -> Self {
        Self {
            accel_x: 0,
            accel_y: 0,
            down_angle: 0,
            tilt: TiltState::Settled,
        }
    }

    /// Return to the power-on state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Direction of gravity around the ring
    pub const fn down_angle(&self) -> Angle {
        self.down_angle
    }

    pub const fn tilt(&self) -> TiltState {
        self.tilt
    }

    /// Smoothed `(x, y)` acceleration
    pub const fn acceleration(&self) -> (i16, i16) {
        (self.accel_x, self.accel_y)
    }

    /// Feed one sample
    ///
    /// Only an upright sample taken while already settled moves the
    /// estimate. The sample that completes a recovery does not.
    pub fn update(&mut self, sample: AccelSample) {
        let was_settled = self.tilt.is_settled();
        let next = self.tilt.next(sample.tilted);
        #[cfg(feature = "esp32-log")]
        if core::mem::discriminant(&next) != core::mem::discriminant(&self.tilt) {
            println!("[Orientation.update] tilt {:?} -> {:?}", self.tilt, next);
        }
        self.tilt = next;

        if was_settled && !sample.tilted {
            self.accel_x = smooth(self.accel_x, sample.x);
            self.accel_y = smooth(self.accel_y, sample.y);
            self.down_angle = atan2(self.accel_x, self.accel_y);
        }
    }

    /// Pull one sample from `sensor` and feed it
    ///
    /// A failed read leaves the estimate untouched.
    pub fn sample_from<S: Accelerometer>(&mut self, sensor: &mut S) -> Result<(), S::Error> {
        let sample = sensor.sample()?;
        self.update(sample);
        Ok(())
    }
}
