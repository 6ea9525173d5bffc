#![no_std]

pub mod angle;
pub mod color;
pub mod config;
pub mod frame;
pub mod frame_scheduler;
pub mod hoop;
pub mod orientation;
pub mod output;
pub mod physics;
pub mod sensor;
pub mod trig;
pub mod ws2812;

pub use angle::{Angle, Velocity};
pub use color::Rgb;
pub use frame::{Frame, Mark};
pub use frame_scheduler::{FrameScheduler, TickResult};
pub use hoop::{Hoop, TickError};
pub use orientation::{Orientation, TiltState};
pub use output::SmartLedsOutput;
pub use physics::ParticleSystem;
pub use sensor::{AccelSample, Accelerometer, I2cAccelerometer};
pub use ws2812::Ws2812;
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// A write sends one complete frame and must not be preempted.
pub trait OutputDriver {
    type Error;

    /// Send `frame` to the strip
    fn write(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}
