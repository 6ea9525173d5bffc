//! The hoop: orientation, particles and strip wired together
//!
//! Each tick runs sense, step, render, strictly in that order. Nothing here
//! is shared outside the loop, so no locking is needed beyond the critical
//! section the output driver takes around a frame.

use crate::OutputDriver;
use crate::angle::Angle;
use crate::color::Rgb;
use crate::config::N_PARTICLES;
use crate::frame::Frame;
use crate::orientation::Orientation;
use crate::physics::ParticleSystem;
use crate::sensor::Accelerometer;

/// Failure of one collaborator during [`Hoop::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError<S, O> {
    /// The accelerometer read failed; the last down-angle was used
    Sensor(S),
    /// The strip write failed
    Output(O),
}

/// Complete simulation state
#[derive(Debug, Clone, Default)]
pub struct Hoop<const N: usize = N_PARTICLES> {
    orientation: Orientation,
    particles: ParticleSystem<N>,
    frame: Frame,
}

impl<const N: usize> Hoop<N> {
    pub const fn new() -> Self {
        Self {
            orientation: Orientation::new(),
            particles: ParticleSystem::new(),
            frame: Frame::new(),
        }
    }

    /// Start from the power-on state with `color` for lit LEDs
    pub const fn with_color(color: Rgb) -> Self {
        Self {
            orientation: Orientation::new(),
            particles: ParticleSystem::new(),
            frame: Frame::with_color(color),
        }
    }

    /// Reset the gravity estimate and re-space the particles
    pub fn init_orientation(&mut self) {
        self.orientation.reset();
        self.particles.reset();
        self.frame.clear();
    }

    /// Read the accelerometer and update the gravity estimate
    pub fn sample_orientation<S: Accelerometer>(&mut self, sensor: &mut S) -> Result<(), S::Error> {
        self.orientation.sample_from(sensor)
    }

    /// Move every particle one tick toward the current down-angle
    pub fn step_simulation(&mut self) {
        self.particles.step(self.orientation.down_angle());
    }

    /// Draw the particles and send the frame
    pub fn render_frame<O: OutputDriver>(&mut self, output: &mut O) -> Result<(), O::Error> {
        self.frame.clear();
        for &position in self.particles.positions() {
            self.frame.mark(position);
        }
        output.write(&self.frame)
    }

    /// One full sense, step, render cycle
    ///
    /// A failed sensor read does not stop the tick: the particles keep
    /// moving under the last trusted down-angle and the frame still goes
    /// out. A failed write takes precedence when both fail.
    pub fn tick<S, O>(&mut self, sensor: &mut S, output: &mut O) -> Result<(), TickError<S::Error, O::Error>>
    where
        S: Accelerometer,
        O: OutputDriver,
    {
        let sensed = self.sample_orientation(sensor);
        self.step_simulation();
        self.render_frame(output).map_err(TickError::Output)?;
        sensed.map_err(TickError::Sensor)
    }

    pub const fn down_angle(&self) -> Angle {
        self.orientation.down_angle()
    }

    pub const fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub const fn particles(&self) -> &ParticleSystem<N> {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSystem<N> {
        &mut self.particles
    }

    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.frame.set_color(color);
    }
}
