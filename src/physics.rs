//! Particle simulation around the ring
//!
//! Every tick each particle is pulled toward the down-angle, clamped and
//! moved, then neighbours on the ring are pushed apart. Everything is integer
//! arithmetic with no division, so a tick costs the same every time.
//!
//! Collisions are resolved pair by pair in a fixed order, and only the second
//! member of a pair is ever moved. That anchors the result and guarantees the
//! pass terminates, at the cost of a small directional bias.

use crate::angle::{Angle, TURN, Velocity, led_pitch, shorter_arc};
use crate::config::{
    COLLISION_DAMPING_Q15, GRAVITY_SHIFT, MAX_VELOCITY, N_LEDS, N_PARTICLES, VELOCITY_SHIFT,
};
use crate::trig::q15_mul;

/// Closest two particles may sit: one LED apart
pub const LED_PITCH: Angle = led_pitch(N_LEDS);

/// Gravity pull for a particle at `position`
///
/// Proportional to the shorter-arc distance to `down`, not to its sine.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn gravity(position: Angle, down: Angle) -> Velocity {
    let distance = shorter_arc(position, down);
    let pull = (distance.unsigned_abs() >> GRAVITY_SHIFT) as Velocity;
    if distance < 0 { -pull } else { pull }
}

/// Scale a velocity by the collision damping factor
pub const fn damp(velocity: Velocity) -> Velocity {
    q15_mul(velocity, COLLISION_DAMPING_Q15)
}

/// Fixed set of particles sharing one ring
#[derive(Debug, Clone)]
pub struct ParticleSystem<const N: usize = N_PARTICLES> {
    position: [Angle; N],
    velocity: [Velocity; N],
}

impl<const N: usize> Default for ParticleSystem<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ParticleSystem<N> {
    /// Particles evenly spaced from angle 0, at rest
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new() -> Self {
        let mut position = [0; N];
        let spacing = if N == 0 { 0 } else { TURN / N as u32 };
        let mut i = 0;
        while i < N {
            position[i] = (i as u32 * spacing) as Angle;
            i += 1;
        }
        Self {
            position,
            velocity: [0; N],
        }
    }

    /// Return to the power-on layout
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub const fn positions(&self) -> &[Angle; N] {
        &self.position
    }

    pub const fn velocities(&self) -> &[Velocity; N] {
        &self.velocity
    }

    /// Place particle `i` directly
    pub fn set(&mut self, i: usize, position: Angle, velocity: Velocity) {
        self.position[i] = position;
        self.velocity[i] = velocity;
    }

    /// Index following `i` on the ring
    pub const fn next(i: usize) -> usize {
        (i + 1) % N
    }

    /// Index preceding `i` on the ring
    pub const fn prev(i: usize) -> usize {
        (i + N - 1) % N
    }

    /// Advance one tick under gravity toward `down`
    pub fn step(&mut self, down: Angle) {
        for i in 0..N {
            self.integrate(i, down);
        }
        self.resolve_collisions();
    }

    /// Gravity, clamp and move for a single particle
    fn integrate(&mut self, i: usize, down: Angle) {
        let pull = gravity(self.position[i], down);
        let velocity = self.velocity[i]
            .saturating_add(pull)
            .clamp(-MAX_VELOCITY, MAX_VELOCITY);
        self.velocity[i] = velocity;

        // Shift the magnitude so both directions round toward zero
        let distance = velocity.unsigned_abs() >> VELOCITY_SHIFT;
        self.position[i] = if velocity > 0 {
            self.position[i].wrapping_add(distance)
        } else {
            self.position[i].wrapping_sub(distance)
        };
    }

    /// Push apart every adjacent pair closer than one LED
    ///
    /// Pairs are `(0, N-1)` first, then `(i, i+1)` around the ring.
    pub fn resolve_collisions(&mut self) {
        if N < 2 {
            return;
        }
        self.resolve_pair(0, Self::prev(0));
        for i in 0..N {
            self.resolve_pair(i, Self::next(i));
        }
    }

    /// Keep `moved` at least one LED away from `anchor`
    fn resolve_pair(&mut self, anchor: usize, moved: usize) {
        let fixed = self.position[anchor];
        if self.position[moved].wrapping_sub(fixed) < LED_PITCH {
            // anchor <-- too close --> moved
            self.position[moved] = fixed.wrapping_add(LED_PITCH);
            self.bounce(anchor, moved);
        } else if fixed.wrapping_sub(self.position[moved]) < LED_PITCH {
            // moved <-- too close --> anchor
            self.position[moved] = fixed.wrapping_sub(LED_PITCH);
            self.bounce(moved, anchor);
        }
    }

    /// Exchange momentum between `left` and the particle just ahead of it
    fn bounce(&mut self, left: usize, right: usize) {
        // Already separating, or keeping pace
        if self.velocity[left] <= self.velocity[right] {
            return;
        }
        // L--> <--R, L--> R->, <-L <--R: swap and lose energy
        self.velocity.swap(left, right);
        self.velocity[left] = damp(self.velocity[left]);
        self.velocity[right] = damp(self.velocity[right]);
    }
}
