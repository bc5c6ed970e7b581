//! Damped spring driving a scalar toward a target.
//!
//! The spring is solved in closed form instead of being integrated step by
//! step, so a trajectory sampled at 30 fps and one sampled at 144 fps pass
//! through the same values. Retargeting is done by starting a new spring
//! from the current value and velocity of the old one.

use serde::{Deserialize, Serialize};

/// Physical parameters of a spring animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance to the target below which the spring may come to rest.
    pub rest_delta: f32,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 500.0,
            damping: 60.0,
            mass: 0.1,
            rest_delta: 0.001,
            rest_speed: 2.0,
        }
    }
}

impl SpringConfig {
    /// Undamped angular frequency, `sqrt(k / m)`.
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio, `c / (2 * sqrt(k * m))`.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Whether a spring with this config counts as settled at the given state.
    pub fn is_at_rest(&self, displacement: f32, velocity: f32) -> bool {
        displacement.abs() < self.rest_delta && velocity.abs() < self.rest_speed
    }
}

/// Position and velocity of a spring at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSample {
    pub value: f32,
    pub velocity: f32,
    pub settled: bool,
}

/// A single spring animation from an origin toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    origin: f32,
    target: f32,
    initial_velocity: f32,
    elapsed: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, origin: f32, target: f32, initial_velocity: f32) -> Self {
        Self {
            config,
            origin,
            target,
            initial_velocity,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advances the spring clock by `dt` seconds and returns the new state.
    ///
    /// Once the spring is at rest the returned value is exactly the target
    /// and the velocity is zero.
    pub fn advance(&mut self, dt: f32) -> SpringSample {
        self.elapsed += dt.max(0.0);
        self.sample(self.elapsed)
    }

    /// Evaluates the spring at `t` seconds after its start.
    pub fn sample(&self, t: f32) -> SpringSample {
        let (displacement, velocity) = self.displacement_at(t);

        if self.config.is_at_rest(displacement, velocity) {
            SpringSample {
                value: self.target,
                velocity: 0.0,
                settled: true,
            }
        } else {
            SpringSample {
                value: self.target + displacement,
                velocity,
                settled: false,
            }
        }
    }

    /// Displacement from the target and velocity at time `t`.
    fn displacement_at(&self, t: f32) -> (f32, f32) {
        let u0 = self.origin - self.target;
        let v0 = self.initial_velocity;
        let omega = self.config.natural_frequency();
        let zeta = self.config.damping_ratio();

        if (zeta - 1.0).abs() < 1e-4 {
            // Critically damped
            let decay = (-omega * t).exp();
            let b = v0 + omega * u0;
            let u = decay * (u0 + b * t);
            let v = decay * (v0 - omega * b * t);
            (u, v)
        } else if zeta < 1.0 {
            // Under-damped: oscillates around the target
            let alpha = zeta * omega;
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let a = u0;
            let b = (v0 + alpha * u0) / omega_d;
            let decay = (-alpha * t).exp();
            let (sin, cos) = (omega_d * t).sin_cos();
            let u = decay * (a * cos + b * sin);
            let v = decay * ((b * omega_d - alpha * a) * cos - (alpha * b + a * omega_d) * sin);
            (u, v)
        } else {
            // Over-damped: sum of two decaying exponentials
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c1 = (v0 - r2 * u0) / (r1 - r2);
            let c2 = u0 - c1;
            let e1 = (r1 * t).exp();
            let e2 = (r2 * t).exp();
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        }
    }
}
