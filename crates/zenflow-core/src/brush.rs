//! Velocity-driven brush physics.
//!
//! Slow movement pools ink (a thick, "bleeding" stroke); fast movement thins
//! the line toward a fifth of the base size. Velocities are per-event pointer
//! distances smoothed over a short sliding window.

use kurbo::Point;
use std::collections::VecDeque;

/// Number of recent velocity samples averaged per weight.
pub const VELOCITY_WINDOW_LEN: usize = 5;

/// Smoothed speed at which the stroke reaches its thinnest.
pub const MAX_SPEED: f64 = 30.0;

/// Thinnest weight, as a fraction of the base size.
pub const MIN_SIZE_FACTOR: f64 = 0.2;

/// Thickest velocity-driven weight, as a fraction of the base size.
pub const MAX_SIZE_FACTOR: f64 = 2.2;

/// Headroom above the maximum allowed when clamping.
pub const MAX_OVERSHOOT: f64 = 1.2;

/// Sliding window over the most recent per-event velocities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VelocityWindow {
    samples: VecDeque<f64>,
}

impl VelocityWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// A window holding a single sample, as at the start of a stroke.
    pub fn seeded(velocity: f64) -> Self {
        let mut window = Self::new();
        window.push(velocity);
        window
    }

    pub fn push(&mut self, velocity: f64) {
        self.samples.push_back(velocity);
        while self.samples.len() > VELOCITY_WINDOW_LEN {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Mean of the window after `velocity` is pushed, without mutating it.
    pub fn average_with(&self, velocity: f64) -> f64 {
        let keep = VELOCITY_WINDOW_LEN - 1;
        let skip = self.samples.len().saturating_sub(keep);
        let (sum, count) = self
            .samples
            .iter()
            .skip(skip)
            .fold((velocity, 1usize), |(sum, count), v| (sum + v, count + 1));
        sum / count as f64
    }
}

/// Inputs to the weight computation besides geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushParams {
    /// Base brush size in pixels.
    pub base_size: f64,
    /// 0 = fully speed sensitive, 1 = speed ignored.
    pub smoothness: f64,
    /// Smoothed speed below which the stroke pools.
    pub taper_threshold: f64,
    /// Weight multiplier applied while pooling.
    pub taper_multiplier: f64,
}

impl BrushParams {
    pub fn min_size(&self) -> f64 {
        self.base_size * MIN_SIZE_FACTOR
    }

    pub fn max_size(&self) -> f64 {
        self.base_size * MAX_SIZE_FACTOR
    }

    /// Weight for a smoothed speed.
    pub fn weight_for_speed(&self, average_velocity: f64) -> f64 {
        let min_size = self.min_size();
        let max_size = self.max_size();

        let weight = if average_velocity < self.taper_threshold {
            self.base_size * self.taper_multiplier
        } else {
            let sensitivity = 1.0 - self.smoothness;
            let speed_factor = (average_velocity * sensitivity).min(MAX_SPEED) / MAX_SPEED;
            max_size - speed_factor * (max_size - min_size)
        };

        // max/min rather than clamp: a negative base size must not panic
        weight.max(min_size).min(max_size * MAX_OVERSHOOT)
    }
}

/// Result of one physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSample {
    /// Instantaneous velocity, to be pushed into the caller's window.
    pub velocity: f64,
    /// Stroke weight for the current point.
    pub weight: f64,
}

/// Compute the stroke weight at `current`.
///
/// Pure: the caller owns the window and pushes [`BrushSample::velocity`]
/// into it afterwards.
pub fn stroke_weight(current: Point, previous: Point, window: &VelocityWindow, params: &BrushParams) -> BrushSample {
    let velocity = current.distance(previous);
    let average = window.average_with(velocity);
    BrushSample {
        velocity,
        weight: params.weight_for_speed(average),
    }
}
