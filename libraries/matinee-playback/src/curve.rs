//! Scalar animation primitives for the splash sequence
//!
//! Two building blocks: an easing curve for timed fades and a damped
//! spring for the scale-in. Both produce plain scalars; the splash state
//! machine samples them against its own clock and the renderer maps them
//! onto whatever visual it has.

/// Easing curve for timed fades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EaseCurve {
    /// Constant-velocity fade
    Linear,

    /// Slow start, fast middle, slow end (cubic)
    #[default]
    EaseInOut,
}

impl EaseCurve {
    /// Calculate the fade value at a given position.
    ///
    /// # Arguments
    /// * `position` - Normalized position in the fade (0.0 to 1.0)
    /// * `fade_out` - If true, calculates fade-out; if false, fade-in
    ///
    /// # Returns
    /// Value in 0.0 to 1.0
    #[inline]
    pub fn value(&self, position: f32, fade_out: bool) -> f32 {
        let position = position.clamp(0.0, 1.0);
        let t = if fade_out { 1.0 - position } else { position };

        match self {
            EaseCurve::Linear => t,
            EaseCurve::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// Damped spring integrator.
///
/// Models `acceleration = tension * (target - position) - friction *
/// velocity` and advances with fixed one-millisecond semi-implicit Euler
/// steps, so a given elapsed time always produces the same value.
#[derive(Debug, Clone)]
pub struct Spring {
    friction: f32,
    tension: f32,
    target: f32,
    position: f32,
    velocity: f32,
}

impl Spring {
    /// Create a spring at `from` heading toward `target`
    pub fn new(from: f32, target: f32, friction: f32, tension: f32) -> Self {
        Self {
            friction,
            tension,
            target,
            position: from,
            velocity: 0.0,
        }
    }

    /// Advance the simulation by a whole number of milliseconds
    pub fn advance_ms(&mut self, ms: u64) {
        const DT: f32 = 0.001;

        for _ in 0..ms {
            let accel =
                self.tension * (self.target - self.position) - self.friction * self.velocity;
            self.velocity += accel * DT;
            self.position += self.velocity * DT;
        }
    }

    /// Current spring value
    pub fn value(&self) -> f32 {
        self.position
    }

    /// Whether the spring has effectively come to rest at its target
    pub fn is_settled(&self) -> bool {
        (self.position - self.target).abs() < 0.001 && self.velocity.abs() < 0.001
    }
}
