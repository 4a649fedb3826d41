//! Damped spring integration.
//!
//! Positions are in whatever unit the caller uses (px, degrees, scale) and
//! velocities in units per millisecond. Integration runs in fixed 1 ms steps
//! so the result does not depend on the frame rate.

use crate::target::{CardVisualState, TargetState};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Distance from the target that counts as arrived.
pub const PRECISION: f64 = 0.01;
const REST_VELOCITY: f64 = PRECISION / 10.0;
const STEP_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub tension: f64,
    pub friction: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub const fn new(tension: f64, friction: f64) -> Self {
        Self {
            tension,
            friction,
            mass: 1.0,
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0)
    }
}

/// One animated scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
    /// Time left over from the last advance, under one step.
    carry: Duration,
}

impl Spring {
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            position: value,
            velocity: 0.0,
            target: value,
            config,
            carry: Duration::ZERO,
        }
    }

    pub fn value(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    pub fn is_resting(&self) -> bool {
        self.velocity.abs() <= REST_VELOCITY && (self.position - self.target).abs() <= PRECISION
    }

    pub fn advance(&mut self, dt: Duration) {
        let elapsed = self.carry + dt;
        let steps = elapsed.as_millis();
        self.carry = elapsed - Duration::from_millis(steps as u64);
        for _ in 0..steps {
            if self.is_resting() {
                break;
            }
            let spring_force = -self.config.tension * 1e-6 * (self.position - self.target);
            let damping_force = -self.config.friction * 1e-3 * self.velocity;
            let acceleration = (spring_force + damping_force) / self.config.mass;
            self.velocity += acceleration * STEP_MS;
            self.position += self.velocity * STEP_MS;
        }
        if self.is_resting() {
            self.position = self.target;
            self.velocity = 0.0;
            self.carry = Duration::ZERO;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Pending {
    remaining: Duration,
    update: TargetState,
}

/// The four springs of a card plus at most one update waiting on its delay.
#[derive(Debug, Clone, PartialEq)]
pub struct CardAnimation {
    x: Spring,
    y: Spring,
    rot: Spring,
    scale: Spring,
    pending: Option<Pending>,
}

impl CardAnimation {
    pub fn new(initial: CardVisualState) -> Self {
        let config = SpringConfig::default();
        Self {
            x: Spring::new(initial.x, config),
            y: Spring::new(initial.y, config),
            rot: Spring::new(initial.rot, config),
            scale: Spring::new(initial.scale, config),
            pending: None,
        }
    }

    /// Queue or apply an update.
    ///
    /// A delayed update waits; an update without delay lands at once, and
    /// pulls forward whatever part of a waiting update it does not override.
    pub fn start(&mut self, update: TargetState) {
        let update = match self.pending.take() {
            Some(waiting) => waiting.update.merge(update),
            None => update,
        };
        match update.delay {
            Some(delay) if !delay.is_zero() => {
                self.pending = Some(Pending {
                    remaining: delay,
                    update,
                });
            }
            _ => self.apply(&update),
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        let mut dt = dt;
        if let Some(pending) = self.pending.as_mut() {
            if pending.remaining > dt {
                pending.remaining -= dt;
            } else {
                let lead = pending.remaining;
                let update = pending.update;
                self.pending = None;
                self.step(lead);
                self.apply(&update);
                dt -= lead;
            }
        }
        self.step(dt);
    }

    pub fn visual(&self) -> CardVisualState {
        CardVisualState {
            x: self.x.value(),
            y: self.y.value(),
            rot: self.rot.value(),
            scale: self.scale.value(),
        }
    }

    /// Current spring targets, ignoring anything still waiting on a delay.
    pub fn targets(&self) -> CardVisualState {
        CardVisualState {
            x: self.x.target(),
            y: self.y.target(),
            rot: self.rot.target(),
            scale: self.scale.target(),
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.x.config()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_resting(&self) -> bool {
        self.pending.is_none() && self.springs().iter().all(|spring| spring.is_resting())
    }

    fn springs(&self) -> [&Spring; 4] {
        [&self.x, &self.y, &self.rot, &self.scale]
    }

    fn step(&mut self, dt: Duration) {
        for spring in [&mut self.x, &mut self.y, &mut self.rot, &mut self.scale] {
            spring.advance(dt);
        }
    }

    fn apply(&mut self, update: &TargetState) {
        let fields = [
            (&mut self.x, update.x),
            (&mut self.y, update.y),
            (&mut self.rot, update.rot),
            (&mut self.scale, update.scale),
        ];
        for (spring, value) in fields {
            if let Some(config) = update.config {
                spring.set_config(config);
            }
            if let Some(value) = value {
                spring.set_target(value);
            }
        }
    }
}
