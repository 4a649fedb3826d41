//! Target values handed to the card springs.
//!
//! Everything here is pure: the controller decides *what* a card should move
//! toward, the springs in [`crate::spring`] decide *how* it gets there.

use crate::spring::SpringConfig;
use rand::Rng;
use std::time::Duration;

/// Vertical offset between neighbouring cards of the stack, in px.
pub const STACK_OFFSET_PX: f64 = -4.0;
/// Resting cards get a random tilt in `[-MAX_TILT_DEG, MAX_TILT_DEG]`.
pub const MAX_TILT_DEG: f64 = 10.0;
/// Per-index delay of the entry animation.
pub const ENTRY_STAGGER: Duration = Duration::from_millis(100);
/// Where cards start when they fly in from above.
pub const ENTRY_Y_PX: f64 = -1000.0;
pub const ENTRY_SCALE: f64 = 1.5;
/// Lift applied while a card is held.
pub const HELD_SCALE: f64 = 1.1;
/// Extra spin per unit of release velocity when a card leaves the table.
pub const EXIT_SPIN: f64 = 10.0;
/// Drag distance (px) per degree of tilt.
pub const TILT_DIVISOR: f64 = 100.0;

pub const FRICTION: f64 = 50.0;
pub const HELD_TENSION: f64 = 800.0;
pub const EXIT_TENSION: f64 = 200.0;
pub const REST_TENSION: f64 = 500.0;

/// Snapshot of the four animated values of one card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardVisualState {
    pub x: f64,
    pub y: f64,
    /// Degrees.
    pub rot: f64,
    pub scale: f64,
}

/// A partial update for one card. `None` fields keep whatever target the
/// spring already has.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetState {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rot: Option<f64>,
    pub scale: Option<f64>,
    /// Hold the update back for this long before the springs see it.
    pub delay: Option<Duration>,
    pub config: Option<SpringConfig>,
}

impl TargetState {
    /// Combine an older update with a newer one. Fields set on `newer` win;
    /// the delay always comes from `newer`.
    pub fn merge(self, newer: TargetState) -> TargetState {
        TargetState {
            x: newer.x.or(self.x),
            y: newer.y.or(self.y),
            rot: newer.rot.or(self.rot),
            scale: newer.scale.or(self.scale),
            delay: newer.delay,
            config: newer.config.or(self.config),
        }
    }
}

/// Where card `index` rests on the stack: centred, nudged up by its depth,
/// randomly tilted, arriving after a staggered delay.
pub fn stack_target<R: Rng + ?Sized>(index: usize, rng: &mut R) -> TargetState {
    TargetState {
        x: Some(0.0),
        y: Some(index as f64 * STACK_OFFSET_PX),
        rot: Some(rng.gen_range(-MAX_TILT_DEG..=MAX_TILT_DEG)),
        scale: Some(1.0),
        delay: Some(ENTRY_STAGGER * index as u32),
        config: None,
    }
}

/// Mount position of every card: far above the table, enlarged, untilted.
pub fn entry_state(_index: usize) -> CardVisualState {
    CardVisualState {
        x: 0.0,
        y: ENTRY_Y_PX,
        rot: 0.0,
        scale: ENTRY_SCALE,
    }
}

/// What a card is doing, as far as spring tuning is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Held,
    Exiting,
    Resting,
}

impl Motion {
    pub fn tension(self) -> f64 {
        match self {
            Motion::Held => HELD_TENSION,
            Motion::Exiting => EXIT_TENSION,
            Motion::Resting => REST_TENSION,
        }
    }

    pub fn config(self) -> SpringConfig {
        SpringConfig::new(self.tension(), FRICTION)
    }
}
