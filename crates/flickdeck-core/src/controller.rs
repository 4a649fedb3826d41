//! The deck controller: owns every card's animation and decides, gesture by
//! gesture, whether a card follows the pointer, returns to the stack, or
//! leaves the table.
//!
//! Each card moves through an explicit [`CardPhase`]:
//!
//! ```text
//! Entering -> Settled <-> Dragging -> Returning -> Settled
//!                                  \-> Exiting -> Gone
//! ```
//!
//! Gone cards stay off the table until the whole deck has been flicked away;
//! a restock then sends every card back through `Entering`.

use crate::cards::Deck;
use crate::gesture::GestureEvent;
use crate::gone::GoneSet;
use crate::restock::RestockTimer;
use crate::spring::CardAnimation;
use crate::target::{
    entry_state, stack_target, CardVisualState, Motion, TargetState, EXIT_SPIN, HELD_SCALE,
    TILT_DIVISOR,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::Display;
use tracing::{debug, info};

/// Source of the current viewport width, queried once per exit.
pub trait Viewport {
    fn width(&self) -> f64;
}

/// A viewport of constant width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport(pub f64);

impl Viewport for FixedViewport {
    fn width(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckTuning {
    /// Release speed (px/ms) above which a card is flicked away.
    pub trigger_velocity: f64,
    pub restock_delay_ms: u64,
    /// How far past the viewport edge a flicked card travels, px.
    pub exit_margin_px: f64,
}

impl Default for DeckTuning {
    fn default() -> Self {
        Self {
            trigger_velocity: 0.2,
            restock_delay_ms: 600,
            exit_margin_px: 100.0,
        }
    }
}

impl DeckTuning {
    pub fn restock_delay(&self) -> Duration {
        Duration::from_millis(self.restock_delay_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CardPhase {
    Entering,
    Settled,
    Dragging,
    Returning,
    Exiting,
    Gone,
}

impl CardPhase {
    /// Still counted as part of the stack.
    pub fn is_on_table(self) -> bool {
        !matches!(self, CardPhase::Exiting | CardPhase::Gone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    OutOfRange,
    RestockPending,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    Ignored(IgnoreReason),
    /// The card follows the pointer.
    Tracking,
    /// Released without enough speed; the card springs back.
    Returning,
    /// Released fast enough; the card leaves toward `direction` (±1).
    Flicked { direction: f64 },
    /// That was the last card; a restock is scheduled.
    DeckCleared,
}

#[derive(Debug, Clone)]
struct Slot {
    animation: CardAnimation,
    phase: CardPhase,
}

pub struct DeckController {
    deck: Deck,
    slots: Vec<Slot>,
    gone: GoneSet,
    restock: RestockTimer,
    tuning: DeckTuning,
    rng: ChaCha8Rng,
}

impl DeckController {
    /// Mount the deck: every card starts at its entry position and is sent
    /// toward its place on the stack.
    pub fn new(deck: Deck, tuning: DeckTuning, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let slots = deck
            .iter()
            .map(|card| {
                let mut animation = CardAnimation::new(entry_state(card.index()));
                animation.start(stack_target(card.index(), &mut rng));
                Slot {
                    animation,
                    phase: CardPhase::Entering,
                }
            })
            .collect();
        let gone = GoneSet::new(deck.len());

        Self {
            deck,
            slots,
            gone,
            restock: RestockTimer::new(),
            tuning,
            rng,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn gone(&self) -> &GoneSet {
        &self.gone
    }

    /// Cards not yet flicked away.
    pub fn remaining(&self) -> usize {
        self.len() - self.gone.len()
    }

    pub fn phase(&self, index: usize) -> Option<CardPhase> {
        self.slots.get(index).map(|slot| slot.phase)
    }

    pub fn visual(&self, index: usize) -> Option<CardVisualState> {
        self.slots.get(index).map(|slot| slot.animation.visual())
    }

    pub fn target(&self, index: usize) -> Option<CardVisualState> {
        self.slots.get(index).map(|slot| slot.animation.targets())
    }

    pub fn animation(&self, index: usize) -> Option<&CardAnimation> {
        self.slots.get(index).map(|slot| &slot.animation)
    }

    pub fn is_restock_pending(&self) -> bool {
        self.restock.is_pending()
    }

    pub fn restock_remaining(&self) -> Option<Duration> {
        self.restock.remaining()
    }

    /// Nothing is moving or waiting.
    pub fn is_resting(&self) -> bool {
        !self.restock.is_pending() && self.slots.iter().all(|slot| slot.animation.is_resting())
    }

    pub fn handle_gesture<V>(&mut self, event: &GestureEvent, viewport: &V) -> GestureOutcome
    where
        V: Viewport + ?Sized,
    {
        let index = event.index;
        if index >= self.slots.len() {
            return GestureOutcome::Ignored(IgnoreReason::OutOfRange);
        }
        if self.restock.is_pending() {
            debug!(index, "gesture ignored while restock is pending");
            return GestureOutcome::Ignored(IgnoreReason::RestockPending);
        }

        let trigger = event.velocity > self.tuning.trigger_velocity;
        let direction = if event.x_dir() < 0.0 { -1.0 } else { 1.0 };
        let mx = event.mx();

        if !event.down && trigger && self.gone.insert(index) {
            debug!(index, direction, velocity = event.velocity, "card flicked");
        }

        let is_gone = self.gone.contains(index);
        let motion = if event.down {
            Motion::Held
        } else if is_gone {
            Motion::Exiting
        } else {
            Motion::Resting
        };

        let x = if is_gone {
            (self.tuning.exit_margin_px + viewport.width()) * direction
        } else if event.down {
            mx
        } else {
            0.0
        };
        let spin = if is_gone {
            direction * EXIT_SPIN * event.velocity
        } else {
            0.0
        };
        let scale = if event.down { HELD_SCALE } else { 1.0 };

        let slot = &mut self.slots[index];
        slot.animation.start(TargetState {
            x: Some(x),
            y: None,
            rot: Some(mx / TILT_DIVISOR + spin),
            scale: Some(scale),
            delay: None,
            config: Some(motion.config()),
        });
        slot.phase = match (is_gone, event.down) {
            (true, _) => CardPhase::Exiting,
            (false, true) => CardPhase::Dragging,
            (false, false) => CardPhase::Returning,
        };

        if event.down {
            return GestureOutcome::Tracking;
        }
        if self.gone.is_full() {
            if self.restock.schedule(self.tuning.restock_delay()) {
                info!(
                    cards = self.len(),
                    delay_ms = self.tuning.restock_delay_ms,
                    "deck cleared, restock scheduled"
                );
            }
            return GestureOutcome::DeckCleared;
        }
        if is_gone {
            GestureOutcome::Flicked { direction }
        } else {
            debug!(index, mx, "card returned to the stack");
            GestureOutcome::Returning
        }
    }

    /// Step every animation by `dt`, settle phases of cards that have come
    /// to rest, then run a due restock. Returns `true` if the deck restocked.
    pub fn advance(&mut self, dt: Duration) -> bool {
        for slot in &mut self.slots {
            slot.animation.advance(dt);
            if slot.animation.is_resting() {
                slot.phase = match slot.phase {
                    CardPhase::Entering | CardPhase::Returning => CardPhase::Settled,
                    CardPhase::Exiting => CardPhase::Gone,
                    other => other,
                };
            }
        }

        if self.restock.advance(dt) {
            self.restock_now();
            return true;
        }
        false
    }

    /// Bring every card back now, dropping any scheduled restock.
    pub fn restock(&mut self) {
        self.restock.cancel();
        self.restock_now();
    }

    /// Returns `true` if a scheduled restock was dropped.
    pub fn cancel_restock(&mut self) -> bool {
        let cancelled = self.restock.cancel();
        if cancelled {
            debug!("restock cancelled");
        }
        cancelled
    }

    fn restock_now(&mut self) {
        self.gone.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.animation.start(stack_target(index, &mut self.rng));
            slot.phase = CardPhase::Entering;
        }
        info!(cards = self.slots.len(), "deck restocked");
    }
}
