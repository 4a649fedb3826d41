//! # flickdeck core
//!
//! Interaction logic for a stack of cards that can be dragged around and
//! flicked off the table, independent of any user interface.
//!
//! ## Modules
//!
//! - `cards`: the fixed, ordered deck of image references
//! - `controller`: gesture handling, card phases and the automatic restock
//! - `gesture`: turns pointer samples into drag gestures
//! - `spring`: damped spring integration driving every animated value
//! - `target`: the values cards are animated toward
//! - `transform`: perspective transform and projected card outline
//! - `settings`: configuration loading and validation
//! - `theme`: colours

pub mod cards;
pub mod controller;
pub mod gesture;
pub mod gone;
pub mod restock;
pub mod settings;
pub mod spring;
pub mod target;
pub mod theme;
pub mod transform;

pub use cards::{Card, Deck};
pub use controller::{
    CardPhase, DeckController, DeckTuning, FixedViewport, GestureOutcome, IgnoreReason, Viewport,
};
pub use gesture::{DragTracker, GestureEvent};
pub use settings::{Settings, SettingsError};
pub use target::CardVisualState;
pub use transform::{Quad, Transform};

#[cfg(test)]
mod tests {
    use crate::controller::{CardPhase, DeckController, DeckTuning, FixedViewport, GestureOutcome};
    use crate::gesture::DragTracker;
    use crate::target::{stack_target, MAX_TILT_DEG};
    use crate::Deck;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    const VIEWPORT: FixedViewport = FixedViewport(1024.0);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn three_card_deck() -> DeckController {
        let deck = Deck::new(["one.jpg", "two.jpg", "three.jpg"]).unwrap();
        DeckController::new(deck, DeckTuning::default(), Some(3))
    }

    /// Press, swipe right over 50 px in 20 ms, let go straight away.
    fn flick_right(
        deck: &mut DeckController,
        tracker: &mut DragTracker,
        index: usize,
        t: u64,
    ) -> GestureOutcome {
        let (_, press) = tracker.press(index, [500.0, 300.0], ms(t));
        deck.handle_gesture(&press, &VIEWPORT);
        for step in 1..=2 {
            let event = tracker
                .drag([500.0 + 25.0 * step as f64, 300.0], ms(t + 10 * step))
                .unwrap();
            deck.handle_gesture(&event, &VIEWPORT);
        }
        let release = tracker.release([550.0, 300.0], ms(t + 24)).unwrap();
        assert!(release.velocity > 0.2);
        deck.handle_gesture(&release, &VIEWPORT)
    }

    #[test]
    fn three_card_flick_scenario() {
        let mut deck = three_card_deck();
        let mut tracker = DragTracker::default();
        deck.advance(ms(2000));
        let before: Vec<_> = (0..3).map(|i| deck.target(i).unwrap()).collect();

        let outcome = flick_right(&mut deck, &mut tracker, 0, 2000);
        assert_eq!(outcome, GestureOutcome::Flicked { direction: 1.0 });
        assert_eq!(deck.gone().iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(deck.target(0).unwrap().x, 100.0 + 1024.0);
        assert_eq!(deck.target(1), Some(before[1]));
        assert_eq!(deck.target(2), Some(before[2]));

        flick_right(&mut deck, &mut tracker, 1, 2100);
        let outcome = flick_right(&mut deck, &mut tracker, 2, 2200);
        assert_eq!(outcome, GestureOutcome::DeckCleared);
        assert!(deck.gone().is_full());

        deck.advance(ms(600));
        assert!(deck.gone().is_empty());
        deck.advance(ms(6000));
        for index in 0..3 {
            let visual = deck.visual(index).unwrap();
            assert_eq!(visual.x, 0.0);
            assert_eq!(visual.y, index as f64 * -4.0);
            assert_eq!(visual.scale, 1.0);
        }
    }

    #[test]
    fn slow_drag_across_the_table_returns() {
        let mut deck = three_card_deck();
        let mut tracker = DragTracker::default();
        let (_, press) = tracker.press(2, [0.0, 0.0], ms(0));
        deck.handle_gesture(&press, &VIEWPORT);
        for step in 1..=30u64 {
            // 8 px every 50 ms: 0.16 px/ms.
            let event = tracker.drag([8.0 * step as f64, 0.0], ms(50 * step)).unwrap();
            deck.handle_gesture(&event, &VIEWPORT);
        }
        let release = tracker.release([240.0, 0.0], ms(1510)).unwrap();
        assert_eq!(deck.handle_gesture(&release, &VIEWPORT), GestureOutcome::Returning);
        assert_eq!(deck.target(2).unwrap().x, 0.0);
        assert!(deck.gone().is_empty());
    }

    #[test]
    fn cancelled_drag_returns_the_card_to_the_stack() {
        let mut deck = three_card_deck();
        let mut tracker = DragTracker::default();
        deck.advance(ms(2000));
        let (_, press) = tracker.press(1, [0.0, 0.0], ms(0));
        deck.handle_gesture(&press, &VIEWPORT);
        let drag = tracker.drag([120.0, 0.0], ms(10)).unwrap();
        deck.handle_gesture(&drag, &VIEWPORT);
        assert_eq!(deck.phase(1), Some(CardPhase::Dragging));

        let cancel = tracker.cancel().unwrap();
        assert_eq!(deck.handle_gesture(&cancel, &VIEWPORT), GestureOutcome::Returning);
        deck.advance(ms(10_000));

        assert_eq!(deck.phase(1), Some(CardPhase::Settled));
        let target = deck.target(1).unwrap();
        assert_eq!(target.x, 0.0);
        assert_eq!(target.scale, 1.0);
        assert!(deck.gone().is_empty());
    }

    proptest! {
        #[test]
        fn stack_targets_stay_within_bounds(seed in any::<u64>(), index in 0usize..64) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let target = stack_target(index, &mut rng);
            prop_assert_eq!(target.y, Some(index as f64 * -4.0));
            let rot = target.rot.unwrap();
            prop_assert!((-MAX_TILT_DEG..=MAX_TILT_DEG).contains(&rot));
        }

        #[test]
        fn gone_set_only_shrinks_at_restock(
            gestures in proptest::collection::vec((0usize..4, any::<bool>(), -500.0f64..500.0, 0.0f64..2.0, 0u64..400), 1..80)
        ) {
            let deck = Deck::new(["a", "b", "c", "d"]).unwrap();
            let mut deck = DeckController::new(deck, DeckTuning::default(), Some(1));
            let mut previous = 0;
            for (index, down, mx, velocity, pause) in gestures {
                let event = crate::GestureEvent {
                    index,
                    down,
                    movement: [mx, 0.0],
                    direction: [mx.signum(), 0.0],
                    velocity,
                };
                deck.handle_gesture(&event, &VIEWPORT);
                prop_assert!(deck.gone().len() >= previous);
                let restocked = deck.advance(ms(pause));
                if restocked {
                    prop_assert!(deck.gone().is_empty());
                } else {
                    prop_assert!(deck.gone().len() >= previous);
                }
                previous = deck.gone().len();
                prop_assert!(deck.gone().iter().all(|i| i < 4));
            }
        }
    }
}
