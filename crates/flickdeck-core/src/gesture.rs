//! Drag gestures on a single card.
//!
//! A [`DragTracker`] receives raw pointer samples and produces the
//! [`GestureEvent`]s the deck controller consumes: movement since the press,
//! direction of the latest movement, and its speed.

use crate::transform::Point;
use std::time::Duration;

/// How long a pointer may sit still before release and still count as a flick.
pub const DEFAULT_RELEASE_WINDOW: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub index: usize,
    /// The pointer is still held.
    pub down: bool,
    /// Displacement since the press, in px.
    pub movement: Point,
    /// Unit vector of the latest movement, `[0, 0]` before any.
    pub direction: Point,
    /// Speed of the latest movement, px/ms.
    pub velocity: f64,
}

impl GestureEvent {
    pub fn mx(&self) -> f64 {
        self.movement[0]
    }

    pub fn x_dir(&self) -> f64 {
        self.direction[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    index: usize,
    origin: Point,
    last: Point,
    last_moved: Duration,
    velocity: f64,
    direction: Point,
}

impl ActiveDrag {
    fn sample(&mut self, position: Point, time: Duration) {
        let delta = [position[0] - self.last[0], position[1] - self.last[1]];
        let distance = delta[0].hypot(delta[1]);
        if distance == 0.0 {
            return;
        }
        // Two samples in the same millisecond are treated as one apart.
        let elapsed_ms = (time.saturating_sub(self.last_moved).as_secs_f64() * 1000.0).max(1.0);
        self.direction = [delta[0] / distance, delta[1] / distance];
        self.velocity = distance / elapsed_ms;
        self.last = position;
        self.last_moved = time;
    }

    fn event(&self, down: bool) -> GestureEvent {
        GestureEvent {
            index: self.index,
            down,
            movement: [self.last[0] - self.origin[0], self.last[1] - self.origin[1]],
            direction: self.direction,
            velocity: self.velocity,
        }
    }
}

/// Follows at most one pointer drag at a time.
#[derive(Debug, Clone)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
    release_window: Duration,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_WINDOW)
    }
}

impl DragTracker {
    pub fn new(release_window: Duration) -> Self {
        Self {
            active: None,
            release_window,
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|drag| drag.index)
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Start dragging card `index`. Returns the release of a drag still in
    /// progress (see [`DragTracker::cancel`]) alongside the new press.
    pub fn press(
        &mut self,
        index: usize,
        position: Point,
        time: Duration,
    ) -> (Option<GestureEvent>, GestureEvent) {
        let abandoned = self.cancel();
        let drag = ActiveDrag {
            index,
            origin: position,
            last: position,
            last_moved: time,
            velocity: 0.0,
            direction: [0.0, 0.0],
        };
        self.active = Some(drag);
        (abandoned, drag.event(true))
    }

    pub fn drag(&mut self, position: Point, time: Duration) -> Option<GestureEvent> {
        let drag = self.active.as_mut()?;
        drag.sample(position, time);
        Some(drag.event(true))
    }

    pub fn release(&mut self, position: Point, time: Duration) -> Option<GestureEvent> {
        let mut drag = self.active.take()?;
        drag.sample(position, time);
        if time.saturating_sub(drag.last_moved) > self.release_window {
            drag.velocity = 0.0;
        }
        Some(drag.event(false))
    }

    /// End the active drag where it last was, with no velocity, so the card
    /// is released without being flicked.
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        let mut drag = self.active.take()?;
        drag.velocity = 0.0;
        Some(drag.event(false))
    }
}
