use super::{
    footer::render_footer,
    header::render_header,
    table::{hit_test, CardSize, DeckWidget},
};
use crate::viewport::TableSpace;
use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use flickdeck_core::{
    settings::Settings,
    theme::{Element, Theme},
    DeckController, DragTracker, GestureEvent, GestureOutcome,
};
use ratatui::{
    prelude::{Constraint, CrosstermBackend, Direction, Layout, Rect, Terminal},
    widgets::{Block, Borders},
};
use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

pub struct App {
    should_quit: bool,
    theme: Theme,
    settings: Settings,
    config_path: PathBuf,
    controller: DeckController,
    tracker: DragTracker,
    started: Instant,
    /// Table area of the last frame, used to map mouse cells to table px.
    table: Rect,
    last_outcome: Option<GestureOutcome>,
}

impl App {
    pub fn new(settings: Settings, config_path: PathBuf) -> Result<Self> {
        let deck = settings
            .build_deck()
            .context("Failed to build the deck from settings")?;
        let controller = DeckController::new(deck, settings.deck, settings.seed);
        info!(cards = controller.len(), "deck mounted");

        Ok(Self {
            should_quit: false,
            theme: Theme::new(settings.theme),
            settings,
            config_path,
            controller,
            tracker: DragTracker::default(),
            started: Instant::now(),
            table: Rect::default(),
            last_outcome: None,
        })
    }

    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut ticker = tokio::time::interval(self.settings.display.frame_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        while !self.should_quit {
            self.draw(terminal)?;
            ticker.tick().await;
            self.handle_events()?;

            let now = Instant::now();
            if self.controller.advance(now - last_frame) {
                self.last_outcome = None;
            }
            last_frame = now;
        }
        Ok(())
    }

    fn card_size(&self) -> CardSize {
        CardSize {
            width: self.settings.display.card_width_px,
            height: self.settings.display.card_height_px,
        }
    }

    fn table_space(&self) -> TableSpace {
        TableSpace::new(self.table, &self.settings.display)
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let area = terminal.size().context("Failed to read terminal size")?;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);
        self.table = chunks[1];

        let space = self.table_space();
        let size = self.card_size();
        terminal
            .draw(|frame| {
                let background = Block::new()
                    .borders(Borders::NONE)
                    .style(self.theme.style(Element::Background));
                frame.render_widget(background, frame.size());

                render_header(
                    frame,
                    chunks[0],
                    &self.theme,
                    &self.controller,
                    self.last_outcome,
                );
                frame.render_widget(
                    DeckWidget {
                        controller: &self.controller,
                        space,
                        theme: &self.theme,
                        size,
                        held: self.tracker.active_index(),
                    },
                    chunks[1],
                );
                render_footer(frame, chunks[2], &self.theme);
            })
            .context("Failed to draw terminal")?;
        Ok(())
    }

    fn handle_events(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // A drag cannot survive the window losing focus.
            Event::FocusLost => {
                if let Some(index) = self.cancel_drag() {
                    debug!(index, "drag cancelled on focus loss");
                }
            }
            _ => {}
        }
    }

    /// Let go of the held card where it is, so it springs back to the stack.
    fn cancel_drag(&mut self) -> Option<usize> {
        let release = self.tracker.cancel()?;
        self.apply_gesture(&release);
        Some(release.index)
    }

    fn apply_gesture(&mut self, gesture: &GestureEvent) {
        let outcome = self.controller.handle_gesture(gesture, &self.table_space());
        self.last_outcome = Some(outcome);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('r') => {
                self.cancel_drag();
                self.controller.restock();
                self.last_outcome = None;
            }
            KeyCode::Char('t') => {
                self.theme.toggle();
                self.settings.theme = self.theme.variant();
                if let Err(e) = self.settings.save(&self.config_path) {
                    warn!(error = %e, "failed to persist theme");
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point = self.table_space().cell_center(mouse.column, mouse.row);
        let now = self.started.elapsed();

        let gesture = match mouse.kind {
            // Nothing can be picked up until the deck is back.
            MouseEventKind::Down(MouseButton::Left) if self.controller.is_restock_pending() => {
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                match hit_test(&self.controller, self.card_size(), point) {
                    Some(index) => {
                        let (abandoned, press) = self.tracker.press(index, point, now);
                        if let Some(abandoned) = abandoned {
                            self.apply_gesture(&abandoned);
                        }
                        Some(press)
                    }
                    None => None,
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.tracker.drag(point, now),
            MouseEventKind::Up(MouseButton::Left) => self.tracker.release(point, now),
            _ => None,
        };

        if let Some(gesture) = gesture {
            self.apply_gesture(&gesture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flickdeck_core::CardPhase;

    fn app() -> App {
        let settings = Settings {
            seed: Some(11),
            ..Settings::default()
        };
        let mut app = App::new(settings, PathBuf::from("flickdeck-test.toml")).unwrap();
        // Table centre lands on cell (50, 23).
        app.table = Rect::new(0, 3, 100, 40);
        app.controller.advance(Duration::from_secs(10));
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn fling(index: usize) -> GestureEvent {
        GestureEvent {
            index,
            down: false,
            movement: [60.0, 0.0],
            direction: [1.0, 0.0],
            velocity: 1.5,
        }
    }

    #[test]
    fn pressing_the_stack_picks_up_the_top_card() {
        let mut app = app();
        let top = app.controller.len() - 1;
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 50, 23));
        assert_eq!(app.tracker.active_index(), Some(top));
        assert_eq!(app.controller.phase(top), Some(CardPhase::Dragging));
        assert_eq!(app.last_outcome, Some(GestureOutcome::Tracking));
    }

    #[test]
    fn losing_focus_mid_drag_returns_the_card() {
        let mut app = app();
        let top = app.controller.len() - 1;
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 50, 23));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 62, 23));
        assert_eq!(app.controller.target(top).unwrap().scale, 1.1);

        app.handle_event(Event::FocusLost);
        assert!(!app.tracker.is_dragging());
        assert_eq!(app.last_outcome, Some(GestureOutcome::Returning));

        app.controller.advance(Duration::from_secs(10));
        assert_eq!(app.controller.phase(top), Some(CardPhase::Settled));
        let target = app.controller.target(top).unwrap();
        assert_eq!(target.x, 0.0);
        assert_eq!(target.scale, 1.0);
    }

    #[test]
    fn restock_key_mid_drag_drops_the_held_card() {
        let mut app = app();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 50, 23));
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)));
        assert!(!app.tracker.is_dragging());
        assert!(app.last_outcome.is_none());
        assert!(app.controller.gone().is_empty());
    }

    #[test]
    fn presses_are_ignored_while_the_deck_restocks() {
        let mut app = app();
        let space = app.table_space();
        for index in 0..app.controller.len() {
            app.controller.handle_gesture(&fling(index), &space);
        }
        assert!(app.controller.is_restock_pending());

        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 50, 23));
        assert!(app.tracker.active_index().is_none());
        assert!(app.last_outcome.is_none());
    }
}
