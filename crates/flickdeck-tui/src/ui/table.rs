use crate::viewport::TableSpace;
use flickdeck_core::theme::{Element, Theme};
use flickdeck_core::transform::Point;
use flickdeck_core::{CardPhase, DeckController, Quad, Transform};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use unicode_width::UnicodeWidthStr;

/// Card size in table px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

/// Screen outline of card `index` for the current animation frame.
pub fn card_outline(controller: &DeckController, index: usize, size: CardSize) -> Option<Quad> {
    let visual = controller.visual(index)?;
    let outline = Transform::new(visual.rot, visual.scale).outline(size.width, size.height);
    Some(outline.translate([visual.x, visual.y]))
}

/// Topmost card under `point` that is still on the table.
pub fn hit_test(controller: &DeckController, size: CardSize, point: Point) -> Option<usize> {
    (0..controller.len()).rev().find(|&index| {
        controller.phase(index).is_some_and(CardPhase::is_on_table)
            && card_outline(controller, index, size).is_some_and(|quad| quad.contains(point))
    })
}

/// Draws the deck, bottom card first, each card filled as its projected
/// outline.
pub struct DeckWidget<'a> {
    pub controller: &'a DeckController,
    pub space: TableSpace,
    pub theme: &'a Theme,
    pub size: CardSize,
    /// Card currently under the pointer.
    pub held: Option<usize>,
}

impl Widget for DeckWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(self.space.area());
        for card in self.controller.deck().iter() {
            let index = card.index();
            if self.controller.phase(index) == Some(CardPhase::Gone) {
                continue;
            }
            let Some(quad) = card_outline(self.controller, index, self.size) else {
                continue;
            };
            let style = if self.held == Some(index) {
                self.theme.style(Element::HeldCard(index))
            } else {
                self.theme.style(Element::Card(index))
            };

            for row in area.top()..area.bottom() {
                let y = self.space.cell_center(area.x, row)[1];
                let Some((left, right)) = quad.span_at(y) else {
                    continue;
                };
                for column in area.left()..area.right() {
                    let x = self.space.cell_center(column, row)[0];
                    if x >= left && x <= right {
                        buf.get_mut(column, row).set_symbol(" ").set_style(style);
                    }
                }
            }

            draw_label(
                buf,
                area,
                &self.space,
                &quad,
                &card.label(),
                &format!("{}/{}", index + 1, self.controller.len()),
                style,
            );
        }
    }
}

fn draw_label(
    buf: &mut Buffer,
    area: Rect,
    space: &TableSpace,
    quad: &Quad,
    label: &str,
    counter: &str,
    style: ratatui::style::Style,
) {
    let (column, row) = space.to_cells(quad.center());
    let row = row.floor();
    for (offset, text) in [(0.0, label), (1.0, counter)] {
        let line_row = row + offset;
        if line_row < f64::from(area.top()) || line_row >= f64::from(area.bottom()) {
            continue;
        }
        let Some((left, right)) = quad.span_at(space.cell_center(area.x, line_row as u16)[1]) else {
            continue;
        };
        let (left, _) = space.to_cells([left, 0.0]);
        let (right, _) = space.to_cells([right, 0.0]);
        let room = (right - left).floor().max(0.0) as usize;
        let shown = room.min(text.width());
        if shown == 0 {
            continue;
        }
        let start = (column - shown as f64 / 2.0).round();
        let start = start.max(f64::from(area.left()));
        if start >= f64::from(area.right()) {
            continue;
        }
        let max_width = (f64::from(area.right()) - start) as usize;
        buf.set_stringn(start as u16, line_row as u16, text, shown.min(max_width), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flickdeck_core::settings::DisplaySettings;
    use flickdeck_core::{Deck, DeckTuning};
    use std::time::Duration;

    const SIZE: CardSize = CardSize {
        width: 180.0,
        height: 240.0,
    };

    fn settled_deck(cards: usize) -> DeckController {
        let images: Vec<String> = (0..cards).map(|i| format!("photo{i}.jpg")).collect();
        let mut controller =
            DeckController::new(Deck::new(images).unwrap(), DeckTuning::default(), Some(5));
        controller.advance(Duration::from_secs(5));
        controller
    }

    #[test]
    fn top_card_wins_the_hit_test() {
        let controller = settled_deck(3);
        assert_eq!(hit_test(&controller, SIZE, [0.0, 0.0]), Some(2));
        assert_eq!(hit_test(&controller, SIZE, [2000.0, 0.0]), None);
    }

    #[test]
    fn gone_cards_are_not_hit() {
        let mut controller = settled_deck(2);
        let flick = flickdeck_core::GestureEvent {
            index: 1,
            down: false,
            movement: [60.0, 0.0],
            direction: [1.0, 0.0],
            velocity: 1.0,
        };
        controller.handle_gesture(&flick, &flickdeck_core::FixedViewport(800.0));
        assert_eq!(hit_test(&controller, SIZE, [0.0, 0.0]), Some(0));
    }

    #[test]
    fn renders_top_card_colour_at_the_centre() {
        let controller = settled_deck(2);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 30);
        let space = TableSpace::new(area, &DisplaySettings::default());
        let mut buf = Buffer::empty(area);
        DeckWidget {
            controller: &controller,
            space,
            theme: &theme,
            size: SIZE,
            held: None,
        }
        .render(area, &mut buf);

        assert_eq!(buf.get(40, 12).bg, theme.card_color(1));
        assert_eq!(buf.get(0, 0).bg, ratatui::style::Color::Reset);
    }
}
