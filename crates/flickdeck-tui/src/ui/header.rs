use flickdeck_core::theme::{Element, Theme};
use flickdeck_core::{DeckController, GestureOutcome};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph},
};

pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    controller: &DeckController,
    last_outcome: Option<GestureOutcome>,
) {
    let title = Title::from(" flickdeck v0.1.0 ").alignment(Alignment::Left);
    let theme_title = Title::from(format!(" {} ", theme.variant())).alignment(Alignment::Right);

    let (status, element) = build_status(controller, last_outcome);
    let line = Line::from(vec![
        Span::styled(
            format!("cards {}/{}", controller.remaining(), controller.len()),
            theme.style(Element::Accent),
        ),
        Span::styled(" :: ", theme.style(Element::Inactive)),
        Span::styled(status, theme.style(element)),
    ]);

    let header = Paragraph::new(line).block(
        Block::new()
            .borders(Borders::ALL)
            .title(title)
            .title(theme_title)
            .style(theme.style(Element::Border)),
    );

    frame.render_widget(header, area);
}

fn build_status(
    controller: &DeckController,
    last_outcome: Option<GestureOutcome>,
) -> (String, Element) {
    if let Some(remaining) = controller.restock_remaining() {
        return (
            format!("restocking in {:.1}s", remaining.as_secs_f64()),
            Element::Warning,
        );
    }
    match last_outcome {
        Some(GestureOutcome::Tracking) => ("holding".to_string(), Element::Text),
        Some(GestureOutcome::Flicked { direction }) if direction < 0.0 => {
            ("flicked left".to_string(), Element::Text)
        }
        Some(GestureOutcome::Flicked { .. }) => ("flicked right".to_string(), Element::Text),
        Some(GestureOutcome::Returning) => ("back on the stack".to_string(), Element::Text),
        _ if controller.is_resting() => ("ready".to_string(), Element::Inactive),
        _ => ("dealing".to_string(), Element::Inactive),
    }
}
