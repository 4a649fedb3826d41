use flickdeck_core::theme::{Element, Theme};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme) {
    let footer_block = Block::default()
        .borders(Borders::ALL)
        .style(theme.style(Element::Border));

    let inner_area = footer_block.inner(area);

    let help = Line::from(vec![
        Span::styled("drag", theme.style(Element::Accent)),
        Span::styled(" a card, flick to throw", theme.style(Element::Inactive)),
        Span::raw(" | "),
        Span::raw("[R]"),
        Span::styled("estock", theme.style(Element::Inactive)),
        Span::raw(" | "),
        Span::raw("[T]"),
        Span::styled("heme", theme.style(Element::Inactive)),
        Span::raw(" | "),
        Span::raw("[Q]"),
        Span::styled("uit", theme.style(Element::Inactive)),
    ])
    .alignment(Alignment::Center);

    let footer_paragraph = Paragraph::new(help).style(theme.style(Element::Text));

    frame.render_widget(footer_block, area);
    frame.render_widget(footer_paragraph, inner_area);
}
