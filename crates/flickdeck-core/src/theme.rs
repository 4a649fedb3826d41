//! Everforest colours for the table and its cards.
//!
//! Dark and light variants, switchable at runtime.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum ThemeVariant {
    #[default]
    #[strum(to_string = "Everforest Dark")]
    EverforestDark,
    #[strum(to_string = "Everforest Light")]
    EverforestLight,
}

impl ThemeVariant {
    pub fn toggled(self) -> Self {
        match self {
            Self::EverforestDark => Self::EverforestLight,
            Self::EverforestLight => Self::EverforestDark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub warning: Color,
    /// Card faces, cycled by card index.
    pub cards: [Color; 6],
}

/// What is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Background,
    Text,
    Title,
    Border,
    Accent,
    Inactive,
    Warning,
    /// The face of card `n`.
    Card(usize),
    /// A card that is currently held.
    HeldCard(usize),
}

#[derive(Debug, Clone)]
pub struct Theme {
    variant: ThemeVariant,
    palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        let palette = match variant {
            ThemeVariant::EverforestDark => Palette {
                background: Color::Rgb(45, 53, 59),    // #2d353b
                foreground: Color::Rgb(211, 198, 170), // #d3c6aa
                accent: Color::Rgb(167, 192, 128),     // #a7c080
                border: Color::Rgb(116, 125, 135),     // #747d87
                selection: Color::Rgb(64, 72, 78),     // #40484e
                warning: Color::Rgb(219, 188, 127),    // #dbbc7f
                cards: [
                    Color::Rgb(230, 126, 128), // red
                    Color::Rgb(230, 152, 117), // orange
                    Color::Rgb(219, 188, 127), // yellow
                    Color::Rgb(167, 192, 128), // green
                    Color::Rgb(127, 187, 179), // aqua
                    Color::Rgb(214, 153, 182), // purple
                ],
            },
            ThemeVariant::EverforestLight => Palette {
                background: Color::Rgb(253, 246, 227), // #fdf6e3
                foreground: Color::Rgb(92, 106, 114),  // #5c6a72
                accent: Color::Rgb(141, 161, 1),       // #8da101
                border: Color::Rgb(150, 160, 170),     // #96a0aa
                selection: Color::Rgb(243, 236, 217),  // #f3ecd9
                warning: Color::Rgb(207, 131, 44),     // #cf832c
                cards: [
                    Color::Rgb(248, 85, 82),
                    Color::Rgb(245, 125, 38),
                    Color::Rgb(223, 160, 0),
                    Color::Rgb(141, 161, 1),
                    Color::Rgb(53, 167, 124),
                    Color::Rgb(223, 105, 186),
                ],
            },
        };

        Self { variant, palette }
    }

    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn toggle(&mut self) {
        *self = Self::new(self.variant.toggled());
    }

    pub fn card_color(&self, index: usize) -> Color {
        self.palette.cards[index % self.palette.cards.len()]
    }

    pub fn style(&self, element: Element) -> Style {
        let base = Style::default().bg(self.palette.background);
        match element {
            Element::Background | Element::Text => base.fg(self.palette.foreground),
            Element::Title => base.fg(self.palette.accent).add_modifier(Modifier::BOLD),
            Element::Border | Element::Inactive => base.fg(self.palette.border),
            Element::Accent => base.fg(self.palette.accent).add_modifier(Modifier::BOLD),
            Element::Warning => base.fg(self.palette.warning),
            // Card text sits on the card colour.
            Element::Card(index) => Style::default()
                .fg(self.palette.background)
                .bg(self.card_color(index)),
            Element::HeldCard(index) => Style::default()
                .fg(self.palette.background)
                .bg(self.card_color(index))
                .add_modifier(Modifier::BOLD),
        }
    }
}
