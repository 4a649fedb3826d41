//! The fixed, ordered set of cards on the table.

use crate::settings::SettingsError;

/// Image references shipped with the demo. The first photo is repeated as the
/// last card on purpose, so the deck bottom matches its top.
pub const DEFAULT_IMAGES: [&str; 6] = [
    "https://sun9-80.userapi.com/impg/c858528/v858528969/983a1/l-efUu_Y780.jpg?size=1620x2160&quality=96&sign=947d99cebb622df174f1a09751fa55bb&type=album",
    "https://sun9-27.userapi.com/impf/c841633/v841633017/4df45/4tcasPILtJc.jpg?size=1215x2160&quality=96&sign=ed714f1272a56a548fec261254baec76&type=album",
    "https://sun9-62.userapi.com/impf/c851120/v851120574/80671/MLO3fdJUTlE.jpg?size=1620x2160&quality=96&sign=5f6819537c9d22733f0f096d172ac746&type=album",
    "https://sun9-27.userapi.com/impg/H5dxeycAncGS5snZvLyo8Jp_QVUwdQcrXC9wpg/d8VUS4da56Y.jpg?size=810x1080&quality=96&sign=2e796e5814d74ae6b0042df76452d365&type=album",
    "https://sun9-5.userapi.com/impg/IKtGg9PVxufjiS-HzRdYcPdcz7hRMd-GZNNxHA/RG7GTJL-EQE.jpg?size=960x1280&quality=95&sign=731101083077f9466c196d6c36a6acfd&type=album",
    "https://sun9-80.userapi.com/impg/c858528/v858528969/983a1/l-efUu_Y780.jpg?size=1620x2160&quality=96&sign=947d99cebb622df174f1a09751fa55bb&type=album",
];

/// A single card: its position in the deck and the image it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    index: usize,
    image: String,
}

impl Card {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Short display name: the last path segment of the image URI, without
    /// query string or fragment. Falls back to `card N`.
    pub fn label(&self) -> String {
        let reference = self.image.split(['?', '#']).next().unwrap_or_default();
        // Skip the host when a scheme is present.
        let path = match reference.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
            None => reference,
        };
        path.rsplit('/')
            .find(|segment| !segment.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("card {}", self.index + 1))
    }
}

/// Ordered, non-empty collection of cards. Index 0 sits at the bottom of the
/// stack, the last index on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new<I, S>(images: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cards: Vec<Card> = images
            .into_iter()
            .enumerate()
            .map(|(index, image)| Card {
                index,
                image: image.into(),
            })
            .collect();

        if cards.is_empty() {
            return Err(SettingsError::EmptyDeck);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            cards: DEFAULT_IMAGES
                .iter()
                .enumerate()
                .map(|(index, image)| Card {
                    index,
                    image: (*image).to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deck_has_six_cards_with_repeated_first_image() {
        let deck = Deck::default();
        assert_eq!(deck.len(), 6);
        assert_eq!(deck.get(0).unwrap().image(), deck.get(5).unwrap().image());
        assert!(deck.get(6).is_none());
    }

    #[test]
    fn empty_deck_is_rejected() {
        let result = Deck::new(Vec::<String>::new());
        assert!(matches!(result, Err(SettingsError::EmptyDeck)));
    }

    #[test]
    fn label_strips_query_and_path() {
        let deck = Deck::default();
        assert_eq!(deck.get(0).unwrap().label(), "l-efUu_Y780.jpg");
        assert_eq!(deck.get(1).unwrap().label(), "4tcasPILtJc.jpg");
    }

    #[test]
    fn label_falls_back_for_bare_references() {
        let deck = Deck::new(["https://example.com/", "photo.png", ""]).unwrap();
        assert_eq!(deck.get(0).unwrap().label(), "card 1");
        assert_eq!(deck.get(1).unwrap().label(), "photo.png");
        assert_eq!(deck.get(2).unwrap().label(), "card 3");
    }

    #[test]
    fn indices_follow_input_order() {
        let deck = Deck::new(["a.jpg", "b.jpg"]).unwrap();
        let indices: Vec<usize> = deck.iter().map(Card::index).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
