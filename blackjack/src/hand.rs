use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Marker shown in place of the dealer's hole card.
pub const HIDDEN_CARD: &str = "**HIDDEN**";

/// The cards held by one party, in the order they were dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand::default()
    }

    /// Empty hand with room for `capacity` cards. Not a limit on hitting.
    pub fn with_capacity(capacity: usize) -> Hand {
        Hand {
            cards: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total with every Ace counted as 1 and faces as 10.
    pub fn min_score(&self) -> u32 {
        self.cards
            .iter()
            .map(|card| card.rank.blackjack_value() as u32)
            .sum()
    }

    /// Best total: a single Ace is promoted to 11 when the low total is 11 or less.
    pub fn score(&self) -> u32 {
        let min_score = self.min_score();
        if min_score > 11 {
            return min_score;
        }
        if self.cards.iter().any(Card::is_ace) {
            return min_score + 10;
        }
        min_score
    }

    /// True if an Ace is currently counted as 11.
    pub fn is_soft(&self) -> bool {
        self.score() != self.min_score()
    }

    pub fn is_bust(&self) -> bool {
        self.score() > 21
    }

    /// Renders the up card followed by a single hidden marker, whatever the
    /// number of cards behind it.
    pub fn dealer_display(&self) -> String {
        match self.cards.first() {
            Some(up_card) => format!("{}, {}", up_card, HIDDEN_CARD),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
        write!(f, "{}", cards.join(", "))
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}
