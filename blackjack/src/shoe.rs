use std::collections::VecDeque;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use strum::IntoEnumIterator;

use crate::card::{Card, Rank, Suit};
use crate::error::GameError;

/// Represents a shoe in the real world: one or more 52-card decks combined.
/// Cards are drawn from the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shoe {
    cards: VecDeque<Card>,
}

impl Shoe {
    /// Creates a new shoe with ordered cards.
    pub fn new(number_of_decks: u8) -> Shoe {
        let mut cards = VecDeque::with_capacity(number_of_decks as usize * 52);
        for _ in 0..number_of_decks {
            for suit in Suit::iter() {
                for rank in Rank::iter() {
                    cards.push_back(Card::new(rank, suit));
                }
            }
        }
        Shoe { cards }
    }

    /// Creates a new shoe and shuffles all of its cards.
    pub fn shuffled<R: Rng + ?Sized>(number_of_decks: u8, rng: &mut R) -> Shoe {
        let mut shoe = Shoe::new(number_of_decks);
        shoe.cards.make_contiguous().shuffle(rng);
        debug!("shuffled {} decks ({} cards)", number_of_decks, shoe.len());
        shoe
    }

    /// Creates a shoe that deals the given cards in order.
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Shoe {
        Shoe {
            cards: cards.into_iter().collect(),
        }
    }

    /// Deals the front card. Returns `DeckExhausted` if the shoe is empty.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop_front().ok_or(GameError::DeckExhausted)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// The next `number` cards to be dealt, front first.
    pub fn preview(&self, number: usize) -> Vec<Card> {
        self.cards.iter().take(number).copied().collect()
    }
}
