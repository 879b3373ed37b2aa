pub mod card;
mod error;
pub mod game;
pub mod hand;
pub mod session;
pub mod shoe;
pub mod strategy;

pub use card::{Card, Rank, Suit};
pub use error::GameError;
pub use game::{GamePhase, GameState, Outcome, RoundSummary};
pub use hand::Hand;
pub use session::{
    InputSource, LineInput, ScriptedInput, SessionStats, Table, TableEventHandler,
};
pub use shoe::Shoe;
pub use strategy::{dealer_decision, Decision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub number_of_decks: u8,
    /// Reshuffle before dealing when fewer cards than this remain. 0 never reshuffles.
    pub reshuffle_threshold: usize,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            number_of_decks: 3,
            reshuffle_threshold: 20,
        }
    }
}
