use thiserror::Error;

use crate::game::GamePhase;

#[derive(Error, Debug)]
pub enum GameError {
    /// A card was requested from an empty shoe.
    #[error("the shoe has no cards left")]
    DeckExhausted,
    #[error("{action} is not allowed during {phase:?}")]
    PhaseViolation {
        action: &'static str,
        phase: GamePhase,
    },
    /// The input source has no more tokens to give.
    #[error("player input closed")]
    InputClosed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
