use std::collections::VecDeque;
use std::io::BufRead;

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{GamePhase, GameState, Outcome, RoundSummary};
use crate::hand::Hand;
use crate::shoe::Shoe;
use crate::strategy::{dealer_decision, Decision};
use crate::Rule;

/// Where the player's answers to the prompt come from.
pub trait InputSource {
    /// Returns the next token typed by the player, or `InputClosed` when
    /// there will be no more.
    fn next_token(&mut self) -> Result<String, GameError>;
}

/// Reads one line per prompt and keeps its first whitespace-separated token.
/// A blank line gives an empty token. Invalid UTF-8 is replaced, not rejected.
pub struct LineInput<B> {
    reader: B,
}

impl<B: BufRead> LineInput<B> {
    pub fn new(reader: B) -> Self {
        LineInput { reader }
    }
}

impl<B: BufRead> InputSource for LineInput<B> {
    fn next_token(&mut self) -> Result<String, GameError> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        // Bytes that are not UTF-8 still make a token, just not a valid option.
        let line = String::from_utf8_lossy(&line);
        Ok(line.split_whitespace().next().unwrap_or_default().to_string())
    }
}

/// A fixed list of answers, given out in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    tokens: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_token(&mut self) -> Result<String, GameError> {
        self.tokens.pop_front().ok_or(GameError::InputClosed)
    }
}

/// Hooks called by `Table` as a round unfolds. All of them default to doing nothing.
pub trait TableEventHandler {
    fn on_shuffle(&mut self, _shoe: &Shoe) {}
    fn on_player_turn(&mut self, _state: &GameState) {}
    fn on_invalid_option(&mut self, _input: &str) {}
    fn on_dealer_decision(&mut self, _dealer_hand: &Hand, _decision: Decision) {}
    fn on_round_end(&mut self, _round: u32, _summary: &RoundSummary) {}
    /// The round in progress was abandoned because the shoe is empty.
    fn on_deck_exhausted(&mut self, _stats: &SessionStats) {}
}

impl TableEventHandler for () {}

/// Tally of finished rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
}

impl SessionStats {
    pub fn record(&mut self, outcome: Outcome) {
        self.rounds += 1;
        if outcome.player_won() {
            self.wins += 1;
        } else if outcome.dealer_won() {
            self.losses += 1;
        } else {
            self.pushes += 1;
        }
    }
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rounds: {}. Wins: {}. Losses: {}. Pushes: {}.",
            self.rounds, self.wins, self.losses, self.pushes
        )
    }
}

/// Drives rounds of blackjack. The table owns the current `GameState` and is
/// the only place it gets replaced.
pub struct Table<R: Rng> {
    rule: Rule,
    rng: R,
    state: GameState,
    rounds_played: u32,
}

impl<R: Rng> Table<R> {
    /// Creates a table and shuffles its shoe.
    pub fn new(rule: Rule, mut rng: R) -> Self {
        let state = GameState::new().shuffle(rule.number_of_decks, &mut rng);
        Table {
            rule,
            rng,
            state,
            rounds_played: 0,
        }
    }

    /// Creates a table that deals from the given shoe until it needs reshuffling.
    pub fn with_shoe(rule: Rule, rng: R, shoe: Shoe) -> Self {
        Table {
            rule,
            rng,
            state: GameState::with_shoe(shoe),
            rounds_played: 0,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Plays up to `rounds` rounds. Stops early, without error, when the input
    /// closes or the shoe runs out in the middle of a round; that round is not
    /// counted.
    pub fn play_rounds<I: InputSource, H: TableEventHandler>(
        &mut self,
        rounds: u32,
        input: &mut I,
        handler: &mut H,
    ) -> Result<SessionStats, GameError> {
        let mut stats = SessionStats::default();
        for _ in 0..rounds {
            match self.play_round(input, handler) {
                Ok(summary) => stats.record(summary.outcome),
                Err(GameError::InputClosed) => {
                    info!("input closed after {} rounds", stats.rounds);
                    break;
                }
                Err(GameError::DeckExhausted) => {
                    warn!("shoe ran out after {} rounds", stats.rounds);
                    handler.on_deck_exhausted(&stats);
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(stats)
    }

    /// Deals, lets the player and then the dealer act, and settles the round.
    pub fn play_round<I: InputSource, H: TableEventHandler>(
        &mut self,
        input: &mut I,
        handler: &mut H,
    ) -> Result<RoundSummary, GameError> {
        self.reshuffle_if_necessary(handler);
        self.state = self.state.deal()?;

        while self.state.phase() == GamePhase::PlayerTurn {
            handler.on_player_turn(&self.state);
            let token = input.next_token()?;
            self.state = match token.parse::<Decision>() {
                Ok(Decision::Hit) => self.state.hit()?,
                Ok(Decision::Stand) => self.state.stand()?,
                Err(_) => {
                    debug!("invalid option {:?}", token);
                    handler.on_invalid_option(&token);
                    continue;
                }
            };
        }

        while self.state.phase() == GamePhase::DealerTurn {
            let decision = dealer_decision(self.state.dealer());
            handler.on_dealer_decision(self.state.dealer(), decision);
            self.state = match decision {
                Decision::Hit => self.state.hit()?,
                Decision::Stand => self.state.stand()?,
            };
        }

        let (state, summary) = self.state.end_hand()?;
        self.state = state;
        self.rounds_played += 1;
        handler.on_round_end(self.rounds_played, &summary);
        Ok(summary)
    }

    fn reshuffle_if_necessary<H: TableEventHandler>(&mut self, handler: &mut H) {
        if self.state.shoe().len() >= self.rule.reshuffle_threshold {
            return;
        }
        info!(
            "{} cards left in the shoe, reshuffling",
            self.state.shoe().len()
        );
        self.state = self.state.shuffle(self.rule.number_of_decks, &mut self.rng);
        handler.on_shuffle(self.state.shoe());
    }
}
