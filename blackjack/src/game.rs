use blackjack_macros::allowed_phase;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::hand::Hand;
use crate::shoe::Shoe;

/// Capacity hint for a freshly dealt hand.
const HAND_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    PlayerTurn,
    DealerTurn,
    HandOver,
}

impl GamePhase {
    /// The phase after this one. `HandOver` is terminal.
    pub fn next(self) -> GamePhase {
        match self {
            GamePhase::PlayerTurn => GamePhase::DealerTurn,
            GamePhase::DealerTurn | GamePhase::HandOver => GamePhase::HandOver,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    PlayerWin,
    DealerWin,
    Push,
}

impl Outcome {
    /// First match wins: player bust, dealer bust, higher score, push.
    pub fn determine(player_score: u32, dealer_score: u32) -> Outcome {
        if player_score > 21 {
            Outcome::PlayerBust
        } else if dealer_score > 21 {
            Outcome::DealerBust
        } else if player_score > dealer_score {
            Outcome::PlayerWin
        } else if dealer_score > player_score {
            Outcome::DealerWin
        } else {
            Outcome::Push
        }
    }

    pub fn player_won(self) -> bool {
        matches!(self, Outcome::DealerBust | Outcome::PlayerWin)
    }

    pub fn dealer_won(self) -> bool {
        matches!(self, Outcome::PlayerBust | Outcome::DealerWin)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Outcome::PlayerBust => "You busted",
            Outcome::DealerBust => "Dealer busted",
            Outcome::PlayerWin => "You win",
            Outcome::DealerWin => "You lose",
            Outcome::Push => "Push",
        };
        write!(f, "{}", message)
    }
}

/// Final hands and scores of a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub player_score: u32,
    pub dealer_score: u32,
    pub outcome: Outcome,
}

/// Everything about the round in progress. Transitions never modify a state;
/// each returns the state that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    shoe: Shoe,
    phase: GamePhase,
    player: Hand,
    dealer: Hand,
}

impl GameState {
    pub fn new() -> GameState {
        GameState::default()
    }

    /// A state that will deal from the given shoe.
    pub fn with_shoe(shoe: Shoe) -> GameState {
        GameState {
            shoe,
            ..GameState::default()
        }
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    /// The hand whose turn it is.
    ///
    /// # Panics
    ///
    /// Panics if called during `HandOver`, when it isn't anyone's turn.
    pub fn current_hand(&self) -> &Hand {
        match self.phase {
            GamePhase::PlayerTurn => &self.player,
            GamePhase::DealerTurn => &self.dealer,
            GamePhase::HandOver => panic!("it isn't currently any player's turn"),
        }
    }

    fn current_hand_mut(&mut self) -> &mut Hand {
        match self.phase {
            GamePhase::PlayerTurn => &mut self.player,
            GamePhase::DealerTurn => &mut self.dealer,
            GamePhase::HandOver => panic!("it isn't currently any player's turn"),
        }
    }

    /// Replaces the shoe with a freshly shuffled one. Hands and phase are kept.
    pub fn shuffle<R: Rng + ?Sized>(&self, number_of_decks: u8, rng: &mut R) -> GameState {
        let mut next = self.clone();
        next.shoe = Shoe::shuffled(number_of_decks, rng);
        info!("new shoe with {} cards", next.shoe.len());
        next
    }

    /// Clears both hands and deals two cards to each, player first, then
    /// hands the turn to the player.
    pub fn deal(&self) -> Result<GameState, GameError> {
        let mut next = self.clone();
        next.player = Hand::with_capacity(HAND_CAPACITY);
        next.dealer = Hand::with_capacity(HAND_CAPACITY);
        for _ in 0..2 {
            let card = next.shoe.draw()?;
            next.player.push(card);
            let card = next.shoe.draw()?;
            next.dealer.push(card);
        }
        next.phase = GamePhase::PlayerTurn;
        debug!(
            "dealt player [{}], dealer up card {}",
            next.player,
            next.dealer.cards()[0]
        );
        Ok(next)
    }

    /// Gives one card to the hand whose turn it is. A bust ends that turn.
    #[allowed_phase(PlayerTurn, DealerTurn)]
    pub fn hit(&self) -> Result<GameState, GameError> {
        let mut next = self.clone();
        let card = next.shoe.draw()?;
        let busted = {
            let hand = next.current_hand_mut();
            hand.push(card);
            hand.score() > 21
        };
        debug!("{:?} hits and draws {}", next.phase, card);
        if busted {
            return next.stand();
        }
        Ok(next)
    }

    /// Ends the current turn.
    #[allowed_phase(PlayerTurn, DealerTurn)]
    pub fn stand(&self) -> Result<GameState, GameError> {
        let mut next = self.clone();
        next.phase = next.phase.next();
        debug!("{:?} stands, moving to {:?}", self.phase, next.phase);
        Ok(next)
    }

    /// Scores the finished round and clears both hands. Phase and shoe are
    /// carried over; the next `deal` resets the phase.
    #[allowed_phase(HandOver)]
    pub fn end_hand(&self) -> Result<(GameState, RoundSummary), GameError> {
        let player_score = self.player.score();
        let dealer_score = self.dealer.score();
        let outcome = Outcome::determine(player_score, dealer_score);
        info!(
            "round over: player {}, dealer {}: {}",
            player_score, dealer_score, outcome
        );

        let mut next = self.clone();
        let summary = RoundSummary {
            player_hand: std::mem::take(&mut next.player),
            dealer_hand: std::mem::take(&mut next.dealer),
            player_score,
            dealer_score,
            outcome,
        };
        Ok((next, summary))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::card::{Card, Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Diamonds)
    }

    fn stacked(ranks: &[Rank]) -> GameState {
        GameState::with_shoe(Shoe::from_cards(ranks.iter().map(|&rank| card(rank))))
    }

    #[test]
    fn phases_only_move_forward() {
        assert_eq!(GamePhase::default(), GamePhase::PlayerTurn);
        assert_eq!(GamePhase::PlayerTurn.next(), GamePhase::DealerTurn);
        assert_eq!(GamePhase::DealerTurn.next(), GamePhase::HandOver);
        assert_eq!(GamePhase::HandOver.next(), GamePhase::HandOver);
    }

    #[test]
    fn shuffle_replaces_the_whole_shoe() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = stacked(&[Rank::Two, Rank::Three]);
        let shuffled = state.shuffle(3, &mut rng);
        assert_eq!(shuffled.shoe().len(), 156);
        assert_eq!(state.shoe().len(), 2);
    }

    #[test]
    fn deal_gives_two_cards_each_alternately() {
        let state = stacked(&[
            Rank::Ace,
            Rank::Two,
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
        ]);
        let dealt = state.deal().unwrap();

        assert_eq!(dealt.phase(), GamePhase::PlayerTurn);
        assert_eq!(dealt.player().cards(), &[card(Rank::Ace), card(Rank::Three)]);
        assert_eq!(dealt.dealer().cards(), &[card(Rank::Two), card(Rank::Four)]);
        assert_eq!(dealt.shoe().len(), state.shoe().len() - 4);
        let rest: Vec<Card> = dealt.shoe().iter().copied().collect();
        assert_eq!(rest, vec![card(Rank::Five), card(Rank::Six)]);
    }

    #[test]
    fn deal_leaves_input_state_untouched() {
        let state = stacked(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four]);
        let before = state.clone();
        let _ = state.deal().unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn deal_discards_previous_hands() {
        let state = stacked(&[Rank::Ten; 9]);
        let dealt = state.deal().unwrap().hit().unwrap();
        assert_eq!(dealt.player().len(), 3);
        let redealt = dealt.deal().unwrap();
        assert_eq!(redealt.player().len(), 2);
        assert_eq!(redealt.dealer().len(), 2);
    }

    #[test]
    fn deal_from_short_shoe_is_an_error() {
        let state = stacked(&[Rank::Ace, Rank::Two, Rank::Three]);
        assert!(matches!(state.deal(), Err(GameError::DeckExhausted)));
    }

    #[test]
    fn hit_goes_to_the_current_hand() {
        let state = stacked(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]);
        let dealt = state.deal().unwrap();

        let player_hit = dealt.hit().unwrap();
        assert_eq!(player_hit.player().len(), 3);
        assert_eq!(player_hit.dealer().len(), 2);
        assert_eq!(player_hit.phase(), GamePhase::PlayerTurn);

        let dealer_hit = player_hit.stand().unwrap().hit().unwrap();
        assert_eq!(dealer_hit.player().len(), 3);
        assert_eq!(dealer_hit.dealer().len(), 3);
        assert_eq!(dealer_hit.phase(), GamePhase::DealerTurn);
        assert_eq!(dealer_hit.current_hand(), dealer_hit.dealer());
    }

    #[test]
    fn bust_on_hit_acts_like_stand() {
        let state = stacked(&[Rank::King, Rank::Two, Rank::Queen, Rank::Three, Rank::Five]);
        let dealt = state.deal().unwrap();
        let busted = dealt.hit().unwrap();

        assert!(busted.player().is_bust());
        assert_eq!(busted.phase(), GamePhase::DealerTurn);
        assert_eq!(busted.phase(), dealt.stand().unwrap().phase());
    }

    #[test]
    fn dealer_bust_ends_the_hand() {
        let state = stacked(&[
            Rank::Two,
            Rank::King,
            Rank::Three,
            Rank::Six,
            Rank::Nine,
        ]);
        let busted = state.deal().unwrap().stand().unwrap().hit().unwrap();
        assert_eq!(busted.dealer().score(), 25);
        assert_eq!(busted.phase(), GamePhase::HandOver);
    }

    #[test]
    fn hit_from_empty_shoe_is_an_error() {
        let dealt = stacked(&[Rank::Two; 4]).deal().unwrap();
        assert!(matches!(dealt.hit(), Err(GameError::DeckExhausted)));
    }

    #[test]
    fn transitions_are_guarded_by_phase() {
        let over = stacked(&[Rank::Two; 4])
            .deal()
            .unwrap()
            .stand()
            .unwrap()
            .stand()
            .unwrap();
        assert_eq!(over.phase(), GamePhase::HandOver);
        assert!(matches!(
            over.hit(),
            Err(GameError::PhaseViolation {
                action: "hit",
                phase: GamePhase::HandOver
            })
        ));
        assert!(matches!(over.stand(), Err(GameError::PhaseViolation { .. })));

        let dealt = stacked(&[Rank::Two; 4]).deal().unwrap();
        assert!(matches!(
            dealt.end_hand(),
            Err(GameError::PhaseViolation {
                action: "end_hand",
                phase: GamePhase::PlayerTurn
            })
        ));
    }

    #[test]
    #[should_panic(expected = "it isn't currently any player's turn")]
    fn current_hand_panics_when_hand_is_over() {
        let over = stacked(&[Rank::Two; 4])
            .deal()
            .unwrap()
            .stand()
            .unwrap()
            .stand()
            .unwrap();
        over.current_hand();
    }

    #[test]
    fn outcome_priority() {
        assert_eq!(Outcome::determine(21, 20), Outcome::PlayerWin);
        assert_eq!(Outcome::determine(22, 18), Outcome::PlayerBust);
        assert_eq!(Outcome::determine(19, 19), Outcome::Push);
        assert_eq!(Outcome::determine(17, 24), Outcome::DealerBust);
        assert_eq!(Outcome::determine(18, 20), Outcome::DealerWin);
        // both bust: the player busted first
        assert_eq!(Outcome::determine(23, 25), Outcome::PlayerBust);
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(Outcome::PlayerBust.to_string(), "You busted");
        assert_eq!(Outcome::DealerBust.to_string(), "Dealer busted");
        assert_eq!(Outcome::PlayerWin.to_string(), "You win");
        assert_eq!(Outcome::DealerWin.to_string(), "You lose");
        assert_eq!(Outcome::Push.to_string(), "Push");
        assert!(Outcome::DealerBust.player_won());
        assert!(Outcome::PlayerBust.dealer_won());
        assert!(!Outcome::Push.player_won() && !Outcome::Push.dealer_won());
    }

    #[test]
    fn end_hand_reports_and_clears_hands() {
        let state = stacked(&[Rank::Ace, Rank::Ten, Rank::King, Rank::Queen, Rank::Four]);
        let over = state
            .deal()
            .unwrap()
            .stand()
            .unwrap()
            .stand()
            .unwrap();
        let (next, summary) = over.end_hand().unwrap();

        assert_eq!(summary.player_score, 21);
        assert_eq!(summary.dealer_score, 20);
        assert_eq!(summary.outcome, Outcome::PlayerWin);
        assert_eq!(summary.player_hand.len(), 2);
        assert!(next.player().is_empty());
        assert!(next.dealer().is_empty());
        assert_eq!(next.phase(), GamePhase::HandOver);
        assert_eq!(next.shoe(), over.shoe());
    }

    #[test]
    fn ten_deals_from_a_fresh_three_deck_shoe() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut state = GameState::new().shuffle(3, &mut rng);
        let mut remaining = state.shoe().len();
        for _ in 0..10 {
            state = state.deal().unwrap();
            while state.phase() == GamePhase::PlayerTurn && state.player().score() < 17 {
                state = state.hit().unwrap();
            }
            if state.phase() == GamePhase::PlayerTurn {
                state = state.stand().unwrap();
            }
            while state.phase() == GamePhase::DealerTurn {
                state = state.stand().unwrap();
            }
            let (next, _) = state.end_hand().unwrap();
            assert!(next.shoe().len() < remaining);
            remaining = next.shoe().len();
            state = next;
        }
        assert!(remaining >= 156 - 10 * 12);
    }
}
