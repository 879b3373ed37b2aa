use blackjack::{GameState, Outcome, RoundSummary, SessionStats, Shoe, TableEventHandler};

/// Prints the game to stdout.
#[derive(Debug, Clone)]
pub struct Terminal {
    total_rounds: u32,
}

impl Terminal {
    pub fn new(total_rounds: u32) -> Self {
        Terminal { total_rounds }
    }

    /// Whether another round follows `round`.
    fn has_next_game(&self, round: u32) -> bool {
        round < self.total_rounds
    }
}

impl TableEventHandler for Terminal {
    fn on_shuffle(&mut self, shoe: &Shoe) {
        println!("---RESHUFFLING ({} cards)---", shoe.len());
        println!();
    }

    fn on_player_turn(&mut self, state: &GameState) {
        println!("{}", render_player_turn(state));
    }

    fn on_invalid_option(&mut self, input: &str) {
        println!("Invalid option: {}", input);
    }

    fn on_round_end(&mut self, round: u32, summary: &RoundSummary) {
        println!("{}", render_summary(summary));
        if self.has_next_game(round) {
            println!();
            println!("---NEW GAME---");
        }
    }

    fn on_deck_exhausted(&mut self, stats: &SessionStats) {
        println!();
        println!(
            "---OUT OF CARDS: game over after {} rounds---",
            stats.rounds
        );
    }
}

/// The player's hand and score, the dealer's up card, and the prompt.
pub fn render_player_turn(state: &GameState) -> String {
    format!(
        "Player: {}\nScore: {}\nDealer: {}\nWhat will you do? (h)it, (s)tand\n",
        state.player(),
        state.player().score(),
        state.dealer().dealer_display()
    )
}

pub fn render_summary(summary: &RoundSummary) -> String {
    let banner = match summary.outcome {
        Outcome::Push => format!("-----{}-----", summary.outcome),
        outcome => format!("-----{}!!!-----", outcome),
    };
    format!(
        "---FINAL HANDS---\n\nPlayer: {}\nScore: {}\n\nDealer: {}\nScore: {}\n\n{}",
        summary.player_hand,
        summary.player_score,
        summary.dealer_hand,
        summary.dealer_score,
        banner
    )
}
