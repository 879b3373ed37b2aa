use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use crate::hand::Hand;

/// What a party does on its turn. Parses from the prompt tokens `h` and `s`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Serialize, Deserialize)]
pub enum Decision {
    #[strum(serialize = "h")]
    Hit,
    #[strum(serialize = "s")]
    Stand,
}

/// House rule: the dealer hits 16 or less and hits soft 17.
pub fn dealer_decision(hand: &Hand) -> Decision {
    let score = hand.score();
    if score <= 16 || (score == 17 && hand.min_score() != 17) {
        Decision::Hit
    } else {
        Decision::Stand
    }
}
