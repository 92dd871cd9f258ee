//! Hi-Lo card counting. The tracker owns no state of its own, the caller
//! threads the running count through `update` as cards are drawn.

use crate::game::card::Card;
use serde::Serialize;

/// Coarse favorability classification of the true count, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountBand {
    Favorable,
    Neutral,
    Unfavorable,
}

/// Returns the running count after seeing `card`: +1 for two through six,
/// 0 for seven through nine, -1 for tens, faces and aces.
pub fn update(card: Card, running_count: i32) -> i32 {
    running_count + card.rank.count_value()
}

/// The running count normalized by decks remaining. Defined as the running
/// count itself when the shoe is empty.
pub fn true_count(running_count: i32, cards_remaining: usize) -> f32 {
    if cards_remaining == 0 {
        return running_count as f32;
    }
    let decks_remaining = cards_remaining as f32 / 52.0;
    running_count as f32 / decks_remaining
}

/// Classifies a true count: above +1 favors the player, below -1 favors the
/// house, anything between is neutral.
pub fn classify(true_count: f32) -> CountBand {
    if true_count > 1.0 {
        CountBand::Favorable
    } else if true_count < -1.0 {
        CountBand::Unfavorable
    } else {
        CountBand::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Rank, Suit, RANKS};

    #[test]
    fn low_cards_raise_the_count_and_high_cards_lower_it() {
        let mut running = 0;
        running = update(Card::new(Suit::Hearts, Rank::Two), running);
        running = update(Card::new(Suit::Hearts, Rank::Six), running);
        assert_eq!(running, 2);
        running = update(Card::new(Suit::Hearts, Rank::Eight), running);
        assert_eq!(running, 2);
        running = update(Card::new(Suit::Hearts, Rank::King), running);
        running = update(Card::new(Suit::Hearts, Rank::Ace), running);
        assert_eq!(running, 0);
    }

    #[test]
    fn one_full_deck_counts_back_to_zero() {
        let mut running = 0;
        for &rank in RANKS.iter() {
            for suit in crate::game::card::SUITS {
                running = update(Card::new(suit, rank), running);
            }
        }
        assert_eq!(running, 0);
    }

    #[test]
    fn true_count_normalizes_by_decks_remaining() {
        // +4 with two decks (104 cards) left is a true count of +2.
        assert_eq!(true_count(4, 104), 2.0);
        // Half a deck left doubles the weight of the running count.
        assert_eq!(true_count(3, 26), 6.0);
    }

    #[test]
    fn true_count_of_empty_shoe_is_the_running_count() {
        assert_eq!(true_count(5, 0), 5.0);
        assert_eq!(true_count(-3, 0), -3.0);
    }

    #[test]
    fn classification_bands() {
        assert_eq!(classify(1.5), CountBand::Favorable);
        assert_eq!(classify(1.0), CountBand::Neutral);
        assert_eq!(classify(-1.0), CountBand::Neutral);
        assert_eq!(classify(-1.2), CountBand::Unfavorable);
    }
}
