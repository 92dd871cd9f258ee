use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;

/// The four suits of a standard deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

/// The thirteen ranks of a standard deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

pub const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

lazy_static! {
    /// Lookup table mapping each rank to its blackjack value, aces counted as 11.
    pub static ref VALUES: HashMap<Rank, u8> = HashMap::from([
        (Rank::Two, 2),
        (Rank::Three, 3),
        (Rank::Four, 4),
        (Rank::Five, 5),
        (Rank::Six, 6),
        (Rank::Seven, 7),
        (Rank::Eight, 8),
        (Rank::Nine, 9),
        (Rank::Ten, 10),
        (Rank::Jack, 10),
        (Rank::Queen, 10),
        (Rank::King, 10),
        (Rank::Ace, 11),
    ]);

    /// Lookup table mapping each rank to its Hi-Lo count value.
    pub static ref COUNT_VALUES: HashMap<Rank, i32> = HashMap::from([
        (Rank::Two, 1),
        (Rank::Three, 1),
        (Rank::Four, 1),
        (Rank::Five, 1),
        (Rank::Six, 1),
        (Rank::Seven, 0),
        (Rank::Eight, 0),
        (Rank::Nine, 0),
        (Rank::Ten, -1),
        (Rank::Jack, -1),
        (Rank::Queen, -1),
        (Rank::King, -1),
        (Rank::Ace, -1),
    ]);
}

impl Rank {
    /// Getter for the blackjack value of the rank. Aces are counted as 11 here,
    /// demoting an ace to 1 is the hand's job.
    pub fn value(self) -> u8 {
        VALUES[&self]
    }

    /// Getter for the Hi-Lo count value of the rank.
    pub fn count_value(self) -> i32 {
        COUNT_VALUES[&self]
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        };
        write!(f, "{}", name)
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
        };
        write!(f, "{}", name)
    }
}

/// A single playing card. Cards carry no identity beyond their suit and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Card {
        Card { suit, rank }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_cards_are_worth_ten() {
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 10);
        assert_eq!(Rank::Queen.value(), 10);
        assert_eq!(Rank::King.value(), 10);
        assert_eq!(Rank::Ace.value(), 11);
    }

    #[test]
    fn count_values_sum_to_zero_over_one_deck() {
        let total: i32 = RANKS.iter().map(|r| r.count_value()).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn cards_compare_by_suit_and_rank() {
        let a = Card::new(Suit::Hearts, Rank::Ace);
        let b = Card::new(Suit::Hearts, Rank::Ace);
        assert_eq!(a, b);
        assert_ne!(a, Card::new(Suit::Spades, Rank::Ace));
    }

    #[test]
    fn display_reads_rank_of_suit() {
        let card = Card::new(Suit::Spades, Rank::Queen);
        assert_eq!(card.to_string(), "Queen of Spades");
    }
}
