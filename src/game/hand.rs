use crate::game::card::{Card, Rank};
use std::fmt::Display;

/// A hand of cards with its best blackjack valuation tracked incrementally.
/// Every ace enters the total at 11; whenever the total busts and a soft ace
/// remains, one ace is demoted by 10. `soft_aces` is the number of aces still
/// counted as 11.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    value: u8,
    soft_aces: u8,
}

impl Hand {
    /// Associated function for creating a new, empty hand.
    pub fn new() -> Hand {
        Hand {
            cards: Vec::new(),
            value: 0,
            soft_aces: 0,
        }
    }

    /// Method for adding a card to the hand, updating the running valuation.
    pub fn add(&mut self, card: Card) {
        self.value += card.rank.value();
        if card.rank == Rank::Ace {
            self.soft_aces += 1;
        }
        while self.value > 21 && self.soft_aces > 0 {
            self.value -= 10;
            self.soft_aces -= 1;
        }
        self.cards.push(card);
    }

    /// Getter for the cards in the hand, in the order they were dealt.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Getter for the best valuation of the hand.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns true if at least one ace is still counted as 11.
    pub fn is_soft(&self) -> bool {
        self.soft_aces > 0
    }

    /// Returns true if the total would be unchanged with every ace valued at 1.
    /// Gates double-down eligibility.
    pub fn is_hard(&self) -> bool {
        self.soft_aces == 0
    }

    pub fn is_bust(&self) -> bool {
        self.value > 21
    }

    /// Returns true iff the hand is a natural: 21 from exactly two cards.
    pub fn is_blackjack(&self) -> bool {
        self.value == 21 && self.cards.len() == 2
    }

    /// Returns true iff the hand is exactly two cards of identical rank.
    /// Equal values of different rank (king and queen, say) do not qualify.
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns true if the hand contains an ace, regardless of how it is
    /// currently valued. The strategy table keys its soft rows off this.
    pub fn has_ace(&self) -> bool {
        self.cards.iter().any(|c| c.rank == Rank::Ace)
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "{} (Value: {})", cards, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Suit, RANKS};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.add(Card::new(Suit::Spades, rank));
        }
        hand
    }

    #[test]
    fn ace_counts_as_eleven_until_it_busts() {
        let hand = hand_of(&[Rank::Ace, Rank::Six]);
        assert_eq!(hand.value(), 17);
        assert!(hand.is_soft());

        let hand = hand_of(&[Rank::Ace, Rank::Six, Rank::Ten]);
        assert_eq!(hand.value(), 17);
        assert!(hand.is_hard());
    }

    #[test]
    fn two_aces_make_a_soft_twelve() {
        let hand = hand_of(&[Rank::Ace, Rank::Ace]);
        assert_eq!(hand.value(), 12);
        assert!(hand.is_soft());
        assert_eq!(hand.soft_aces, 1);
    }

    #[test]
    fn busted_hand_values_all_aces_at_one() {
        let hand = hand_of(&[Rank::Ace, Rank::Ace, Rank::King, Rank::Queen, Rank::Two]);
        assert_eq!(hand.value(), 24);
        assert!(hand.is_bust());
        assert_eq!(hand.soft_aces, 0);
    }

    #[test]
    fn final_value_is_independent_of_deal_order() {
        let orders: [[Rank; 3]; 3] = [
            [Rank::Ace, Rank::Four, Rank::King],
            [Rank::King, Rank::Ace, Rank::Four],
            [Rank::Four, Rank::King, Rank::Ace],
        ];
        for order in orders {
            let hand = hand_of(&order);
            assert_eq!(hand.value(), 15);
            assert_eq!(hand.soft_aces, 0);
        }
    }

    #[test]
    fn blackjack_requires_exactly_two_cards() {
        assert!(hand_of(&[Rank::Ace, Rank::King]).is_blackjack());
        assert!(!hand_of(&[Rank::Seven, Rank::Seven, Rank::Seven]).is_blackjack());
    }

    #[test]
    fn split_requires_a_pair_by_rank() {
        assert!(hand_of(&[Rank::Eight, Rank::Eight]).can_split());
        assert!(!hand_of(&[Rank::King, Rank::Queen]).can_split());
        assert!(!hand_of(&[Rank::Eight, Rank::Eight, Rank::Eight]).can_split());
    }

    #[test]
    fn value_never_undershoots_the_best_achievable() {
        // Every single-card hand values the card at face value.
        for &rank in RANKS.iter() {
            let hand = hand_of(&[rank]);
            assert_eq!(hand.value(), rank.value());
        }
    }
}
