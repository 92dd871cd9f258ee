use crate::game::card::{Card, RANKS, SUITS};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// The combined multi-deck card supply for a session. Cards are dealt from the
/// tail; when the shoe runs dry it is rebuilt at full size and reshuffled
/// before the draw proceeds, so drawing never fails.
pub struct Shoe {
    cards: Vec<Card>,
    num_decks: usize,
    rng: StdRng,
}

/// The result of a single draw. `reshuffled` is set when the draw forced the
/// shoe to be rebuilt, an observable event rather than a silent recovery.
#[derive(Debug, Clone, Copy)]
pub struct DrawnCard {
    pub card: Card,
    pub reshuffled: bool,
}

impl Shoe {
    /// Associated function for creating a shuffled shoe of `num_decks`
    /// standard 52-card decks.
    pub fn new(num_decks: usize) -> Shoe {
        Shoe::with_rng(num_decks, StdRng::from_entropy())
    }

    /// Associated function for creating a shoe with a seeded shuffle, for
    /// reproducible sessions.
    pub fn seeded(num_decks: usize, seed: u64) -> Shoe {
        Shoe::with_rng(num_decks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(num_decks: usize, rng: StdRng) -> Shoe {
        let mut shoe = Shoe {
            cards: Vec::with_capacity(num_decks * 52),
            num_decks,
            rng,
        };
        shoe.rebuild();
        shoe
    }

    /// Rebuilds the shoe to its full `num_decks * 52` size and shuffles it.
    fn rebuild(&mut self) {
        self.cards.clear();
        for _ in 0..self.num_decks {
            for suit in SUITS {
                for rank in RANKS {
                    self.cards.push(Card::new(suit, rank));
                }
            }
        }
        self.cards.shuffle(&mut self.rng);
    }

    /// Method for drawing the next card. An empty shoe is rebuilt and
    /// reshuffled first, and the returned `DrawnCard` reports that.
    pub fn draw(&mut self) -> DrawnCard {
        let reshuffled = self.cards.is_empty();
        if reshuffled {
            self.rebuild();
            tracing::info!(
                num_decks = self.num_decks,
                "shoe exhausted, rebuilt and reshuffled"
            );
        }
        let card = self.cards.pop().expect("a freshly built shoe is never empty");
        DrawnCard { card, reshuffled }
    }

    /// Getter for the number of cards left in the shoe.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    /// Builds a shoe that deals `cards` in the given order before falling back
    /// to a reshuffle. Test scaffolding for deterministic rounds.
    #[cfg(test)]
    pub(crate) fn stacked(num_decks: usize, mut cards: Vec<Card>) -> Shoe {
        cards.reverse();
        Shoe {
            cards,
            num_decks,
            rng: StdRng::seed_from_u64(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Rank, Suit};
    use crate::game::count;

    #[test]
    fn new_shoe_holds_num_decks_times_fifty_two() {
        let shoe = Shoe::new(8);
        assert_eq!(shoe.remaining(), 8 * 52);
    }

    #[test]
    fn drawing_removes_one_card() {
        let mut shoe = Shoe::new(1);
        let drawn = shoe.draw();
        assert!(!drawn.reshuffled);
        assert_eq!(shoe.remaining(), 51);
    }

    #[test]
    fn draw_on_empty_shoe_reshuffles_and_still_deals() {
        let mut shoe = Shoe::seeded(1, 7);
        for _ in 0..52 {
            assert!(!shoe.draw().reshuffled);
        }
        assert_eq!(shoe.remaining(), 0);

        let drawn = shoe.draw();
        assert!(drawn.reshuffled);
        assert_eq!(shoe.remaining(), 52 - 1);
    }

    #[test]
    fn full_shoe_runs_the_count_back_to_zero() {
        let mut shoe = Shoe::seeded(6, 42);
        let mut running = 0;
        for _ in 0..6 * 52 {
            running = count::update(shoe.draw().card, running);
        }
        assert_eq!(running, 0);
    }

    #[test]
    fn seeded_shoes_deal_identically() {
        let mut a = Shoe::seeded(2, 99);
        let mut b = Shoe::seeded(2, 99);
        for _ in 0..40 {
            assert_eq!(a.draw().card, b.draw().card);
        }
    }

    #[test]
    fn stacked_shoe_deals_in_listed_order() {
        let first = Card::new(Suit::Hearts, Rank::Ace);
        let second = Card::new(Suit::Clubs, Rank::Two);
        let mut shoe = Shoe::stacked(1, vec![first, second]);
        assert_eq!(shoe.draw().card, first);
        assert_eq!(shoe.draw().card, second);
    }
}
