//! The round engine: one betting round from deal to settlement, driven by an
//! input collaborator for decisions and an event sink for observability.

use crate::events::{Event, EventSink};
use crate::game::card::{Card, Rank};
use crate::game::count::{self, CountBand};
use crate::game::hand::Hand;
use crate::game::shoe::Shoe;
use crate::game::strategy::{self, Action};
use crate::game::{GameError, PlayerInput};
use crate::session::{Outcome, Session};

/// Splitting may grow the hand list to at most this many hands.
pub const MAX_HANDS: usize = 4;

/// The actions currently legal for a hand. Hit and stand are always legal;
/// doubling and splitting are gated by the hand shape and the bankroll.
#[derive(Debug, Clone, Copy)]
pub struct LegalActions {
    pub double_down: bool,
    pub split: bool,
}

impl LegalActions {
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Hit | Action::Stand => true,
            Action::DoubleDown => self.double_down,
            Action::Split => self.split,
        }
    }
}

/// Everything the input collaborator gets to see when asked for a play.
pub struct TurnView<'a> {
    pub hand_index: usize,
    pub hands_in_play: usize,
    pub hand: &'a Hand,
    pub dealer_upcard: Card,
    pub stake: f32,
    pub bankroll: f32,
    pub legal: LegalActions,
}

/// Snapshot of the Hi-Lo state, for display between rounds.
#[derive(Debug, Clone, Copy)]
pub struct CountInfo {
    pub running_count: i32,
    pub true_count: f32,
    pub band: CountBand,
    pub cards_remaining: usize,
}

/// A single blackjack table. The shoe and the running count persist across
/// rounds for the life of the session; hands and stakes are rebuilt every
/// round. `hands` and `stakes` are parallel, a split inserts into both.
pub struct Table {
    shoe: Shoe,
    dealer: Hand,
    hands: Vec<Hand>,
    stakes: Vec<f32>,
    running_count: i32,
}

impl Table {
    /// Associated function for opening a table over a fresh `num_decks` shoe.
    pub fn new(num_decks: usize) -> Table {
        Table::with_shoe(Shoe::new(num_decks))
    }

    /// Associated function for opening a table with a seeded shoe, for
    /// reproducible sessions.
    pub fn seeded(num_decks: usize, seed: u64) -> Table {
        Table::with_shoe(Shoe::seeded(num_decks, seed))
    }

    fn with_shoe(shoe: Shoe) -> Table {
        Table {
            shoe,
            dealer: Hand::new(),
            hands: Vec::new(),
            stakes: Vec::new(),
            running_count: 0,
        }
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    pub fn cards_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    /// Getter for the current Hi-Lo snapshot.
    pub fn count_info(&self) -> CountInfo {
        let true_count = count::true_count(self.running_count, self.shoe.remaining());
        CountInfo {
            running_count: self.running_count,
            true_count,
            band: count::classify(true_count),
            cards_remaining: self.shoe.remaining(),
        }
    }

    /// The count snapshot as an emittable event.
    pub fn count_event(&self) -> Event {
        let info = self.count_info();
        Event::CountInfo {
            running_count: info.running_count,
            true_count: info.true_count,
            band: info.band,
            cards_remaining: info.cards_remaining,
        }
    }

    /// Plays one betting round: deal, insurance, blackjack checks, the player
    /// action loop, dealer play and settlement. `bet` is expected to be
    /// pre-validated by the caller; it is checked again here and an invalid
    /// amount is refused before any state changes.
    pub fn play_round<I, E>(
        &mut self,
        session: &mut Session,
        bet: f32,
        input: &mut I,
        sink: &mut E,
    ) -> Result<(), GameError>
    where
        I: PlayerInput + ?Sized,
        E: EventSink + ?Sized,
    {
        if bet <= 0.0 {
            return Err(GameError::InvalidBet(bet));
        }
        if bet > session.bankroll() {
            return Err(GameError::InsufficientBankroll {
                required: bet,
                available: session.bankroll(),
            });
        }

        self.hands.clear();
        self.hands.push(Hand::new());
        self.stakes.clear();
        self.stakes.push(bet);
        self.dealer = Hand::new();

        session.debit(bet);
        sink.emit(Event::RoundStarted {
            bet,
            bankroll: session.bankroll(),
        });

        // Initial deal, two cards each, alternating player and dealer. The
        // dealer's second card goes down unseen but still updates the count.
        for deal in 0..2 {
            let card = self.draw_counted(sink);
            self.hands[0].add(card);
            sink.emit(Event::PlayerCard {
                hand: 0,
                card,
                total: self.hands[0].value(),
            });

            let card = self.draw_counted(sink);
            self.dealer.add(card);
            if deal == 0 {
                sink.emit(Event::DealerUpcard { card });
            } else {
                sink.emit(Event::DealerHoleCard);
            }
        }

        // Insurance is offered only on a dealer ace showing, for half the
        // original bet. It settles before any double or split ever runs.
        let mut insurance = 0.0_f32;
        if self.dealer.cards()[0].rank == Rank::Ace && input.take_insurance(bet) {
            insurance = bet / 2.0;
            session.debit(insurance);
            sink.emit(Event::InsurancePlaced { amount: insurance });
        }

        // Dealer blackjack ends the round before any player action.
        if self.dealer.is_blackjack() {
            self.reveal_dealer(sink);
            sink.emit(Event::DealerBlackjack);
            if insurance > 0.0 {
                let payout = insurance * 3.0;
                session.credit(payout);
                sink.emit(Event::InsurancePaid { amount: payout });
            }
            if self.hands[0].is_blackjack() {
                self.settle_hand(session, sink, 0, Outcome::Push, bet);
            } else {
                self.settle_hand(session, sink, 0, Outcome::Loss, 0.0);
            }
            self.complete_round(session, sink);
            return Ok(());
        }
        if insurance > 0.0 {
            sink.emit(Event::InsuranceLost { amount: insurance });
        }

        // Player blackjack against a non-blackjack dealer pays 3:2.
        if self.hands[0].is_blackjack() {
            self.reveal_dealer(sink);
            sink.emit(Event::PlayerBlackjack { payout: bet * 2.5 });
            self.settle_hand(session, sink, 0, Outcome::Win, bet * 2.5);
            self.complete_round(session, sink);
            return Ok(());
        }

        // The hand list may grow mid-loop: a split inserts the new hand and
        // stake right after the current position, the cursor reaches it once
        // the current hand's turn ends. A turn ends exactly once, on stand,
        // bust or double-down.
        let dealer_upcard = self.dealer.cards()[0];
        let mut idx = 0;
        while idx < self.hands.len() {
            let mut finished = false;
            while !finished && !self.hands[idx].is_bust() {
                let legal = self.legal_actions(idx, session.bankroll());
                let suggestion = strategy::suggest(&self.hands[idx], dealer_upcard, legal.split);
                sink.emit(Event::Advice {
                    hand: idx,
                    total: self.hands[idx].value(),
                    strength: strategy::hand_strength(&self.hands[idx]),
                    action: suggestion.action,
                    rationale: suggestion.rationale,
                });
                sink.emit(self.count_event());

                let choice = {
                    let view = TurnView {
                        hand_index: idx,
                        hands_in_play: self.hands.len(),
                        hand: &self.hands[idx],
                        dealer_upcard,
                        stake: self.stakes[idx],
                        bankroll: session.bankroll(),
                        legal,
                    };
                    input.action(&view)
                };

                match self.apply_action(idx, choice, legal, session, sink) {
                    Ok(done) => finished = done,
                    Err(GameError::InvalidAction { action }) => {
                        sink.emit(Event::ActionRejected { hand: idx, action });
                    }
                    Err(e) => return Err(e),
                }
            }
            idx += 1;
        }

        // Dealer plays out to 17, standing on all 17s.
        self.reveal_dealer(sink);
        while self.dealer.value() < 17 {
            let card = self.draw_counted(sink);
            self.dealer.add(card);
            sink.emit(Event::DealerCard {
                card,
                total: self.dealer.value(),
            });
        }
        if self.dealer.is_bust() {
            sink.emit(Event::DealerBusted {
                total: self.dealer.value(),
            });
        } else {
            sink.emit(Event::DealerStood {
                total: self.dealer.value(),
            });
        }

        // Price every hand independently against the dealer's final total.
        let dealer_total = self.dealer.value();
        for idx in 0..self.hands.len() {
            let stake = self.stakes[idx];
            let total = self.hands[idx].value();
            let (outcome, returned) = if total > 21 {
                (Outcome::Loss, 0.0)
            } else if dealer_total > 21 || total > dealer_total {
                (Outcome::Win, stake * 2.0)
            } else if total < dealer_total {
                (Outcome::Loss, 0.0)
            } else {
                (Outcome::Push, stake)
            };
            self.settle_hand(session, sink, idx, outcome, returned);
        }
        self.complete_round(session, sink);
        Ok(())
    }

    /// Draws one card, surfacing a reshuffle and feeding the running count.
    fn draw_counted<E: EventSink + ?Sized>(&mut self, sink: &mut E) -> Card {
        let drawn = self.shoe.draw();
        if drawn.reshuffled {
            sink.emit(Event::Reshuffled {
                remaining: self.shoe.remaining(),
            });
        }
        self.running_count = count::update(drawn.card, self.running_count);
        drawn.card
    }

    fn reveal_dealer<E: EventSink + ?Sized>(&self, sink: &mut E) {
        sink.emit(Event::DealerReveal {
            card: self.dealer.cards()[1],
            total: self.dealer.value(),
        });
    }

    /// Computes the legal set for the hand at `idx`. Recomputed before every
    /// action request, so a hit withdraws the double-down offer.
    fn legal_actions(&self, idx: usize, bankroll: f32) -> LegalActions {
        let hand = &self.hands[idx];
        let stake = self.stakes[idx];
        LegalActions {
            double_down: hand.cards().len() == 2
                && hand.is_hard()
                && matches!(hand.value(), 9..=11)
                && bankroll >= stake,
            split: hand.can_split() && self.hands.len() < MAX_HANDS && bankroll >= stake,
        }
    }

    /// Applies one action to the hand at `idx`. Returns whether the hand's
    /// turn is now over. An illegal request mutates nothing.
    fn apply_action<E: EventSink + ?Sized>(
        &mut self,
        idx: usize,
        action: Action,
        legal: LegalActions,
        session: &mut Session,
        sink: &mut E,
    ) -> Result<bool, GameError> {
        if !legal.allows(action) {
            return Err(GameError::InvalidAction { action });
        }
        match action {
            Action::Hit => {
                let card = self.draw_counted(sink);
                self.hands[idx].add(card);
                sink.emit(Event::PlayerCard {
                    hand: idx,
                    card,
                    total: self.hands[idx].value(),
                });
                if self.hands[idx].is_bust() {
                    sink.emit(Event::HandBusted {
                        hand: idx,
                        total: self.hands[idx].value(),
                    });
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Action::Stand => {
                sink.emit(Event::HandStood {
                    hand: idx,
                    total: self.hands[idx].value(),
                });
                Ok(true)
            }
            Action::DoubleDown => {
                let stake = self.stakes[idx];
                session.debit(stake);
                self.stakes[idx] = stake * 2.0;
                sink.emit(Event::DoubledDown {
                    hand: idx,
                    stake: self.stakes[idx],
                });
                let card = self.draw_counted(sink);
                self.hands[idx].add(card);
                sink.emit(Event::PlayerCard {
                    hand: idx,
                    card,
                    total: self.hands[idx].value(),
                });
                if self.hands[idx].is_bust() {
                    sink.emit(Event::HandBusted {
                        hand: idx,
                        total: self.hands[idx].value(),
                    });
                }
                Ok(true)
            }
            Action::Split => {
                let stake = self.stakes[idx];
                session.debit(stake);

                let (kept, moved) = (self.hands[idx].cards()[0], self.hands[idx].cards()[1]);
                let mut first = Hand::new();
                first.add(kept);
                let first_card = self.draw_counted(sink);
                first.add(first_card);

                let mut second = Hand::new();
                second.add(moved);
                let second_card = self.draw_counted(sink);
                second.add(second_card);

                self.hands[idx] = first;
                self.hands.insert(idx + 1, second);
                self.stakes.insert(idx + 1, stake);

                sink.emit(Event::HandSplit {
                    hand: idx,
                    hands_in_play: self.hands.len(),
                });
                sink.emit(Event::PlayerCard {
                    hand: idx,
                    card: first_card,
                    total: self.hands[idx].value(),
                });
                sink.emit(Event::PlayerCard {
                    hand: idx + 1,
                    card: second_card,
                    total: self.hands[idx + 1].value(),
                });
                // The split origin keeps its turn; the inserted hand is
                // reached when the cursor advances.
                Ok(false)
            }
        }
    }

    fn settle_hand<E: EventSink + ?Sized>(
        &self,
        session: &mut Session,
        sink: &mut E,
        idx: usize,
        outcome: Outcome,
        returned: f32,
    ) {
        if returned > 0.0 {
            session.credit(returned);
        }
        session.record(outcome);
        tracing::debug!(hand = idx, ?outcome, returned, "hand settled");
        sink.emit(Event::HandSettled {
            hand: idx,
            outcome,
            stake: self.stakes[idx],
            returned,
            total: self.hands[idx].value(),
            dealer_total: self.dealer.value(),
        });
    }

    fn complete_round<E: EventSink + ?Sized>(&self, session: &mut Session, sink: &mut E) {
        session.complete_round();
        tracing::debug!(bankroll = session.bankroll(), "round complete");
        sink.emit(Event::RoundComplete {
            bankroll: session.bankroll(),
        });
    }
}
