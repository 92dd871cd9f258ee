//! Structured events emitted by the round engine. A presentation layer
//! renders these however it likes; the engine itself never prints.

use crate::game::card::Card;
use crate::game::count::CountBand;
use crate::game::strategy::{Action, HandStrength};
use crate::session::{Outcome, SessionSummary};
use serde::Serialize;

/// Everything observable about a session, in the order it happened.
/// Hand indices are zero-based positions in the round's hand list.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A draw hit an empty shoe; it was rebuilt and reshuffled first.
    Reshuffled { remaining: usize },
    /// Running/true count snapshot, emitted before bets and decisions.
    CountInfo {
        running_count: i32,
        true_count: f32,
        band: CountBand,
        cards_remaining: usize,
    },
    RoundStarted { bet: f32, bankroll: f32 },
    PlayerCard { hand: usize, card: Card, total: u8 },
    DealerUpcard { card: Card },
    /// The dealer's second card goes down unseen; the count already saw it.
    DealerHoleCard,
    DealerReveal { card: Card, total: u8 },
    DealerCard { card: Card, total: u8 },
    DealerBlackjack,
    PlayerBlackjack { payout: f32 },
    InsurancePlaced { amount: f32 },
    InsurancePaid { amount: f32 },
    InsuranceLost { amount: f32 },
    /// Advice from the basic-strategy table ahead of an action request.
    Advice {
        hand: usize,
        total: u8,
        strength: HandStrength,
        action: Action,
        rationale: &'static str,
    },
    /// The requested action was not in the legal set; nothing changed.
    ActionRejected { hand: usize, action: Action },
    HandSplit { hand: usize, hands_in_play: usize },
    DoubledDown { hand: usize, stake: f32 },
    HandStood { hand: usize, total: u8 },
    HandBusted { hand: usize, total: u8 },
    DealerStood { total: u8 },
    DealerBusted { total: u8 },
    /// One hand priced against the dealer. `returned` is the amount credited
    /// back to the bankroll: 2x the stake on a win, the stake on a push.
    HandSettled {
        hand: usize,
        outcome: Outcome,
        stake: f32,
        returned: f32,
        total: u8,
        dealer_total: u8,
    },
    RoundComplete { bankroll: f32 },
    SessionComplete { summary: SessionSummary },
}

/// Where the engine sends its events. Implementations render to a console,
/// serialize to a log, or drop everything in tests.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl<'a, S: EventSink + ?Sized> EventSink for &'a mut S {
    fn emit(&mut self, event: Event) {
        (**self).emit(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: Event) {
        (**self).emit(event)
    }
}

/// Sink that discards every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: Event) {}
}

/// Sink that keeps every event, for assertions in tests.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl RecordingSink {
    pub fn new() -> RecordingSink {
        RecordingSink { events: Vec::new() }
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Rank, Suit};

    #[test]
    fn events_serialize_with_a_type_tag() {
        let event = Event::PlayerCard {
            hand: 0,
            card: Card::new(Suit::Hearts, Rank::Ace),
            total: 11,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"player_card\""));
        assert!(json.contains("\"rank\":\"Ace\""));
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.emit(Event::DealerHoleCard);
        sink.emit(Event::RoundComplete { bankroll: 10.0 });
        assert_eq!(sink.events.len(), 2);
        assert!(matches!(sink.events[0], Event::DealerHoleCard));
    }
}
