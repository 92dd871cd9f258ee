//! Everything needed to run a single-table blackjack session: the card
//! catalog, the shoe, hands, the Hi-Lo count, the basic-strategy advisor and
//! the round engine, plus the session loop that strings rounds together.

pub mod card;
pub mod count;
pub mod hand;
pub mod shoe;
pub mod strategy;
pub mod table;

use crate::events::{Event, EventSink};
use crate::game::strategy::Action;
use crate::game::table::{Table, TurnView};
use crate::session::{Session, SessionSummary};
use thiserror::Error;

/// The ways a request to the round engine can be refused. None of these are
/// fatal: an invalid action leaves the round untouched and the caller simply
/// asks again; shortfalls are caught before any money moves.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("bet of ${0:.2} must be a positive amount")]
    InvalidBet(f32),
    #[error("{action} is not a legal play for the current hand")]
    InvalidAction { action: Action },
    #[error("insufficient bankroll: ${required:.2} required, ${available:.2} available")]
    InsufficientBankroll { required: f32, available: f32 },
}

/// The decisions a player has to make during a session. Implementations are
/// expected to return validated values: a positive bet within the bankroll,
/// and actions drawn from the legal set in the view. The engine re-checks
/// anyway and re-asks on an illegal action.
pub trait PlayerInput {
    /// The stake for the next round.
    fn bet(&mut self, bankroll: f32) -> f32;
    /// Whether to insure against a dealer blackjack for half the bet.
    fn take_insurance(&mut self, bet: f32) -> bool;
    /// The play for the hand described by `view`.
    fn action(&mut self, view: &TurnView<'_>) -> Action;
    /// Whether to keep playing after a completed round.
    fn another_round(&mut self, bankroll: f32) -> bool;
}

/// A full session: rounds are played until the player declines another or the
/// bankroll runs out, then the summary is emitted and returned.
pub struct Game<I, E> {
    table: Table,
    session: Session,
    input: I,
    sink: E,
}

impl<I, E> Game<I, E>
where
    I: PlayerInput,
    E: EventSink,
{
    pub fn new(table: Table, session: Session, input: I, sink: E) -> Game<I, E> {
        Game {
            table,
            session,
            input,
            sink,
        }
    }

    /// Runs rounds until the session ends, returning the final summary.
    pub fn run(mut self) -> Result<SessionSummary, GameError> {
        loop {
            if self.session.broke() {
                tracing::info!("bankroll exhausted, session over");
                break;
            }

            // Count and shoe-depth info ahead of the betting decision.
            self.sink.emit(self.table.count_event());

            let bet = self.input.bet(self.session.bankroll());
            self.table
                .play_round(&mut self.session, bet, &mut self.input, &mut self.sink)?;

            if !self.input.another_round(self.session.bankroll()) {
                break;
            }
        }

        let summary = self.session.summary();
        tracing::info!(
            hands = summary.hands_played,
            profit = summary.profit,
            "session finished"
        );
        self.sink.emit(Event::SessionComplete {
            summary: summary.clone(),
        });
        Ok(summary)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;

    /// Plays fixed bets and always stands; stops after `rounds` rounds.
    struct FlatBettor {
        bet: f32,
        rounds: u32,
    }

    impl PlayerInput for FlatBettor {
        fn bet(&mut self, _bankroll: f32) -> f32 {
            self.bet
        }

        fn take_insurance(&mut self, _bet: f32) -> bool {
            false
        }

        fn action(&mut self, view: &TurnView<'_>) -> Action {
            // Mirror the advisor so the script can never pick an illegal play.
            let suggestion =
                crate::game::strategy::suggest(view.hand, view.dealer_upcard, view.legal.split);
            match suggestion.action {
                Action::DoubleDown if !view.legal.double_down => Action::Hit,
                Action::Split if !view.legal.split => Action::Hit,
                action => action,
            }
        }

        fn another_round(&mut self, _bankroll: f32) -> bool {
            self.rounds -= 1;
            self.rounds > 0
        }
    }

    #[test]
    fn a_session_plays_the_requested_rounds_and_summarizes() {
        // Deep enough bankroll that twenty rounds can never exhaust it, so
        // the round count is exact.
        let game = Game::new(
            Table::seeded(8, 11),
            Session::new(10_000.0),
            FlatBettor {
                bet: 25.0,
                rounds: 20,
            },
            RecordingSink::new(),
        );

        let summary = game.run().expect("session should complete");

        assert_eq!(summary.hands_played, 20);
        assert_eq!(summary.starting_bankroll, 10_000.0);
        // Every round settles at least one hand.
        assert!(summary.wins + summary.losses + summary.pushes >= 20);
        assert_eq!(
            summary.profit,
            summary.final_bankroll - summary.starting_bankroll
        );
    }

    #[test]
    fn the_session_summary_is_emitted_as_the_final_event() {
        let mut sink = RecordingSink::new();
        let game = Game::new(
            Table::seeded(8, 5),
            Session::new(500.0),
            FlatBettor {
                bet: 10.0,
                rounds: 3,
            },
            &mut sink,
        );
        game.run().expect("session should complete");

        assert!(matches!(
            sink.events.last(),
            Some(Event::SessionComplete { .. })
        ));
    }
}
