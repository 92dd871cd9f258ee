//! Bankroll and win/loss bookkeeping for a playing session. The round engine
//! reports outcomes here; nothing in this module touches cards.

use serde::Serialize;
use std::fmt::Display;

/// How a single settled hand went for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

/// Session-wide accumulator: bankroll, tallies, and the bankroll history used
/// for downstream visualization. Tallies count hands; `hands_played` counts
/// completed rounds.
#[derive(Debug, Clone)]
pub struct Session {
    bankroll: f32,
    starting_bankroll: f32,
    hands_played: u32,
    wins: u32,
    losses: u32,
    pushes: u32,
    history: Vec<f32>,
}

impl Session {
    /// Associated function for starting a session with the given bankroll.
    /// The history is seeded with the starting value, then grows by one entry
    /// per completed round.
    pub fn new(starting_bankroll: f32) -> Session {
        Session {
            bankroll: starting_bankroll,
            starting_bankroll,
            hands_played: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            history: vec![starting_bankroll],
        }
    }

    pub fn bankroll(&self) -> f32 {
        self.bankroll
    }

    pub fn starting_bankroll(&self) -> f32 {
        self.starting_bankroll
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn pushes(&self) -> u32 {
        self.pushes
    }

    pub fn history(&self) -> &[f32] {
        &self.history
    }

    /// Returns true once the player can no longer stake anything.
    pub fn broke(&self) -> bool {
        self.bankroll <= 0.0
    }

    /// Method for adding winnings or returned stakes to the bankroll.
    pub fn credit(&mut self, amount: f32) {
        self.bankroll += amount;
    }

    /// Method for taking a stake out of the bankroll.
    pub fn debit(&mut self, amount: f32) {
        self.bankroll -= amount;
    }

    /// Records the outcome of one settled hand.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Push => self.pushes += 1,
        }
    }

    /// Closes out a round: bumps the round counter and snapshots the bankroll.
    pub fn complete_round(&mut self) {
        self.hands_played += 1;
        self.history.push(self.bankroll);
    }

    /// Method for producing the summary of the session so far.
    pub fn summary(&self) -> SessionSummary {
        let win_rate = if self.hands_played > 0 {
            (self.wins as f32 / self.hands_played as f32) * 100.0
        } else {
            0.0
        };
        SessionSummary {
            hands_played: self.hands_played,
            wins: self.wins,
            losses: self.losses,
            pushes: self.pushes,
            win_rate,
            starting_bankroll: self.starting_bankroll,
            final_bankroll: self.bankroll,
            profit: self.bankroll - self.starting_bankroll,
        }
    }
}

/// Snapshot of the interesting numbers at the end of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub hands_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub win_rate: f32,
    pub starting_bankroll: f32,
    pub final_bankroll: f32,
    pub profit: f32,
}

impl Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 60;
        const TEXT_WIDTH: usize = "total hands played:".len() + 10;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        writeln!(f, "{:-^WIDTH$}", "session summary")?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "total hands played:", self.hands_played
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "wins:", self.wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "losses:", self.losses)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "pushes:", self.pushes)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}%",
            "win rate:", self.win_rate
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}${:>NUM_WIDTH$.2}",
            "starting bankroll:", self.starting_bankroll
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}${:>NUM_WIDTH$.2}",
            "final bankroll:", self.final_bankroll
        )?;
        if self.profit >= 0.0 {
            writeln!(f, "{:<TEXT_WIDTH$}${:>NUM_WIDTH$.2}", "profit:", self.profit)?;
        } else {
            writeln!(f, "{:<TEXT_WIDTH$}${:>NUM_WIDTH$.2}", "loss:", -self.profit)?;
        }
        write!(f, "{}", "-".repeat(WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_starts_with_the_starting_bankroll() {
        let session = Session::new(1000.0);
        assert_eq!(session.history(), &[1000.0]);
        assert_eq!(session.bankroll(), 1000.0);
    }

    #[test]
    fn tallies_count_hands_while_rounds_count_once() {
        let mut session = Session::new(500.0);
        // A split round settles two hands but is still one round.
        session.record(Outcome::Win);
        session.record(Outcome::Loss);
        session.complete_round();
        assert_eq!(session.hands_played(), 1);
        assert_eq!(session.wins(), 1);
        assert_eq!(session.losses(), 1);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn summary_reports_profit_and_win_rate() {
        let mut session = Session::new(200.0);
        session.debit(50.0);
        session.credit(100.0);
        session.record(Outcome::Win);
        session.complete_round();

        let summary = session.summary();
        assert_eq!(summary.hands_played, 1);
        assert_eq!(summary.win_rate, 100.0);
        assert_eq!(summary.final_bankroll, 250.0);
        assert_eq!(summary.profit, 50.0);
    }

    #[test]
    fn win_rate_is_zero_before_any_round() {
        let summary = Session::new(100.0).summary();
        assert_eq!(summary.win_rate, 0.0);
    }

    #[test]
    fn broke_once_the_bankroll_is_gone() {
        let mut session = Session::new(25.0);
        assert!(!session.broke());
        session.debit(25.0);
        assert!(session.broke());
    }
}
