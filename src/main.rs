//! Console front end: prompts for bets and actions, renders engine events,
//! and wires up logging. All game rules live in the library.

use blackjack_table::prelude::*;
use clap::Parser;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(
    name = "blackjack_table",
    about = "Single-table blackjack with Hi-Lo counting and basic-strategy advice"
)]
struct Args {
    /// Number of decks in the shoe
    #[arg(long, default_value_t = 8)]
    decks: usize,
    /// Starting bankroll; prompted for when not given
    #[arg(long)]
    bankroll: Option<f32>,
    /// Seed the shoe for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
    /// Emit events as JSON lines instead of formatted text
    #[arg(long)]
    json: bool,
    /// Suppress basic-strategy advice
    #[arg(long)]
    no_advice: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if !args.json {
        print_banner(args.decks);
    }

    let bankroll = args.bankroll.unwrap_or_else(prompt_bankroll);
    if !args.json {
        println!("\nYour starting bankroll is: ${:.2}", bankroll);
    }

    let table = match args.seed {
        Some(seed) => Table::seeded(args.decks, seed),
        None => Table::new(args.decks),
    };
    let session = Session::new(bankroll);
    let player = ConsolePlayer;

    let result = if args.json {
        Game::new(table, session, player, JsonSink { out: io::stdout() }).run()
    } else {
        Game::new(
            table,
            session,
            player,
            ConsoleSink {
                show_advice: !args.no_advice,
            },
        )
        .run()
    };

    match result {
        Ok(summary) => {
            if !args.json {
                println!("\n{}", summary);
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_banner(decks: usize) {
    println!("Welcome to the Blackjack Table!");
    println!("Rules:");
    println!("- {decks} decks, dealer stands on all 17s, hits on 16 or below.");
    println!("- Blackjack pays 3:2.");
    println!("- Double down allowed only on hard totals of 9, 10, or 11.");
    println!("- Splits allowed if the first two cards are a pair, up to {MAX_HANDS} hands.");
    println!("- Bet is placed before cards are dealt.");
    println!();
    println!("[Educational Note: We track card counting using the Hi-Lo system.]");
    println!("2-6 = +1, 7-9 = 0, 10-Ace = -1");
}

/// Reads one trimmed line from stdin, exiting cleanly on end of input.
fn read_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => {
            println!("\nGoodbye.");
            std::process::exit(0);
        }
        Ok(_) => line.trim().to_string(),
    }
}

fn prompt_bankroll() -> f32 {
    loop {
        let line = read_line("Enter your starting bankroll (e.g., 1000): $");
        match line.parse::<f32>() {
            Ok(amount) if amount > 0.0 => return amount,
            Ok(_) => println!("Bankroll must be greater than zero."),
            Err(_) => println!("Invalid input. Please enter a numerical value."),
        }
    }
}

/// Stdin-driven implementation of the engine's input contract. Every prompt
/// loops until it has a valid answer, so the engine only ever sees values it
/// can act on.
struct ConsolePlayer;

impl PlayerInput for ConsolePlayer {
    fn bet(&mut self, bankroll: f32) -> f32 {
        loop {
            let line = read_line(&format!(
                "\nPlease enter your bet amount (Available: ${bankroll:.2}): $"
            ));
            match line.parse::<f32>() {
                Ok(bet) if bet <= 0.0 => println!("Bet must be greater than zero."),
                Ok(bet) if bet > bankroll => {
                    println!("You cannot bet more than your current bankroll.")
                }
                Ok(bet) => return bet,
                Err(_) => println!("Invalid input. Please enter a numerical value."),
            }
        }
    }

    fn take_insurance(&mut self, bet: f32) -> bool {
        loop {
            let line =
                read_line("\nDealer has an Ace. Would you like to take insurance? (Y/N): ");
            match line.to_uppercase().as_str() {
                "Y" => return true,
                "N" => return false,
                _ => println!("Invalid input. Please enter 'Y' or 'N'."),
            }
        }
    }

    fn action(&mut self, view: &TurnView<'_>) -> Action {
        println!(
            "\nHand {} of {}: {}",
            view.hand_index + 1,
            view.hands_in_play,
            view.hand
        );
        println!("Dealer's upcard: {}", view.dealer_upcard);
        println!("Current Bankroll: ${:.2}", view.bankroll);
        println!("\nAvailable Actions:");
        println!("  H: Hit - Take another card.");
        println!("  S: Stand - End your turn.");
        let mut choices = String::from("H/S");
        if view.legal.double_down {
            println!("  D: Double Down - Increase your bet and take one more card.");
            choices.push_str("/D");
        }
        if view.legal.split {
            println!("  P: Split - Divide your pair into two hands.");
            choices.push_str("/P");
        }
        loop {
            let line = read_line(&format!("Choose action ({choices}): "));
            match line.to_uppercase().as_str() {
                "H" => return Action::Hit,
                "S" => return Action::Stand,
                "D" if view.legal.double_down => return Action::DoubleDown,
                "P" if view.legal.split => return Action::Split,
                _ => println!("Invalid input. Please enter one of {choices}."),
            }
        }
    }

    fn another_round(&mut self, _bankroll: f32) -> bool {
        loop {
            let line = read_line("\nWould you like to play another hand? (Y/N): ");
            match line.to_uppercase().as_str() {
                "Y" => {
                    println!("\nStarting a new hand...");
                    return true;
                }
                "N" => return false,
                _ => println!("Invalid input. Please enter 'Y' or 'N'."),
            }
        }
    }
}

/// Renders engine events as the familiar table chatter.
struct ConsoleSink {
    show_advice: bool,
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Reshuffled { .. } => println!("Out of cards! Reshuffling the shoe."),
            Event::CountInfo {
                running_count,
                true_count,
                band,
                cards_remaining,
            } => {
                println!("\n[Educational Note] Cards remaining in the shoe: {cards_remaining}");
                println!(
                    "[Card Counting] Running Count: {running_count}, True Count: {true_count:.2}"
                );
                match band {
                    CountBand::Favorable => println!(
                        "Positive true count: More high-value cards remain, favoring the player."
                    ),
                    CountBand::Unfavorable => println!(
                        "Negative true count: Fewer high-value cards remain, not as favorable."
                    ),
                    CountBand::Neutral => println!("Neutral count: Balanced deck composition."),
                }
            }
            Event::RoundStarted { bet, .. } => println!("\nYou have bet: ${bet:.2}"),
            Event::PlayerCard { hand, card, total } => {
                println!("Dealt card: {card} (Hand {}: {total})", hand + 1)
            }
            Event::DealerUpcard { card } => println!("Dealer shows: {card}"),
            Event::DealerHoleCard => println!("Dealer takes a card face down."),
            Event::DealerReveal { card, total } => {
                println!("Dealer reveals: {card} (Value: {total})")
            }
            Event::DealerCard { card, total } => println!("Dealer hits: {card} (Value: {total})"),
            Event::DealerBlackjack => println!("\nDealer has Blackjack."),
            Event::PlayerBlackjack { payout } => {
                println!("\nYou have a Blackjack! You win 3:2 (${payout:.2} returned).")
            }
            Event::InsurancePlaced { amount } => {
                println!("You placed an insurance bet of ${amount:.2}.")
            }
            Event::InsurancePaid { amount } => {
                println!("Insurance pays 2:1: ${amount:.2} returned.")
            }
            Event::InsuranceLost { .. } => println!("Insurance bet loses."),
            Event::Advice {
                strength,
                action,
                rationale,
                ..
            } => {
                if self.show_advice {
                    println!("\n{strength} hand. Basic Strategy Suggestion: {action}");
                    println!("Reasoning: {rationale}");
                }
            }
            Event::ActionRejected { action, .. } => println!("Cannot {action} this hand."),
            Event::HandSplit { hand, .. } => {
                println!("\nHand {} split into two hands.", hand + 1)
            }
            Event::DoubledDown { hand, stake } => println!(
                "Hand {} doubles down; the stake is now ${stake:.2}.",
                hand + 1
            ),
            Event::HandStood { hand, total } => println!("Hand {} stands at {total}.", hand + 1),
            Event::HandBusted { hand, total } => println!("Hand {} busts at {total}!", hand + 1),
            Event::DealerStood { total } => println!("Dealer stands at {total}."),
            Event::DealerBusted { total } => println!("Dealer busts at {total}!"),
            Event::HandSettled {
                hand,
                outcome,
                stake,
                ..
            } => match outcome {
                Outcome::Win => println!("Hand {} wins. You win ${stake:.2}.", hand + 1),
                Outcome::Loss => println!("Hand {} loses. You lose ${stake:.2}.", hand + 1),
                Outcome::Push => println!(
                    "Hand {} pushes. Your bet of ${stake:.2} is returned.",
                    hand + 1
                ),
            },
            Event::RoundComplete { bankroll } => {
                println!("\nYour current bankroll is: ${bankroll:.2}")
            }
            Event::SessionComplete { .. } => {}
        }
    }
}

/// Writes every event as one JSON object per line.
struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> EventSink for JsonSink<W> {
    fn emit(&mut self, event: Event) {
        if let Ok(line) = serde_json::to_string(&event) {
            let _ = writeln!(self.out, "{line}");
        }
    }
}
