//! Single-table blackjack round engine: a multi-deck shoe, Hi-Lo counting,
//! a fixed basic-strategy advisor and full round resolution (hit, stand,
//! double down, splits, insurance, 3:2 blackjacks). All console concerns
//! live in the binary; the library speaks through [`events::EventSink`] and
//! [`game::PlayerInput`].

pub mod events;
pub mod game;
pub mod session;

pub use events::{Event, EventSink, NullSink, RecordingSink};
pub use game::{Game, GameError, PlayerInput};
pub use session::{Outcome, Session, SessionSummary};

pub mod prelude {
    pub use crate::events::{Event, EventSink, NullSink};
    pub use crate::game::card::{Card, Rank, Suit};
    pub use crate::game::count::CountBand;
    pub use crate::game::hand::Hand;
    pub use crate::game::shoe::Shoe;
    pub use crate::game::strategy::{suggest, Action, HandStrength, Suggestion};
    pub use crate::game::table::{CountInfo, LegalActions, Table, TurnView, MAX_HANDS};
    pub use crate::game::{Game, GameError, PlayerInput};
    pub use crate::session::{Outcome, Session, SessionSummary};
}
