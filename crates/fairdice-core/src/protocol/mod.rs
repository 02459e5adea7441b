//! Protocol types, messages and the game session.

mod counterpart;
mod messages;
mod scripted;
mod session;
mod types;

pub use counterpart::{Counterpart, GameEvent, Selection};
pub use messages::{CommitMessage, OutcomeMessage, RevealMessage, TranscriptEntry};
pub use scripted::ScriptedCounterpart;
pub use session::{GameProtocol, GameReport, Outcome};
pub use types::{GameId, GameResult, GameState, Player, Round};
