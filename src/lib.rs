//! Connect Four State Library
//!
//! This crate provides the rules engine and game store for Connect Four
//! played against a random opponent.
//!
//! # Overview
//!
//! - **Board** - A 5x7 grid where tokens fall to the lowest open row. Wins are
//!   detected from the last placed token along all four axes.
//!
//! - **Game Sessions** - One board plus theme, timestamps and a status that
//!   moves from `Unfinished` to `Victory`, `Loss` or `Tie` exactly once.
//!
//! - **Game Store** - Every game created, indexed by id and by owner key.
//!   Safe to share across threads.
//!
//! # Design Principles
//!
//! 1. **No networking** - Session ids, routing and rendering belong to the
//!    caller. This crate is pure state.
//!
//! 2. **Typed outcomes** - Rejected moves and missed lookups come back as
//!    errors; the board is never left half-updated.
//!
//! 3. **Serialization-ready** - Games convert to JSON for clients.
//!
//! # Example
//!
//! ```rust
//! use connect_four_state::{EngineConfig, GameStatus, GameStore, Theme, Token};
//!
//! let token = |name: &str| Token {
//!     id: name.to_lowercase(),
//!     name: name.to_string(),
//!     url: format!("../images/{}.jpg", name.to_lowercase()),
//! };
//! let theme = Theme {
//!     color: "#FFFF83".to_string(),
//!     player_token: token("Eagly"),
//!     opponent_token: token("Jesse"),
//! };
//!
//! let store = GameStore::with_config(EngineConfig::default().with_seed(3));
//! let game = store.create_game("session-abc", theme);
//!
//! let game = store.play_turn("session-abc", game.id(), 3).unwrap();
//! assert_eq!(game.status(), GameStatus::Unfinished);
//! assert_eq!(game.board().filled_count(), 2);
//!
//! assert_eq!(store.list_games("session-abc").len(), 1);
//! assert!(store.list_games("someone-else").is_empty());
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
