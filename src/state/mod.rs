//! State management module for Connect Four.
//!
//! This module provides the core state types and the store:
//!
//! - `board` - 5x7 grid, gravity, four-in-a-row detection
//! - `status` - Game status and per-turn resolution
//! - `game` - A single game session against the random opponent
//! - `store` - Registry of games by id and by owner
//! - `config` - Store configuration
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          GameStore                           │
//! │                                                              │
//! │   RwLock ─┬─ game_id → (owner, Arc<Mutex<Game>>)             │
//! │           └─ owner   → [game_id, ...]  (creation order)      │
//! │                                                              │
//! │   ┌──────────────────────────────────────────────────────┐   │
//! │   │                  Game (per mutex)                    │   │
//! │   │                                                      │   │
//! │   │   Board ── play_turn ──▶ GameStatus                  │   │
//! │   │            (player move, opponent move, resolve)     │   │
//! │   └──────────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use connect_four_state::state::{GameStore, EngineConfig};
//!
//! let store = GameStore::with_config(EngineConfig::default().with_seed(1));
//! let game = store.create_game("sid-abc", theme);
//! let game = store.play_turn("sid-abc", game.id(), 3)?;
//! println!("{}", game.status());
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod status;
pub mod store;

// Re-export commonly used types
pub use board::{Board, Cell, MoveError, COLS, ROWS, WIN_LENGTH};
pub use config::{ConfigError, EngineConfig, LookupPolicy};
pub use game::{Game, GameError, Placement, Theme, Token, TurnOutcome};
pub use status::GameStatus;
pub use store::{GameStore, StoreError};
