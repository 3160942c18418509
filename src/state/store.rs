//! Game store.
//!
//! Registry of every game created during the store's lifetime, indexed by
//! game id and by owner key. Games are never removed.
//!
//! Each game sits behind its own mutex, so turns on one game are serialized
//! while different games progress in parallel. The indexes share one
//! `RwLock`, held only long enough to find or insert a handle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::{EngineConfig, LookupPolicy};
use super::game::{Game, GameError, Theme};

/// Shared handle to a stored game.
type SharedGame = Arc<Mutex<Game>>;

/// Store errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("game {game_id} not found for owner {owner}")]
    GameNotFound { owner: String, game_id: String },

    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Debug)]
struct Entry {
    owner: String,
    game: SharedGame,
}

#[derive(Debug, Default)]
struct Registry {
    /// Game ID to entry
    games: HashMap<String, Entry>,

    /// Owner key to game IDs, in creation order
    owner_index: HashMap<String, Vec<String>>,
}

/// In-memory game store.
#[derive(Debug)]
pub struct GameStore {
    config: EngineConfig,
    registry: RwLock<Registry>,
    /// Opponent move source, shared by all games
    rng: Mutex<StdRng>,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.opponent_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            registry: RwLock::new(Registry::default()),
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create and register a new game.
    pub fn create_game(&self, owner: &str, theme: Theme) -> Game {
        let game = Game::new(owner.to_string(), theme);
        let snapshot = game.clone();

        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        registry
            .owner_index
            .entry(owner.to_string())
            .or_default()
            .push(game.id().to_string());
        registry.games.insert(
            game.id().to_string(),
            Entry {
                owner: owner.to_string(),
                game: Arc::new(Mutex::new(game)),
            },
        );

        tracing::debug!(game_id = %snapshot.id(), owner, "game created");
        snapshot
    }

    /// Games created under `owner`, oldest first. Empty for unknown owners.
    pub fn list_games(&self, owner: &str) -> Vec<Game> {
        let handles: Vec<SharedGame> = {
            let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
            registry
                .owner_index
                .get(owner)
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| registry.games.get(id))
                        .map(|entry| Arc::clone(&entry.game))
                        .collect()
                })
                .unwrap_or_default()
        };

        handles.iter().map(|game| lock(game).clone()).collect()
    }

    /// Snapshot of one of `owner`'s games.
    pub fn get_game(&self, owner: &str, game_id: &str) -> Result<Game, StoreError> {
        let handle = self.handle(owner, game_id)?;
        let game = lock(&handle).clone();
        Ok(game)
    }

    /// Shared handle to one of `owner`'s games.
    pub(crate) fn handle(&self, owner: &str, game_id: &str) -> Result<SharedGame, StoreError> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);

        let entry = match self.config.lookup {
            LookupPolicy::OwnerScoped => registry
                .owner_index
                .get(owner)
                .and_then(|ids| ids.iter().find(|id| id.as_str() == game_id))
                .and_then(|id| registry.games.get(id)),
            LookupPolicy::GlobalChecked => registry
                .games
                .get(game_id)
                .filter(|entry| entry.owner == owner),
        };

        match entry {
            Some(entry) => Ok(Arc::clone(&entry.game)),
            None => {
                tracing::debug!(owner, game_id, "game lookup missed");
                Err(StoreError::GameNotFound {
                    owner: owner.to_string(),
                    game_id: game_id.to_string(),
                })
            }
        }
    }

    /// Play a full turn on one of `owner`'s games and return its new state.
    pub fn play_turn(&self, owner: &str, game_id: &str, column: usize) -> Result<Game, StoreError> {
        let handle = self.handle(owner, game_id)?;
        let mut game = lock(&handle);

        let result = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            game.play_turn(column, &mut *rng)
        };

        if let Err(err) = &result {
            tracing::debug!(game_id, column, error = %err, "turn rejected");
        }
        result?;

        Ok(game.clone())
    }

    /// Total number of games.
    pub fn game_count(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .games
            .len()
    }

    /// Number of owners with at least one game.
    pub fn owner_count(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .owner_index
            .len()
    }
}

/// Lock a game. A poisoned lock still holds a consistent game: every
/// mutation is validated before it is applied.
fn lock(game: &SharedGame) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(PoisonError::into_inner)
}
