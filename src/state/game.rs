//! Game session state.
//!
//! A session owns its board, carries the theme it was created with, and
//! tracks status and timestamps. Moves go through the session only.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, MoveError};
use super::status::GameStatus;

/// A playable token design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    /// Display name
    pub name: String,
    /// Image reference
    pub url: String,
}

/// Display settings chosen at game creation. Never read by the rules.
///
/// Serialized in the client's field names (`playerToken`, `computerToken`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Board color, e.g. `#FFFF83`
    pub color: String,
    pub player_token: Token,
    #[serde(rename = "computerToken")]
    pub opponent_token: Token,
}

/// Where a token landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    /// Whether this placement completed four in a row
    pub winning: bool,
}

/// Result of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player: Placement,
    /// `None` when the player's move filled the board
    pub opponent: Option<Placement>,
    pub status: GameStatus,
}

/// Game errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("game is over ({0})")]
    GameOver(GameStatus),
}

/// Game session state.
///
/// Identity, owner, theme and timestamps are read-only from outside; the
/// board and status only change through moves.
#[derive(Debug, Clone)]
pub struct Game {
    /// Unique game ID
    id: String,

    /// Owner key the game was created under
    owner: String,

    theme: Theme,

    board: Board,

    status: GameStatus,

    /// When game was created
    started_at: chrono::DateTime<chrono::Utc>,

    /// When game reached a terminal status
    finished_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Game {
    /// Create a new game with a fresh id and an empty board.
    pub fn new(owner: String, theme: Theme) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner,
            theme,
            board: Board::new(),
            status: GameStatus::Unfinished,
            started_at: chrono::Utc::now(),
            finished_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at
    }

    /// `None` until the game reaches a terminal status.
    pub fn finished_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.finished_at
    }

    /// Check if the board has no empty cell.
    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    /// Drop a player token in `column`.
    ///
    /// Touches the board only; status is settled by [`Game::play_turn`].
    /// Rejected once the game is over.
    pub fn apply_player_move(&mut self, column: usize) -> Result<Placement, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver(self.status));
        }
        self.drop_token(column, Cell::Player).map_err(GameError::Move)
    }

    /// Drop an opponent token in a uniformly chosen open column.
    ///
    /// Returns `None` without touching the board when it is full or the
    /// game is over.
    pub fn apply_opponent_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Placement> {
        if self.status.is_terminal() {
            return None;
        }
        let column = *self.board.open_columns().choose(rng)?;
        self.drop_token(column, Cell::Opponent).ok()
    }

    fn drop_token(&mut self, column: usize, token: Cell) -> Result<Placement, MoveError> {
        let row = self.board.lowest_open_row(column)?;
        self.board.place(row, column, token);
        Ok(Placement {
            row,
            column,
            winning: self.board.detect_win(row, column, token),
        })
    }

    /// Play a full turn: the player's move, then the opponent's reply.
    ///
    /// A rejected player move leaves the game untouched. Terminal games
    /// reject every turn.
    pub fn play_turn<R: Rng + ?Sized>(
        &mut self,
        column: usize,
        rng: &mut R,
    ) -> Result<TurnOutcome, GameError> {
        let player = self.apply_player_move(column)?;
        let opponent = self.apply_opponent_move(rng);

        let status = GameStatus::resolve(
            player.winning,
            opponent.is_some_and(|p| p.winning),
            self.board.is_full(),
        );
        self.finish(status);

        tracing::debug!(
            game_id = %self.id,
            column,
            opponent_column = ?opponent.map(|p| p.column),
            status = %self.status,
            "turn applied"
        );

        Ok(TurnOutcome {
            player,
            opponent,
            status: self.status,
        })
    }

    /// Record a terminal status. Only the first one is kept.
    fn finish(&mut self, status: GameStatus) {
        if !status.is_terminal() || self.status.is_terminal() {
            return;
        }

        self.status = status;
        self.finished_at = Some(chrono::Utc::now());
        tracing::info!(game_id = %self.id, owner = %self.owner, %status, "game finished");
    }

    /// Convert full game state to JSON snapshot.
    ///
    /// Times are epoch milliseconds; `finish` is an empty string while the
    /// game is unfinished.
    pub fn to_json(&self) -> serde_json::Value {
        let finish = match self.finished_at {
            Some(t) => serde_json::json!(t.timestamp_millis()),
            None => serde_json::json!(""),
        };
        serde_json::json!({
            "id": self.id,
            "theme": self.theme,
            "grid": self.board.to_json(),
            "status": self.status.as_str(),
            "start": self.started_at.timestamp_millis(),
            "finish": finish
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::board::{COLS, ROWS};
    use pretty_assertions::assert_eq;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub(crate) fn make_theme() -> Theme {
        let token = |id: &str, name: &str| Token {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("../images/{}.jpg", id),
        };
        Theme {
            color: "#FFFF83".to_string(),
            player_token: token("frog-car", "Frog Car"),
            opponent_token: token("squirrels", "The Squirrels"),
        }
    }

    fn make_game() -> Game {
        Game::new("sid-1".to_string(), make_theme())
    }

    /// Always yields zero, so the opponent takes the lowest open column.
    fn lowest_column_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn stack(game: &mut Game, column: usize, tokens: &[Cell]) {
        for &token in tokens {
            let row = game.board.lowest_open_row(column).unwrap();
            game.board.place(row, column, token);
        }
    }

    #[test]
    fn test_game_new() {
        let game = make_game();
        assert_eq!(game.status(), GameStatus::Unfinished);
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.owner(), "sid-1");
        assert_eq!(game.theme(), &make_theme());
        assert!(game.finished_at().is_none());
        assert!(game.started_at() <= chrono::Utc::now());
    }

    #[test]
    fn test_game_ids_are_unique() {
        assert_ne!(make_game().id, make_game().id);
    }

    #[test]
    fn test_player_move() {
        let mut game = make_game();
        let placement = game.apply_player_move(4).unwrap();

        assert_eq!(
            placement,
            Placement {
                row: 0,
                column: 4,
                winning: false
            }
        );
        assert_eq!(game.board().get(0, 4), Some(Cell::Player));
        assert_eq!(game.status(), GameStatus::Unfinished);
    }

    #[test]
    fn test_player_move_rejected() {
        let mut game = make_game();
        stack(&mut game, 1, &[Cell::Opponent; ROWS]);
        let before = game.board().clone();

        assert_eq!(
            game.apply_player_move(1),
            Err(GameError::Move(MoveError::ColumnFull(1)))
        );
        assert_eq!(
            game.apply_player_move(COLS),
            Err(GameError::Move(MoveError::InvalidColumn(COLS)))
        );
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_opponent_move_lands_in_open_column() {
        let mut game = make_game();
        for col in 0..COLS - 1 {
            stack(&mut game, col, &[Cell::Player; ROWS]);
        }

        let mut rng = StdRng::seed_from_u64(7);
        let placement = game.apply_opponent_move(&mut rng).unwrap();
        assert_eq!(placement.column, COLS - 1);
        assert_eq!(placement.row, 0);
        assert_eq!(game.board().get(0, COLS - 1), Some(Cell::Opponent));
    }

    #[test]
    fn test_opponent_move_on_full_board() {
        let mut game = make_game();
        for col in 0..COLS {
            stack(&mut game, col, &[Cell::Player; ROWS]);
        }
        let before = game.board().clone();

        assert_eq!(game.apply_opponent_move(&mut lowest_column_rng()), None);
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_opponent_moves_stay_legal() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = make_game();

        let mut placed = 0;
        while let Some(p) = game.apply_opponent_move(&mut rng) {
            assert!(p.column < COLS);
            assert_eq!(game.board().column_height(p.column), p.row + 1);
            placed += 1;
        }
        assert_eq!(placed, ROWS * COLS);
        assert!(game.is_full());
    }

    #[test]
    fn test_vertical_victory() {
        let mut game = make_game();
        // Opponent fills column 0 to the top without lining up four.
        stack(&mut game, 0, &[Cell::Opponent, Cell::Player]);
        let mut rng = lowest_column_rng();

        for _ in 0..3 {
            let outcome = game.play_turn(3, &mut rng).unwrap();
            assert_eq!(outcome.status, GameStatus::Unfinished);
            assert_eq!(outcome.opponent.unwrap().column, 0);
        }

        let outcome = game.play_turn(3, &mut rng).unwrap();
        assert_eq!(
            outcome.player,
            Placement {
                row: 3,
                column: 3,
                winning: true
            }
        );
        assert_eq!(outcome.opponent.unwrap().column, 1);
        assert_eq!(outcome.status, GameStatus::Victory);
        assert_eq!(game.status(), GameStatus::Victory);
        assert!(game.finished_at.is_some());
    }

    #[test]
    fn test_loss() {
        let mut game = make_game();
        let mut rng = lowest_column_rng();

        for column in [5, 6, 5] {
            let outcome = game.play_turn(column, &mut rng).unwrap();
            assert_eq!(outcome.status, GameStatus::Unfinished);
        }

        let outcome = game.play_turn(6, &mut rng).unwrap();
        assert!(!outcome.player.winning);
        assert!(outcome.opponent.unwrap().winning);
        assert_eq!(outcome.status, GameStatus::Loss);
        assert!(game.finished_at.is_some());
    }

    #[test]
    fn test_both_win_same_turn_is_tie() {
        let mut game = make_game();
        let mut rng = lowest_column_rng();

        // Player stacks column 3 while the opponent stacks column 0.
        for _ in 0..3 {
            game.play_turn(3, &mut rng).unwrap();
        }
        let outcome = game.play_turn(3, &mut rng).unwrap();

        assert!(outcome.player.winning);
        assert!(outcome.opponent.unwrap().winning);
        assert_eq!(outcome.status, GameStatus::Tie);
    }

    #[test]
    fn test_full_board_is_tie() {
        let mut game = make_game();
        // No four in a row anywhere in this pattern.
        let token = |row: usize, col: usize| {
            if (col / 2 + row) % 2 == 0 {
                Cell::Player
            } else {
                Cell::Opponent
            }
        };
        for col in 0..COLS {
            let rows = if col == 0 { ROWS - 1 } else { ROWS };
            let tokens: Vec<Cell> = (0..rows).map(|row| token(row, col)).collect();
            stack(&mut game, col, &tokens);
        }
        assert_eq!(token(ROWS - 1, 0), Cell::Player);

        let outcome = game.play_turn(0, &mut lowest_column_rng()).unwrap();
        assert!(!outcome.player.winning);
        assert_eq!(outcome.opponent, None);
        assert_eq!(outcome.status, GameStatus::Tie);
        assert!(game.is_full());
        assert!(game.finished_at.is_some());
    }

    #[test]
    fn test_finished_game_rejects_turns() {
        let mut game = make_game();
        let mut rng = lowest_column_rng();
        for column in [5, 6, 5, 6] {
            game.play_turn(column, &mut rng).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Loss);
        let board = game.board().clone();
        let finished_at = game.finished_at;

        assert_eq!(
            game.play_turn(2, &mut rng),
            Err(GameError::GameOver(GameStatus::Loss))
        );
        assert_eq!(game.board(), &board);
        assert_eq!(game.status(), GameStatus::Loss);
        assert_eq!(game.finished_at, finished_at);
    }

    #[test]
    fn test_finished_game_rejects_single_moves() {
        let mut game = make_game();
        let mut rng = lowest_column_rng();
        for column in [5, 6, 5, 6] {
            game.play_turn(column, &mut rng).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Loss);
        let filled = game.board().filled_count();
        let finished_at = game.finished_at();

        assert_eq!(
            game.apply_player_move(2),
            Err(GameError::GameOver(GameStatus::Loss))
        );
        assert_eq!(game.apply_opponent_move(&mut rng), None);
        assert_eq!(game.board().filled_count(), filled);
        assert_eq!(game.status(), GameStatus::Loss);
        assert_eq!(game.finished_at(), finished_at);
    }

    #[test]
    fn test_rejected_turn_changes_nothing() {
        let mut game = make_game();
        stack(&mut game, 2, &[Cell::Player, Cell::Opponent, Cell::Player, Cell::Opponent, Cell::Player]);
        let before = game.board().clone();

        let err = game.play_turn(2, &mut lowest_column_rng()).unwrap_err();
        assert_eq!(err, GameError::Move(MoveError::ColumnFull(2)));
        assert_eq!(err.to_string(), "column 2 is full");
        assert_eq!(game.board(), &before);
        assert_eq!(game.status(), GameStatus::Unfinished);
    }

    #[test]
    fn test_to_json() {
        let mut game = make_game();
        game.apply_player_move(0).unwrap();

        let json = game.to_json();
        assert_eq!(json["id"], game.id());
        assert_eq!(json["status"], "UNFINISHED");
        assert_eq!(json["grid"][0][0], "X");
        assert_eq!(json["theme"]["playerToken"]["name"], "Frog Car");
        assert_eq!(json["theme"]["computerToken"]["name"], "The Squirrels");
        assert_eq!(json["start"], game.started_at().timestamp_millis());
        assert_eq!(json["finish"], "");
    }

    #[test]
    fn test_to_json_finished() {
        let mut game = make_game();
        let mut rng = lowest_column_rng();
        for column in [5, 6, 5, 6] {
            game.play_turn(column, &mut rng).unwrap();
        }

        let json = game.to_json();
        assert_eq!(json["status"], "LOSS");
        assert_eq!(json["finish"], game.finished_at().unwrap().timestamp_millis());
    }

    #[test]
    fn test_theme_wire_names() {
        let theme: Theme = serde_json::from_value(serde_json::json!({
            "color": "#123456",
            "playerToken": {"id": "a", "name": "Eagly", "url": "../images/eagly.jpg"},
            "computerToken": {"id": "b", "name": "Jesse", "url": "../images/jesse.jpg"}
        }))
        .unwrap();
        assert_eq!(theme.opponent_token.name, "Jesse");
        assert_eq!(serde_json::to_value(&theme).unwrap()["computerToken"]["id"], "b");
    }
}
