use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// One game from difficulty selection to win or loss.
///
/// The presentation layer drives it with [`GameSession::reveal`] and reads
/// [`GameSession::visibility`] back; [`GameSession::full_board`] is meant for
/// the end-of-game display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionSnapshot")]
pub struct GameSession {
    difficulty: Option<Difficulty>,
    board: Board,
    engine: RevealEngine,
    state: GameState,
    triggered_mine: Option<CellIndex>,
}

#[derive(Deserialize)]
struct SessionSnapshot {
    difficulty: Option<Difficulty>,
    board: Board,
    engine: RevealEngine,
    state: GameState,
    triggered_mine: Option<CellIndex>,
}

/// Board and mask validate themselves; this checks that they belong together.
impl TryFrom<SessionSnapshot> for GameSession {
    type Error = GameError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self> {
        let SessionSnapshot {
            difficulty,
            board,
            engine,
            state,
            triggered_mine,
        } = snapshot;

        let mask = engine.mask();
        if mask.dim() != board.dim() {
            return Err(GameError::InvalidBoardShape);
        }
        let mask_matches_board = mask.iter().zip(board.iter()).all(|(seen, cell)| match seen {
            VisibleCell::Hidden => true,
            VisibleCell::Revealed(count) => cell == BoardCell::Count(count),
        });
        if !mask_matches_board {
            return Err(GameError::InvalidBoardShape);
        }
        if let Some(index) = triggered_mine
            && !board.contains_mine(index)
        {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            difficulty,
            board,
            engine,
            state,
            triggered_mine,
        })
    }
}

impl GameSession {
    /// Generates a fresh board for `difficulty`.
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        log::debug!("New {:?} game, seed {}", difficulty, seed);
        let board = RandomBoardGenerator::new(seed).generate_for(difficulty);
        Self {
            difficulty: Some(difficulty),
            ..Self::from_board(board)
        }
    }

    /// Starts a game on a prepared board.
    pub fn from_board(board: Board) -> Self {
        let engine = RevealEngine::new(&board);
        Self {
            difficulty: None,
            board,
            engine,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Preset this session was generated from, `None` for prepared boards.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.board.game_config()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn dim(&self) -> Coord {
        self.board.dim()
    }

    pub fn total_cells(&self) -> CellCount {
        self.board.total_cells()
    }

    pub fn visibility(&self) -> &VisibilityMask {
        self.engine.mask()
    }

    pub fn full_board(&self) -> &Board {
        &self.board
    }

    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let index = self.board.validate_index(index)?;
        if self.engine.mask().is_revealed(index) {
            return Ok(NoChange);
        }
        self.check_not_finished()?;

        let outcome = self.engine.reveal(&self.board, index)?;
        match outcome {
            Loss => {
                self.triggered_mine = Some(index);
                self.end_game(false);
            }
            Win => self.end_game(true),
            Continue => self.mark_started(),
            NoChange => {}
        }
        Ok(outcome)
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = GameState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!(
            "Game ended {:?} with {} of {} safe cells revealed",
            self.state,
            self.engine.mask().revealed_count(),
            self.board.safe_cell_count()
        );
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
