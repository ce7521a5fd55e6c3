#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod difficulty;
mod engine;
mod error;
mod generator;
mod session;
mod tile;
mod types;

/// Square grid dimension and mine count a board is generated from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub dim: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(dim: Coord, mines: CellCount) -> Self {
        Self { dim, mines }
    }

    pub fn new(dim: Coord, mines: CellCount) -> Self {
        let dim = dim.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, mult(dim, dim));
        Self::new_unchecked(dim, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.dim, self.dim)
    }
}

/// Immutable ground truth of a game: every cell is either a mine or the
/// number of mines around it. Cells are stored row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    dim: Coord,
    cells: Array2<BoardCell>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct BoardSnapshot {
    dim: Coord,
    cells: Array2<BoardCell>,
    mine_count: CellCount,
}

/// Accepts a snapshot only if recomputing it from its mines gives it back.
impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let dim = usize::from(snapshot.dim);
        if snapshot.cells.dim() != (dim, dim) {
            return Err(GameError::InvalidBoardShape);
        }

        let flags: Vec<bool> = snapshot.cells.iter().map(|cell| cell.is_mine()).collect();
        let board = Self::from_mine_flags(snapshot.dim, &flags);
        if board.cells != snapshot.cells || board.mine_count != snapshot.mine_count {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(board)
    }
}

impl Board {
    /// Builds a board from one flag per linear index, `true` meaning mine.
    /// Missing trailing flags count as safe cells.
    pub(crate) fn from_mine_flags(dim: Coord, flags: &[bool]) -> Self {
        let is_mine = |index: CellIndex| flags.get(index).copied().unwrap_or(false);
        let cells = Array2::from_shape_fn((usize::from(dim), usize::from(dim)), |(row, col)| {
            let index = row * usize::from(dim) + col;
            if is_mine(index) {
                BoardCell::Mine
            } else {
                let count = NeighborIter::new(index, dim)
                    .filter(|&neighbor| is_mine(neighbor))
                    .count();
                BoardCell::Count(count as u8)
            }
        });
        let mine_count = cells.iter().filter(|cell| cell.is_mine()).count() as CellCount;

        Self {
            dim,
            cells,
            mine_count,
        }
    }

    /// Builds a `dim x dim` board with mines at the given linear indices.
    pub fn from_mine_indices(dim: Coord, mine_indices: &[CellIndex]) -> Result<Self> {
        let total_cells = usize::from(mult(dim, dim));
        let mut flags = vec![false; total_cells];

        for &index in mine_indices {
            *flags.get_mut(index).ok_or(GameError::IndexOutOfRange)? = true;
        }

        Ok(Self::from_mine_flags(dim, &flags))
    }

    /// Board where every cell is a mine.
    pub(crate) fn full(dim: Coord) -> Self {
        Self::from_mine_flags(dim, &vec![true; usize::from(mult(dim, dim))])
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.dim, self.mine_count)
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.cells.len() {
            Ok(index)
        } else {
            Err(GameError::IndexOutOfRange)
        }
    }

    pub fn dim(&self) -> Coord {
        self.dim
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.dim, self.dim)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn get(&self, index: CellIndex) -> Option<BoardCell> {
        let index = self.validate_index(index).ok()?;
        Some(self.cells[coords_of(index, self.dim).to_nd_index()])
    }

    pub fn contains_mine(&self, index: CellIndex) -> bool {
        self.get(index).is_some_and(BoardCell::is_mine)
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = BoardCell> + '_ {
        self.cells.iter().copied()
    }

    pub fn mine_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(index, _)| index)
    }

    pub fn neighbors(&self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(index, self.dim)
    }
}

impl Index<CellIndex> for Board {
    type Output = BoardCell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        assert!(index < self.cells.len(), "cell index {index} out of range");
        &self.cells[coords_of(index, self.dim).to_nd_index()]
    }
}

/// What the player can see. Starts fully hidden and only ever gains
/// revealed cells; mutated by [`RevealEngine`] alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MaskSnapshot")]
pub struct VisibilityMask {
    dim: Coord,
    cells: Array2<VisibleCell>,
    revealed_count: CellCount,
}

#[derive(Deserialize)]
struct MaskSnapshot {
    dim: Coord,
    cells: Array2<VisibleCell>,
    revealed_count: CellCount,
}

impl TryFrom<MaskSnapshot> for VisibilityMask {
    type Error = GameError;

    fn try_from(snapshot: MaskSnapshot) -> Result<Self> {
        let dim = usize::from(snapshot.dim);
        let visible = snapshot.cells.iter().filter(|cell| !cell.is_hidden()).count();
        if snapshot.cells.dim() != (dim, dim) || visible != usize::from(snapshot.revealed_count) {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            dim: snapshot.dim,
            cells: snapshot.cells,
            revealed_count: snapshot.revealed_count,
        })
    }
}

impl VisibilityMask {
    pub(crate) fn new(dim: Coord) -> Self {
        Self {
            dim,
            cells: Array2::default((usize::from(dim), usize::from(dim))),
            revealed_count: 0,
        }
    }

    pub fn dim(&self) -> Coord {
        self.dim
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.dim, self.dim)
    }

    /// Number of cells that are no longer hidden.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn get(&self, index: CellIndex) -> Option<VisibleCell> {
        if index < self.cells.len() {
            Some(self.cells[coords_of(index, self.dim).to_nd_index()])
        } else {
            None
        }
    }

    pub fn is_revealed(&self, index: CellIndex) -> bool {
        self.get(index).is_some_and(|cell| !cell.is_hidden())
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = VisibleCell> + '_ {
        self.cells.iter().copied()
    }

    /// Marks a hidden cell revealed, returns whether anything changed.
    pub(crate) fn reveal(&mut self, index: CellIndex, count: u8) -> bool {
        let cell = &mut self.cells[coords_of(index, self.dim).to_nd_index()];
        if cell.is_hidden() {
            *cell = VisibleCell::Revealed(count);
            self.revealed_count += 1;
            true
        } else {
            false
        }
    }
}

impl Index<CellIndex> for VisibilityMask {
    type Output = VisibleCell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        assert!(index < self.cells.len(), "cell index {index} out of range");
        &self.cells[coords_of(index, self.dim).to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Target was already revealed.
    NoChange,
    /// Safe cells were revealed and the game goes on.
    Continue,
    /// Every safe cell is now revealed.
    Win,
    /// Target is a mine.
    Loss,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Continue => true,
            Win => true,
            Loss => true,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_new_clamps_dimension_and_mines() {
        assert_eq!(GameConfig::new(0, 0), GameConfig::new_unchecked(1, 1));
        assert_eq!(GameConfig::new(3, 100), GameConfig::new_unchecked(3, 9));
        assert_eq!(GameConfig::new(15, 40).total_cells(), 225);
    }

    #[test]
    fn counts_follow_adjacency() {
        // M 2 1
        // 2 M 1
        // 1 1 1
        let board = Board::from_mine_indices(3, &[0, 4]).unwrap();
        let cells: Vec<_> = board.iter().collect();

        use BoardCell::*;
        assert_eq!(
            cells,
            [
                Mine,
                Count(2),
                Count(1),
                Count(2),
                Mine,
                Count(1),
                Count(1),
                Count(1),
                Count(1)
            ]
        );
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 7);
    }

    #[test]
    fn counts_ignore_row_wraparound() {
        // mine at the end of row 0 must not count for the start of row 1
        let board = Board::from_mine_indices(4, &[3]).unwrap();

        assert_eq!(board[4], BoardCell::Count(0));
        assert_eq!(board[2], BoardCell::Count(1));
        assert_eq!(board[7], BoardCell::Count(1));
    }

    #[test]
    fn duplicate_mine_indices_collapse() {
        let board = Board::from_mine_indices(3, &[5, 5, 5]).unwrap();

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.mine_indices().collect::<Vec<_>>(), [5]);
    }

    #[test]
    fn from_mine_indices_rejects_out_of_range() {
        assert_eq!(
            Board::from_mine_indices(3, &[9]),
            Err(GameError::IndexOutOfRange)
        );
    }

    #[test]
    fn get_is_bounded() {
        let board = Board::from_mine_indices(2, &[0]).unwrap();

        assert_eq!(board.get(3), Some(BoardCell::Count(1)));
        assert_eq!(board.get(4), None);
        // would alias back onto the grid if coordinates were narrowed first
        assert_eq!(board.get(2 * 256), None);
        assert!(board.contains_mine(0));
        assert!(!board.contains_mine(4));
    }

    fn board_json(board: &Board) -> serde_json::Value {
        serde_json::to_value(board).unwrap()
    }

    #[test]
    fn board_snapshot_restores() {
        let board = Board::from_mine_indices(3, &[0, 4]).unwrap();

        let restored: Board = serde_json::from_value(board_json(&board)).unwrap();

        assert_eq!(restored, board);
    }

    #[test]
    fn board_snapshot_rejects_wrong_mine_count() {
        let mut json = board_json(&Board::from_mine_indices(3, &[0, 4]).unwrap());
        json["mine_count"] = serde_json::json!(3);

        assert!(serde_json::from_value::<Board>(json).is_err());
    }

    #[test]
    fn board_snapshot_rejects_wrong_dim() {
        let mut json = board_json(&Board::from_mine_indices(3, &[0, 4]).unwrap());
        json["dim"] = serde_json::json!(4);

        assert!(serde_json::from_value::<Board>(json).is_err());
    }

    #[test]
    fn board_snapshot_rejects_inconsistent_counts() {
        let mut json = board_json(&Board::from_mine_indices(3, &[0, 4]).unwrap());
        json["cells"]["data"][8] = serde_json::json!({ "Count": 5 });

        assert!(serde_json::from_value::<Board>(json).is_err());
    }

    #[test]
    fn mask_snapshot_rejects_wrong_revealed_count() {
        let mut json = serde_json::to_value(VisibilityMask::new(3)).unwrap();
        json["revealed_count"] = serde_json::json!(1);

        assert!(serde_json::from_value::<VisibilityMask>(json.clone()).is_err());

        json["cells"]["data"][2] = serde_json::json!({ "Revealed": 1 });
        let mask: VisibilityMask = serde_json::from_value(json).unwrap();
        assert!(mask.is_revealed(2));
    }

    #[test]
    fn mask_starts_hidden() {
        let mask = VisibilityMask::new(3);

        assert_eq!(mask.revealed_count(), 0);
        assert!(mask.iter().all(VisibleCell::is_hidden));
        assert_eq!(mask.get(9), None);
    }

    #[test]
    fn outcome_updates() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Continue.has_update());
        assert!(RevealOutcome::Loss.is_final());
        assert!(!RevealOutcome::Continue.is_final());
    }
}
