use alloc::vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owns the [`VisibilityMask`] and applies reveals to it against a [`Board`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealEngine {
    mask: VisibilityMask,
}

impl RevealEngine {
    pub fn new(board: &Board) -> Self {
        Self {
            mask: VisibilityMask::new(board.dim()),
        }
    }

    pub fn mask(&self) -> &VisibilityMask {
        &self.mask
    }

    /// Reveals the cell at `index`.
    ///
    /// A mine is reported as [`RevealOutcome::Loss`] and never marked in the
    /// mask. A zero cell opens its whole zero region plus the numbered cells
    /// bordering it. `board` must be the one the engine was created for.
    pub fn reveal(&mut self, board: &Board, index: CellIndex) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        if board.dim() != self.mask.dim() {
            return Err(GameError::InvalidBoardShape);
        }
        let index = board.validate_index(index)?;

        match board[index] {
            BoardCell::Mine => {
                log::debug!("Mine hit at {}", index);
                return Ok(Loss);
            }
            BoardCell::Count(_) if self.mask.is_revealed(index) => return Ok(NoChange),
            BoardCell::Count(0) => self.flood_fill(board, index),
            BoardCell::Count(count) => {
                self.mask.reveal(index, count);
                log::debug!("Revealed {}, mine count: {}", index, count);
            }
        }

        if self.mask.revealed_count() == board.safe_cell_count() {
            Ok(Win)
        } else {
            Ok(Continue)
        }
    }

    /// Opens every cell reachable from `start` through zero cells. The mask
    /// doubles as the visited set, so each cell is handled at most once.
    fn flood_fill(&mut self, board: &Board, start: CellIndex) {
        let before = self.mask.revealed_count();
        let mut to_visit = vec![start];

        while let Some(index) = to_visit.pop() {
            let Some(count) = board[index].count() else {
                continue;
            };

            if !self.mask.reveal(index, count) {
                continue;
            }
            log::trace!("Flood revealed {}, mine count: {}", index, count);

            if count == 0 {
                to_visit.extend(
                    board
                        .neighbors(index)
                        .filter(|&neighbor| !self.mask.is_revealed(neighbor)),
                );
            }
        }

        log::debug!(
            "Flood fill from {} revealed {} cells",
            start,
            self.mask.revealed_count() - before
        );
    }
}
