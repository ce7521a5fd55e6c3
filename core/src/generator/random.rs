use alloc::vec;

use super::*;

/// Purely random placement: draws uniform indices and rejects the ones that
/// already hold a mine until the requested count is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let total_cells = config.total_cells();

        // rejection sampling never finishes on a full board
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Board already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return Board::full(config.dim);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_flags = vec![false; usize::from(total_cells)];
        let mut mines_placed: CellCount = 0;
        let mut draws: u32 = 0;

        while mines_placed < config.mines {
            let index: CellIndex = rng.random_range(0..usize::from(total_cells));
            draws += 1;
            if mine_flags[index] {
                continue;
            }
            mine_flags[index] = true;
            mines_placed += 1;
        }

        log::debug!(
            "Generated {}x{} board with {} mines after {} draws",
            config.dim,
            config.dim,
            mines_placed,
            draws
        );
        Board::from_mine_flags(config.dim, &mine_flags)
    }
}
