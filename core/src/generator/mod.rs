use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;

    fn generate_for(self, difficulty: Difficulty) -> Board
    where
        Self: Sized,
    {
        self.generate(difficulty.into())
    }
}
