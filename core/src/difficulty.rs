use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board size presets offered to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 3x3, 2 mines
    Small,
    /// 8x8, 10 mines
    Medium,
    /// 15x15, 40 mines
    Large,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Small => GameConfig::new_unchecked(3, 2),
            Medium => GameConfig::new_unchecked(8, 10),
            Large => GameConfig::new_unchecked(15, 40),
        }
    }

    /// Single-letter token accepted by [`FromStr`].
    pub const fn token(self) -> &'static str {
        use Difficulty::*;
        match self {
            Small => "S",
            Medium => "M",
            Large => "L",
        }
    }

    const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Small => "small",
            Medium => "medium",
            Large => "large",
        }
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| {
                s.eq_ignore_ascii_case(difficulty.token())
                    || s.eq_ignore_ascii_case(difficulty.name())
            })
            .ok_or(GameError::InvalidDifficulty)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let GameConfig { dim, mines } = self.config();
        write!(f, "{} : {dim} x {dim}, {mines} mines", self.token())
    }
}
