//! Which side of the battle an aura applies to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Side filter for an aura.
///
/// Encoded on the wire as a small signed integer (`-1` enemy, `0` all,
/// `1` player) to stay compatible with persisted encounter data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum TeamTarget {
    Enemy,
    #[default]
    All,
    Player,
}

impl TeamTarget {
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Enemy => -1,
            Self::All => 0,
            Self::Player => 1,
        }
    }

    /// `All` matches either side; `Player`/`Enemy` match only their own side.
    pub fn matches_side(self, is_player_side: bool) -> bool {
        match self {
            Self::All => true,
            Self::Player => is_player_side,
            Self::Enemy => !is_player_side,
        }
    }
}

impl fmt::Display for TeamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enemy => "enemy",
            Self::All => "all",
            Self::Player => "player",
        };
        write!(f, "{}", name)
    }
}

impl From<TeamTarget> for i8 {
    fn from(team: TeamTarget) -> Self {
        team.as_i8()
    }
}

impl TryFrom<i8> for TeamTarget {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Enemy),
            0 => Ok(Self::All),
            1 => Ok(Self::Player),
            other => Err(DomainError::validation(format!(
                "Team target must be -1, 0 or 1, got {}",
                other
            ))),
        }
    }
}
