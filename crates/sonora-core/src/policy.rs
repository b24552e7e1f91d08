use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// How a recommendation query removes the queried track from its own results.
///
/// Exactly one ranked entry is removed either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfExclusion {
    /// Remove the queried track's own position, wherever it ranks.
    #[default]
    Identity,
    /// Remove whatever ranks first. When another track ties the queried
    /// track's top score, the queried track may survive into its own list.
    RankZero,
}

impl SelfExclusion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::RankZero => "rank-zero",
        }
    }
}

impl fmt::Display for SelfExclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelfExclusion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "identity" => Ok(Self::Identity),
            "rank-zero" | "rank_zero" => Ok(Self::RankZero),
            other => Err(Error::InvalidData(format!(
                "unknown self-exclusion policy '{other}' (expected identity or rank-zero)"
            ))),
        }
    }
}
