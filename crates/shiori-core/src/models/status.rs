use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShioriError;

/// User's watch status for a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusLabel {
    Watching,
    Dropped,
    #[serde(rename = "Plan to Watch")]
    PlanToWatch,
    Completed,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "Watching",
            Self::Dropped => "Dropped",
            Self::PlanToWatch => "Plan to Watch",
            Self::Completed => "Completed",
        }
    }

    /// Storage representation (lowercase, no spaces).
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Dropped => "dropped",
            Self::PlanToWatch => "plan_to_watch",
            Self::Completed => "completed",
        }
    }

    /// Parse either the display or the storage spelling.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| s == label.as_str() || s == label.as_db_str())
    }

    pub const ALL: &[StatusLabel] = &[
        Self::Watching,
        Self::Dropped,
        Self::PlanToWatch,
        Self::Completed,
    ];
}

impl FromStr for StatusLabel {
    type Err = ShioriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ShioriError::InvalidLabel(s.to_string()))
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
