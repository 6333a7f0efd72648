use serde::{Deserialize, Serialize};
use std::fmt;

/// Game lifecycle phase.
///
/// Phases only move forward, one step at a time:
/// `Created -> Registration -> Active -> Ended`. Any non-terminal phase may
/// additionally be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Game exists but is not yet open for sign-ups
    #[default]
    Created,
    /// Players can register
    Registration,
    /// Game is running: infections and movement are accepted
    Active,
    /// Game finished normally
    Ended,
    /// Game was called off by an administrator
    Cancelled,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GamePhase {
    /// Convert from database string representation
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "created" => Some(Self::Created),
            "registration" => Some(Self::Registration),
            "active" => Some(Self::Active),
            "ended" => Some(Self::Ended),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Registration => "registration",
            Self::Active => "active",
            Self::Ended => "ended",
            Self::Cancelled => "cancelled",
        }
    }

    /// The only phase reachable through a normal advance, if any.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::Registration),
            Self::Registration => Some(Self::Active),
            Self::Active => Some(Self::Ended),
            Self::Ended | Self::Cancelled => None,
        }
    }

    /// Check if an advance to `target` follows the forward sequence
    #[must_use]
    pub fn can_advance_to(&self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Ended and Cancelled games never change phase again
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }

    /// Check if players can register
    #[must_use]
    pub const fn accepts_registration(&self) -> bool {
        matches!(self, Self::Registration | Self::Active)
    }

    /// Check if the game is running
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}
