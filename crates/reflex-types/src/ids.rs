//! Type-safe identifier wrappers around [`Uuid`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one played episode in recorded results.
///
/// Uses UUID v7 so identifiers sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpisodeId(pub Uuid);

impl EpisodeId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EpisodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let first = EpisodeId::new();
        let second = EpisodeId::new();
        assert_ne!(first, second);
    }
}
