//! Usage counter

use serde::{Deserialize, Serialize};

/// Total number of successful compiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Compiles recorded so far
    #[serde(default)]
    pub total: u64,
}

impl UsageStats {
    /// Count one compile
    pub fn increment(self) -> Self {
        self.increment_by(1)
    }

    /// Count `n` compiles
    pub fn increment_by(self, n: u64) -> Self {
        Self {
            total: self.total.saturating_add(n),
        }
    }
}
