//! Result limit for list operations

use serde::{Deserialize, Serialize};

/// Default number of rows returned by list operations
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum number of rows a single list may return
const MAX_LIMIT: u32 = 1000;

/// Row cap bound as the final `LIMIT` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit(u32);

impl Limit {
    /// Create a limit, clamped to `0..=1000`.
    pub fn new(limit: u32) -> Self {
        Self(limit.min(MAX_LIMIT))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Value to bind for `LIMIT $n` (Postgres expects int8).
    pub fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl From<u32> for Limit {
    fn from(limit: u32) -> Self {
        Self::new(limit)
    }
}

impl From<Option<u32>> for Limit {
    fn from(limit: Option<u32>) -> Self {
        limit.map(Self::new).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ten() {
        assert_eq!(Limit::default().get(), 10);
        assert_eq!(Limit::from(None::<u32>).get(), 10);
    }

    #[test]
    fn clamps_upper_bound() {
        assert_eq!(Limit::new(5).get(), 5);
        assert_eq!(Limit::new(50_000).get(), 1000);
    }

    #[test]
    fn binds_as_i64() {
        assert_eq!(Limit::from(Some(7)).as_i64(), 7i64);
    }
}
