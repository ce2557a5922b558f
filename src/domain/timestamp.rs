//! Invocation timestamp tokens.

use std::fmt;

use chrono::Local;

/// Opaque token generated once per invocation and used to namespace artifact
/// directories, so successive runs of the same operation never collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampToken(String);

impl TimestampToken {
    /// Token for the current local time, second resolution.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().format("%Y%m%d%H%M%S").to_string())
    }

    /// Fixed token for tests and replays.
    #[must_use]
    pub fn fixed(value: &str) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimestampToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
