use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One-based position of a question in the study calendar.
///
/// Progress maps are keyed by `Day`, so the serde form is the bare number
/// (JSON object keys become `"3"`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(u32);

impl Day {
    /// Creates a new `Day`
    #[must_use]
    pub fn new(day: u32) -> Self {
        Self(day)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The following day.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding day, or `None` on day 1 (or the invalid day 0).
    #[must_use]
    pub fn prev(&self) -> Option<Self> {
        (self.0 > 1).then(|| Self(self.0 - 1))
    }
}

/// Identifier of a quiz question, as issued by whichever store produced it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque identity of an authenticated user.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day({})", self.0)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for Day {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|day| *day > 0)
            .map(Day::new)
            .ok_or_else(|| ParseIdError {
                kind: "Day".to_string(),
            })
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError {
                kind: "UserId".to_string(),
            });
        }
        Ok(UserId::new(trimmed))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_display() {
        let day = Day::new(42);
        assert_eq!(day.to_string(), "42");
    }

    #[test]
    fn test_day_from_str() {
        let day: Day = "12".parse().unwrap();
        assert_eq!(day, Day::new(12));
    }

    #[test]
    fn test_day_from_str_rejects_zero_and_garbage() {
        assert!("0".parse::<Day>().is_err());
        assert!("day-one".parse::<Day>().is_err());
    }

    #[test]
    fn test_day_navigation() {
        assert_eq!(Day::new(1).prev(), None);
        assert_eq!(Day::new(2).prev(), Some(Day::new(1)));
        assert_eq!(Day::new(2).next(), Day::new(3));
    }

    #[test]
    fn test_user_id_from_str_trims() {
        let id: UserId = "  abc-123 ".parse().unwrap();
        assert_eq!(id.as_str(), "abc-123");
        assert!("   ".parse::<UserId>().is_err());
    }

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new("preflop-1");
        assert_eq!(id.to_string(), "preflop-1");
        assert_eq!(format!("{id:?}"), "QuestionId(preflop-1)");
    }
}
