use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category label cannot be empty")]
    Empty,
}

/// Normalized (trimmed, lowercase) category label.
///
/// Street categories come from the bundled catalog, tournament-stage
/// categories from the hosted question table. Any other non-empty label is
/// accepted and displayed verbatim.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// # Errors
    ///
    /// Returns `CategoryError::Empty` when the label is blank.
    pub fn new(label: impl AsRef<str>) -> Result<Self, CategoryError> {
        let normalized = label.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CategoryError::Empty);
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn preflop() -> Self {
        Self("preflop".into())
    }

    #[must_use]
    pub fn flop() -> Self {
        Self("flop".into())
    }

    #[must_use]
    pub fn turn() -> Self {
        Self("turn".into())
    }

    #[must_use]
    pub fn river() -> Self {
        Self("river".into())
    }

    #[must_use]
    pub fn icm() -> Self {
        Self("icm".into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label for known categories.
    #[must_use]
    pub fn display_label(&self) -> &str {
        match self.0.as_str() {
            "preflop" => "Preflop",
            "flop" => "Flop",
            "turn" => "Turn",
            "river" => "River",
            "icm" => "ICM",
            "showdown" => "Showdown",
            "early" => "Early stage",
            "middle" => "Middle stage",
            "late" => "Late stage",
            "bubble" => "Bubble",
            "final" => "Final table",
            other => other,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.display_label() != self.0
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category selection used by list and tab views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parses a tab identifier; `"all"` (or blank) selects everything.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError` when the label cannot be normalized.
    pub fn parse(raw: &str) -> Result<Self, CategoryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Category::new(trimmed).map(Self::Only)
    }

    #[must_use]
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}
