//! Category value object classifying a joke

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Joke category (Value Object)
///
/// A closed set of tags plus [`Category::Default`], which doubles as the
/// "no preference" filter and the fallback when a hint matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Chicken,
    Anti,
    Lawyer,
    #[default]
    Default,
}

impl Category {
    /// Categories in resolution priority order.
    pub const ALL: [Category; 4] = [
        Category::Chicken,
        Category::Anti,
        Category::Lawyer,
        Category::Default,
    ];

    /// Get the string identifier for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Chicken => "chicken",
            Category::Anti => "anti",
            Category::Lawyer => "lawyer",
            Category::Default => "default",
        }
    }

    /// Token a normalized hint must equal to select this category.
    ///
    /// `Default` is never matched by a hint; it is only the fallback.
    pub fn match_token(&self) -> Option<&'static str> {
        match self {
            Category::Default => None,
            other => Some(other.as_str()),
        }
    }

    /// Key of the image shown alongside the punchline
    pub fn image_key(&self) -> &'static str {
        match self {
            Category::Chicken => "chicken",
            Category::Anti => "antijoke_cat",
            Category::Lawyer => "judge_judy",
            Category::Default => "joke_icon",
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Category::Default)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
