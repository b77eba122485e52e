use std::fmt;
use std::str::FromStr;

use crate::source::extract_source;
use crate::types::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    /// Source label derived from the article link, compared case-insensitively.
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Defaults to identifier descending, the order the store lists in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Returns `articles` ordered for display. The input is left untouched and
/// equal keys keep their input order.
pub fn sort_articles(articles: &[Article], order: SortOrder) -> Vec<&Article> {
    let mut keyed: Vec<(SortValue, &Article)> = articles
        .iter()
        .map(|article| (SortValue::of(article, order.key), article))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.cmp(b);
        match order.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(_, article)| article).collect()
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Id(i64),
    Source(String),
}

impl SortValue {
    fn of(article: &Article, key: SortKey) -> Self {
        match key {
            SortKey::Id => Self::Id(article.id),
            SortKey::Source => Self::Source(extract_source(&article.link).to_lowercase()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::Source => write!(f, "source"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" | "index" => Ok(Self::Id),
            "source" => Ok(Self::Source),
            other => Err(format!("Invalid sort key: {} (expected id or source)", other)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("Invalid sort direction: {} (expected asc or desc)", other)),
        }
    }
}
