use serde::{Deserialize, Serialize};

use crate::source::extract_source;

/// Store-assigned article identifier. Serialized as `index` on the wire.
pub type ArticleId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "index")]
    pub id: ArticleId,
    pub link: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_snippet: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub should_draft_article: Option<bool>,
}

/// An article record as sent on insert: every field but the identifier,
/// which the destination collection assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    pub link: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_snippet: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub should_draft_article: Option<bool>,
}

impl Article {
    /// Copies the record without its identifier.
    pub fn to_new(&self) -> NewArticle {
        NewArticle {
            link: self.link.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            content_snippet: self.content_snippet.clone(),
            pub_date: self.pub_date.clone(),
            source: self.source.clone(),
            img_url: self.img_url.clone(),
            guid: self.guid.clone(),
            should_draft_article: self.should_draft_article,
        }
    }

    /// The stored source label, or one derived from `link` when the store has none.
    pub fn source_label(&self) -> String {
        match self.source.as_deref() {
            Some(source) if !source.trim().is_empty() => source.to_string(),
            _ => extract_source(&self.link),
        }
    }

    pub fn title_or_default(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled Article",
        }
    }
}

impl NewArticle {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: None,
            content: None,
            content_snippet: None,
            pub_date: None,
            source: None,
            img_url: None,
            guid: None,
            should_draft_article: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attaches a store-assigned identifier.
    pub fn with_id(self, id: ArticleId) -> Article {
        Article {
            id,
            link: self.link,
            title: self.title,
            content: self.content,
            content_snippet: self.content_snippet,
            pub_date: self.pub_date,
            source: self.source,
            img_url: self.img_url,
            guid: self.guid,
            should_draft_article: self.should_draft_article,
        }
    }
}
