use async_trait::async_trait;

use crate::types::{Article, ArticleId, NewArticle};
use crate::Result;

/// The remote article store: a read-only `articles` collection and a
/// writable `curated_list` collection.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All articles, identifier descending
    async fn fetch_articles(&self) -> Result<Vec<Article>>;

    /// The curated list, identifier descending
    async fn fetch_curated(&self) -> Result<Vec<Article>>;

    /// Delete every curated entry
    async fn clear_curated(&self) -> Result<()>;

    /// Insert a batch of records; the store assigns their identifiers
    async fn insert_curated(&self, articles: &[NewArticle]) -> Result<()>;

    /// Delete a single curated entry by its identifier
    async fn delete_curated(&self, id: ArticleId) -> Result<()>;

    /// Make the curated list hold exactly `articles`.
    ///
    /// The default clears and then inserts as two separate requests, so a
    /// failed insert leaves the list empty. Backends with transactions
    /// override this to apply both steps atomically.
    async fn replace_curated(&self, articles: &[NewArticle]) -> Result<()> {
        self.clear_curated().await?;
        if !articles.is_empty() {
            self.insert_curated(articles).await?;
        }
        Ok(())
    }
}
