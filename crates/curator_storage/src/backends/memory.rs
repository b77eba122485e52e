use async_trait::async_trait;
use curator_core::{Article, ArticleId, ArticleStore, NewArticle, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::{StoreBackend, StoreOptions};

#[derive(Default)]
struct MemoryCollections {
    articles: Vec<Article>,
    curated: Vec<Article>,
    next_curated_id: ArticleId,
}

impl MemoryCollections {
    fn newest_first(articles: &[Article]) -> Vec<Article> {
        let mut articles = articles.to_vec();
        articles.sort_by(|a, b| b.id.cmp(&a.id));
        articles
    }

    fn insert_articles(&mut self, articles: Vec<Article>) {
        for article in articles {
            if let Some(existing) = self.articles.iter_mut().find(|a| a.id == article.id) {
                *existing = article;
            } else {
                self.articles.push(article);
            }
        }
    }

    fn insert_curated(&mut self, articles: &[NewArticle]) {
        for article in articles {
            self.next_curated_id += 1;
            self.curated.push(article.clone().with_id(self.next_curated_id));
        }
    }

    fn clear_curated(&mut self) {
        self.curated.clear();
    }

    fn delete_curated(&mut self, id: ArticleId) {
        self.curated.retain(|a| a.id != id);
    }
}

/// Keeps both collections in process memory. Curated identifiers are
/// assigned from a counter that never reuses a value.
#[derive(Clone)]
pub struct InMemoryStore {
    store: Arc<RwLock<MemoryCollections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_articles(Vec::new())
    }

    pub fn with_articles(articles: Vec<Article>) -> Self {
        let mut collections = MemoryCollections::default();
        collections.insert_articles(articles);
        Self {
            store: Arc::new(RwLock::new(collections)),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    fn get_error_message() -> &'static str {
        "Memory store should be available"
    }

    async fn connect(_options: &StoreOptions) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl ArticleStore for InMemoryStore {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(MemoryCollections::newest_first(&store.articles))
    }

    async fn fetch_curated(&self) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(MemoryCollections::newest_first(&store.curated))
    }

    async fn clear_curated(&self) -> Result<()> {
        self.store.write().await.clear_curated();
        Ok(())
    }

    async fn insert_curated(&self, articles: &[NewArticle]) -> Result<()> {
        self.store.write().await.insert_curated(articles);
        Ok(())
    }

    async fn delete_curated(&self, id: ArticleId) -> Result<()> {
        self.store.write().await.delete_curated(id);
        Ok(())
    }

    async fn replace_curated(&self, articles: &[NewArticle]) -> Result<()> {
        let mut store = self.store.write().await;
        store.clear_curated();
        store.insert_curated(articles);
        Ok(())
    }
}
