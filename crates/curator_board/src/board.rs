use std::sync::Arc;

use curator_core::{sort_articles, Article, ArticleId, ArticleStore, SelectionSet, SortOrder};

use crate::logging::Logger;
use crate::notice::Notice;
use crate::reconcile::CurationReconciler;

/// View state for one curation screen: both article collections, the
/// current selection and the loading flag.
///
/// Store failures never escape the board. They are logged, the affected
/// collection keeps its previous contents, and actions report `false` or an
/// error [`Notice`].
pub struct ArticleBoard {
    store: Arc<dyn ArticleStore>,
    articles: Vec<Article>,
    curated: Vec<Article>,
    selection: SelectionSet,
    loading: bool,
    articles_stale: bool,
    logger: Logger,
}

impl ArticleBoard {
    /// A board that has not loaded yet.
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self {
            store,
            articles: Vec::new(),
            curated: Vec::new(),
            selection: SelectionSet::new(),
            loading: true,
            articles_stale: true,
            logger: Logger::new().with_prefix("📋".to_string()),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Fetches both collections concurrently and marks the board ready.
    pub async fn load(&mut self) {
        self.loading = true;
        self.refetch().await;
        self.loading = false;
        self.logger.info(&format!(
            "Loaded {} article(s), {} curated",
            self.articles.len(),
            self.curated.len()
        ));
    }

    /// Re-reads both collections, waiting for both requests.
    pub async fn refetch(&mut self) {
        let (articles, curated) =
            tokio::join!(self.store.fetch_articles(), self.store.fetch_curated());

        match articles {
            Ok(articles) => {
                self.articles = articles;
                self.articles_stale = false;
            }
            Err(e) => {
                self.articles_stale = true;
                self.logger.error(&format!("Error fetching articles: {}", e));
            }
        }
        match curated {
            Ok(curated) => self.curated = curated,
            Err(e) => self.logger.error(&format!("Error fetching curated articles: {}", e)),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True until the article collection has been read, and again after a
    /// failed read.
    pub fn articles_stale(&self) -> bool {
        self.articles_stale
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn curated(&self) -> &[Article] {
        &self.curated
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn sorted_articles(&self, order: SortOrder) -> Vec<&Article> {
        sort_articles(&self.articles, order)
    }

    pub fn sorted_curated(&self, order: SortOrder) -> Vec<&Article> {
        sort_articles(&self.curated, order)
    }

    pub fn toggle_article_selection(&mut self, id: ArticleId) -> bool {
        self.selection.toggle(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: ArticleId) -> bool {
        self.selection.is_selected(id)
    }

    /// Replaces the remote curated list with the articles in `selected` and
    /// refreshes the local copy. An empty set clears the list.
    ///
    /// Returns `false` if any step failed; the local curated list is then left
    /// as it was, while the remote one may already have been cleared. A
    /// non-empty selection is refused outright while the articles are stale.
    pub async fn set_curated_list(&mut self, selected: &SelectionSet) -> bool {
        if self.articles_stale && !selected.is_empty() {
            self.logger.error("Refusing to set curated list: articles are not loaded");
            return false;
        }
        let reconciler = CurationReconciler::new(self.store.as_ref());
        match reconciler.set_curated_list(&self.articles, selected).await {
            Ok(curated) => {
                self.curated = curated;
                true
            }
            Err(e) => {
                self.logger.error(&format!("Error setting curated list: {}", e));
                false
            }
        }
    }

    /// Deletes one entry from the curated list and refreshes the local copy.
    pub async fn remove_from_curated_list(&mut self, id: ArticleId) -> bool {
        let reconciler = CurationReconciler::new(self.store.as_ref());
        match reconciler.remove_from_curated_list(id).await {
            Ok(curated) => {
                self.curated = curated;
                true
            }
            Err(e) => {
                self.logger.error(&format!("Error removing from curated list: {}", e));
                false
            }
        }
    }

    /// Pushes the current selection and clears it on success.
    pub async fn curate(&mut self) -> Notice {
        let selected = self.selection.clone();
        if !self.set_curated_list(&selected).await {
            return Notice::error("Error", "Failed to update curated list. Please try again.");
        }

        self.clear_selection();
        if selected.is_empty() {
            Notice::success(
                "Curated list cleared",
                "Removed every article from your curated list.",
            )
        } else {
            Notice::success(
                "Articles curated!",
                format!("Curated list now holds {} article(s).", self.curated.len()),
            )
        }
    }

    pub async fn remove(&mut self, id: ArticleId) -> Notice {
        if self.remove_from_curated_list(id).await {
            Notice::success(
                "Article removed",
                "Article has been removed from your curated list.",
            )
        } else {
            Notice::error("Error", "Failed to remove article. Please try again.")
        }
    }
}
