use curator_core::{Article, ArticleId, ArticleStore, Error, NewArticle, Result, SelectionSet};
use tracing::info;

/// Makes the remote curated list match a selection.
///
/// Every push replaces the whole list: the store is cleared, the selected
/// articles are copied in without their identifiers, and the list is read
/// back. An empty selection clears the list.
pub struct CurationReconciler<'a> {
    store: &'a dyn ArticleStore,
}

impl<'a> CurationReconciler<'a> {
    pub fn new(store: &'a dyn ArticleStore) -> Self {
        Self { store }
    }

    /// Pushes `selected` and returns the curated list as the store now holds it.
    ///
    /// `articles` is the snapshot the selection refers to. A selection naming
    /// ids the snapshot does not hold is refused before the store is touched.
    pub async fn set_curated_list(
        &self,
        articles: &[Article],
        selected: &SelectionSet,
    ) -> Result<Vec<Article>> {
        let missing = missing_ids(articles, selected);
        if !missing.is_empty() {
            return Err(Error::Storage(format!(
                "unknown article id(s) {:?} among {} loaded articles",
                missing,
                articles.len()
            )));
        }
        let records = curation_records(articles, selected);

        info!("🗂️ Replacing curated list with {} article(s)", records.len());
        self.store.replace_curated(&records).await?;

        let curated = self.store.fetch_curated().await?;
        info!("✨ Curated list now holds {} article(s)", curated.len());
        Ok(curated)
    }

    /// Deletes one curated entry and returns the refreshed list.
    pub async fn remove_from_curated_list(&self, id: ArticleId) -> Result<Vec<Article>> {
        info!("🗑️ Removing curated article {}", id);
        self.store.delete_curated(id).await?;
        self.store.fetch_curated().await
    }
}

/// Selected ids with no article in the snapshot.
pub fn missing_ids(articles: &[Article], selected: &SelectionSet) -> Vec<ArticleId> {
    selected
        .iter()
        .filter(|id| !articles.iter().any(|article| article.id == *id))
        .collect()
}

/// The selected articles, stripped of the identifiers the curated collection
/// will reassign.
pub fn curation_records(articles: &[Article], selected: &SelectionSet) -> Vec<NewArticle> {
    articles
        .iter()
        .filter(|article| selected.is_selected(article.id))
        .map(Article::to_new)
        .collect()
}
