use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use curator_board::ArticleBoard;
use curator_core::{Article, ArticleId, ArticleStore, Error, NewArticle, Result, SelectionSet};
use curator_storage::InMemoryStore;
use pretty_assertions::assert_eq;

/// Wraps the memory store with switchable failures. Uses the default,
/// non-atomic `replace_curated`.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryStore,
    fail_fetch_articles: AtomicBool,
    fail_fetch_curated: AtomicBool,
    fail_clear: AtomicBool,
    fail_insert: AtomicBool,
    fail_delete: AtomicBool,
    inserts: AtomicUsize,
}

impl FlakyStore {
    fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            inner: InMemoryStore::with_articles(articles),
            ..Default::default()
        }
    }

    fn check(flag: &AtomicBool, step: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(Error::Storage(format!("{} rejected", step)));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for FlakyStore {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        Self::check(&self.fail_fetch_articles, "fetch")?;
        self.inner.fetch_articles().await
    }

    async fn fetch_curated(&self) -> Result<Vec<Article>> {
        Self::check(&self.fail_fetch_curated, "fetch curated")?;
        self.inner.fetch_curated().await
    }

    async fn clear_curated(&self) -> Result<()> {
        Self::check(&self.fail_clear, "clear")?;
        self.inner.clear_curated().await
    }

    async fn insert_curated(&self, articles: &[NewArticle]) -> Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_insert, "insert")?;
        self.inner.insert_curated(articles).await
    }

    async fn delete_curated(&self, id: ArticleId) -> Result<()> {
        Self::check(&self.fail_delete, "delete")?;
        self.inner.delete_curated(id).await
    }
}

fn article(id: ArticleId) -> Article {
    let mut article = NewArticle::new(format!("https://www.example{}.com/story", id))
        .with_title(format!("Story {}", id))
        .with_id(id);
    article.content_snippet = Some(format!("Snippet {}", id));
    article.guid = Some(format!("guid-{}", id));
    article
}

fn four_articles() -> Vec<Article> {
    (1..=4).map(article).collect()
}

async fn loaded_board(store: Arc<FlakyStore>) -> ArticleBoard {
    let mut board = ArticleBoard::new(store);
    board.load().await;
    board
}

fn content(articles: &[Article]) -> Vec<NewArticle> {
    let mut records: Vec<NewArticle> = articles.iter().map(Article::to_new).collect();
    records.sort_by(|a, b| a.link.cmp(&b.link));
    records
}

#[tokio::test]
async fn test_load_fetches_both_collections() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    store.inner.insert_curated(&[article(2).to_new()]).await.unwrap();

    let mut board = ArticleBoard::new(store.clone());
    assert!(board.is_loading());
    board.load().await;

    assert!(!board.is_loading());
    assert_eq!(board.articles().iter().map(|a| a.id).collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    assert_eq!(board.curated().len(), 1);
    assert_eq!(board.curated()[0].link, article(2).link);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_articles() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;

    store.fail_fetch_articles.store(true, Ordering::SeqCst);
    board.refetch().await;
    assert_eq!(board.articles().len(), 4);
    assert!(board.articles_stale());

    store.fail_fetch_articles.store(false, Ordering::SeqCst);
    board.refetch().await;
    assert!(!board.articles_stale());
}

#[tokio::test]
async fn test_set_curated_list_copies_selected_articles() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;

    let selected: SelectionSet = [1, 3].into_iter().collect();
    assert!(board.set_curated_list(&selected).await);

    let remote = store.fetch_curated().await.unwrap();
    assert_eq!(content(&remote), content(&[article(1), article(3)]));
    assert_eq!(board.curated(), remote.as_slice());
}

#[tokio::test]
async fn test_set_curated_list_replaces_previous_entries() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;

    assert!(board.set_curated_list(&[1, 2].into_iter().collect()).await);
    let first_ids: Vec<_> = board.curated().iter().map(|a| a.id).collect();

    assert!(board.set_curated_list(&[4].into_iter().collect()).await);
    assert_eq!(content(board.curated()), content(&[article(4)]));
    assert!(!first_ids.contains(&board.curated()[0].id));
}

#[tokio::test]
async fn test_empty_selection_clears_the_list() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;
    assert!(board.set_curated_list(&[2, 3].into_iter().collect()).await);

    assert!(board.set_curated_list(&SelectionSet::new()).await);

    assert!(store.fetch_curated().await.unwrap().is_empty());
    assert!(board.curated().is_empty());
    assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_clear_reports_false_and_skips_insert() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;
    assert!(board.set_curated_list(&[2].into_iter().collect()).await);
    let before = board.curated().to_vec();
    let inserts = store.inserts.load(Ordering::SeqCst);

    store.fail_clear.store(true, Ordering::SeqCst);
    assert!(!board.set_curated_list(&[1, 3].into_iter().collect()).await);

    assert_eq!(board.curated(), before.as_slice());
    assert_eq!(store.inserts.load(Ordering::SeqCst), inserts);
    assert_eq!(store.fetch_curated().await.unwrap(), before);
}

#[tokio::test]
async fn test_failed_insert_leaves_remote_list_empty() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;
    assert!(board.set_curated_list(&[2].into_iter().collect()).await);
    let before = board.curated().to_vec();

    store.fail_insert.store(true, Ordering::SeqCst);
    assert!(!board.set_curated_list(&[1, 3].into_iter().collect()).await);
    assert_eq!(board.curated(), before.as_slice());

    board.refetch().await;
    assert!(board.curated().is_empty());
}

#[tokio::test]
async fn test_unknown_ids_are_refused_before_touching_the_store() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;
    assert!(board.set_curated_list(&[1].into_iter().collect()).await);
    let before = store.fetch_curated().await.unwrap();

    assert!(!board.set_curated_list(&[3, 42].into_iter().collect()).await);

    assert_eq!(store.fetch_curated().await.unwrap(), before);
    assert_eq!(board.curated(), before.as_slice());
    assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_curate_after_failed_load_keeps_remote_list() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    store
        .inner
        .insert_curated(&[article(2).to_new(), article(4).to_new()])
        .await
        .unwrap();
    store.fail_fetch_articles.store(true, Ordering::SeqCst);

    let mut board = loaded_board(store.clone()).await;
    assert!(board.articles().is_empty());
    assert_eq!(board.curated().len(), 2);

    board.toggle_article_selection(1);
    board.toggle_article_selection(3);
    let notice = board.curate().await;

    assert!(notice.is_error());
    assert_eq!(board.selection().len(), 2);
    let remote = store.fetch_curated().await.unwrap();
    assert_eq!(content(&remote), content(&[article(2), article(4)]));
    assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_stale_snapshot_is_refused_even_when_ids_match() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;
    assert!(board.set_curated_list(&[2].into_iter().collect()).await);

    store.fail_fetch_articles.store(true, Ordering::SeqCst);
    board.refetch().await;
    assert!(!board.set_curated_list(&[1].into_iter().collect()).await);
    assert_eq!(content(&store.fetch_curated().await.unwrap()), content(&[article(2)]));

    // clearing does not depend on the snapshot
    assert!(board.set_curated_list(&SelectionSet::new()).await);
    assert!(store.fetch_curated().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_refetch_after_replace_keeps_local_list() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;
    assert!(board.set_curated_list(&[2].into_iter().collect()).await);
    let before = board.curated().to_vec();

    store.fail_fetch_curated.store(true, Ordering::SeqCst);
    assert!(!board.set_curated_list(&[1, 3].into_iter().collect()).await);
    assert_eq!(board.curated(), before.as_slice());

    store.fail_fetch_curated.store(false, Ordering::SeqCst);
    let remote = store.fetch_curated().await.unwrap();
    assert_eq!(content(&remote), content(&[article(1), article(3)]));

    board.refetch().await;
    assert_eq!(board.curated(), remote.as_slice());
}

#[tokio::test]
async fn test_curate_clears_selection_on_success_only() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;

    board.toggle_article_selection(1);
    board.toggle_article_selection(4);
    store.fail_insert.store(true, Ordering::SeqCst);
    let notice = board.curate().await;
    assert!(notice.is_error());
    assert_eq!(board.selection().len(), 2);

    store.fail_insert.store(false, Ordering::SeqCst);
    let notice = board.curate().await;
    assert!(!notice.is_error());
    assert_eq!(notice.title, "Articles curated!");
    assert!(board.selection().is_empty());
    assert_eq!(board.curated().len(), 2);

    let notice = board.curate().await;
    assert_eq!(notice.title, "Curated list cleared");
    assert!(board.curated().is_empty());
}

#[tokio::test]
async fn test_remove_deletes_one_entry() {
    let store = Arc::new(FlakyStore::with_articles(four_articles()));
    let mut board = loaded_board(store.clone()).await;
    assert!(board.set_curated_list(&[1, 2, 3].into_iter().collect()).await);

    let target = board.curated()[0].clone();
    let notice = board.remove(target.id).await;
    assert!(!notice.is_error());
    assert_eq!(board.curated().len(), 2);
    assert!(board.curated().iter().all(|a| a.id != target.id));

    store.fail_delete.store(true, Ordering::SeqCst);
    let notice = board.remove(board.curated()[0].id).await;
    assert!(notice.is_error());
    assert_eq!(board.curated().len(), 2);
}
