use async_trait::async_trait;
use curator_core::{ArticleStore, Error, NewArticle, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

pub const DEFAULT_ARTICLES_TABLE: &str = "articles";
pub const DEFAULT_CURATED_TABLE: &str = "curated_list";

#[async_trait]
pub trait StoreBackend: ArticleStore + Sized {
    fn get_error_message() -> &'static str;
    async fn connect(options: &StoreOptions) -> Result<Self>;
}

/// Connection settings shared by every backend. Unset values fall back to
/// `CURATOR_*` environment variables, then to backend defaults.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub backend_url: Option<String>,
    pub api_key: Option<String>,
    pub db_path: Option<PathBuf>,
    pub articles_table: Option<String>,
    pub curated_table: Option<String>,
}

impl StoreOptions {
    pub fn articles_table(&self) -> String {
        self.articles_table
            .clone()
            .or_else(|| env::var("CURATOR_ARTICLES_TABLE").ok())
            .unwrap_or_else(|| DEFAULT_ARTICLES_TABLE.to_string())
    }

    pub fn curated_table(&self) -> String {
        self.curated_table
            .clone()
            .or_else(|| env::var("CURATOR_CURATED_TABLE").ok())
            .unwrap_or_else(|| DEFAULT_CURATED_TABLE.to_string())
    }
}

async fn connect<T: StoreBackend + 'static>(
    options: &StoreOptions,
) -> Result<Arc<dyn ArticleStore>> {
    let store = T::connect(options)
        .await
        .map_err(|e| Error::Storage(format!("{}: {}", T::get_error_message(), e)))?;
    Ok(Arc::new(store) as Arc<dyn ArticleStore>)
}

/// Opens the store named by `kind` (`memory`, `sqlite` or `rest`).
pub async fn create_store(kind: &str, options: &StoreOptions) -> Result<Arc<dyn ArticleStore>> {
    let store = match kind {
        "memory" => connect::<InMemoryStore>(options).await?,
        #[cfg(feature = "sqlite")]
        "sqlite" => connect::<SQLiteStore>(options).await?,
        #[cfg(not(feature = "sqlite"))]
        "sqlite" => {
            return Err(Error::Storage(
                "SQLite support was not enabled at build time".to_string(),
            ))
        }
        "rest" => connect::<RestStore>(options).await?,
        other => {
            return Err(Error::Storage(format!(
                "Unknown store: {} (expected memory, sqlite or rest)",
                other
            )))
        }
    };
    info!("🏦 Store initialized (using {})", kind);
    Ok(store)
}

/// Reads a JSON array of article records, as exported from the hosted
/// articles table. Identifiers in the file are ignored.
pub fn read_articles_file(path: &Path) -> Result<Vec<NewArticle>> {
    let raw = fs::read_to_string(path)?;
    let articles: Vec<NewArticle> = serde_json::from_str(&raw)?;
    info!("📄 Read {} article(s) from {}", articles.len(), path.display());
    Ok(articles)
}
