use async_trait::async_trait;
use curator_core::{Article, ArticleId, ArticleStore, Error, NewArticle, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::{Row, Sqlite, Transaction};
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::{StoreBackend, StoreOptions};

const COLUMNS: &str =
    "link, title, content, content_snippet, pub_date, source, img_url, guid, should_draft_article";

/// Table names come from flags and environment variables, so they are always
/// quoted before being spliced into a statement.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `table` must already be quoted.
fn table_schema(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            "index" INTEGER PRIMARY KEY AUTOINCREMENT,
            link TEXT NOT NULL,
            title TEXT,
            content TEXT,
            content_snippet TEXT,
            pub_date TEXT,
            source TEXT,
            img_url TEXT,
            guid TEXT,
            should_draft_article INTEGER
        )
        "#,
        table
    )
}

fn db_error(context: &str) -> impl FnOnce(sqlx::Error) -> Error + '_ {
    move |e| Error::Database(format!("{}: {}", context, e))
}

pub struct SQLiteStore {
    pool: SqlitePool,
    db_path: PathBuf,
    // quoted identifiers
    articles_table: String,
    curated_table: String,
}

#[async_trait]
impl StoreBackend for SQLiteStore {
    fn get_error_message() -> &'static str {
        "SQLite database should be available at ./curator.db"
    }

    async fn connect(options: &StoreOptions) -> Result<Self> {
        let db_path = options
            .db_path
            .clone()
            .or_else(|| env::var("CURATOR_DB_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("curator.db"));
        Self::open(&db_path, &options.articles_table(), &options.curated_table()).await
    }
}

impl SQLiteStore {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        let options = StoreOptions::default();
        Self::open(db_path, &options.articles_table(), &options.curated_table()).await
    }

    async fn open(db_path: &Path, articles_table: &str, curated_table: &str) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(connect_options)
            .await
            .map_err(db_error("Failed to connect to database"))?;

        let articles_table = quote_ident(articles_table);
        let curated_table = quote_ident(curated_table);
        for table in [&articles_table, &curated_table] {
            sqlx::query(&table_schema(table))
                .execute(&pool)
                .await
                .map_err(db_error("Failed to create table"))?;
        }

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
            articles_table,
            curated_table,
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }

    /// Loads records into the articles table. The curation flow never writes
    /// there; this is how a local database gets its contents.
    pub async fn import_articles(&self, articles: &[NewArticle]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin import"))?;
        insert_rows(&mut tx, &self.articles_table, articles).await?;
        tx.commit().await.map_err(db_error("Failed to commit import"))?;
        info!("📥 Imported {} article(s) into {}", articles.len(), self.db_path.display());
        Ok(())
    }

    async fn list(&self, table: &str) -> Result<Vec<Article>> {
        let rows = sqlx::query(&format!(
            r#"SELECT "index", {} FROM {} ORDER BY "index" DESC"#,
            COLUMNS, table
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list articles"))?;

        rows.iter().map(row_to_article).collect()
    }
}

async fn insert_rows(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    articles: &[NewArticle],
) -> Result<()> {
    let statement = format!(
        "INSERT INTO {} ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        table, COLUMNS
    );
    for article in articles {
        sqlx::query(&statement)
            .bind(&article.link)
            .bind(article.title.as_deref())
            .bind(article.content.as_deref())
            .bind(article.content_snippet.as_deref())
            .bind(article.pub_date.as_deref())
            .bind(article.source.as_deref())
            .bind(article.img_url.as_deref())
            .bind(article.guid.as_deref())
            .bind(article.should_draft_article)
            .execute(&mut **tx)
            .await
            .map_err(db_error("Failed to insert article"))?;
    }
    Ok(())
}

fn row_to_article(row: &SqliteRow) -> Result<Article> {
    let read = db_error("Failed to read article row");
    let article = (|| -> std::result::Result<Article, sqlx::Error> {
        Ok(Article {
            id: row.try_get("index")?,
            link: row.try_get("link")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            content_snippet: row.try_get("content_snippet")?,
            pub_date: row.try_get("pub_date")?,
            source: row.try_get("source")?,
            img_url: row.try_get("img_url")?,
            guid: row.try_get("guid")?,
            should_draft_article: row.try_get("should_draft_article")?,
        })
    })();
    article.map_err(read)
}

#[async_trait]
impl ArticleStore for SQLiteStore {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        self.list(&self.articles_table).await
    }

    async fn fetch_curated(&self) -> Result<Vec<Article>> {
        self.list(&self.curated_table).await
    }

    async fn clear_curated(&self) -> Result<()> {
        sqlx::query(&format!("DELETE FROM {}", self.curated_table))
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to clear curated list"))?;
        Ok(())
    }

    async fn insert_curated(&self, articles: &[NewArticle]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin insert"))?;
        insert_rows(&mut tx, &self.curated_table, articles).await?;
        tx.commit().await.map_err(db_error("Failed to commit insert"))?;
        Ok(())
    }

    async fn delete_curated(&self, id: ArticleId) -> Result<()> {
        sqlx::query(&format!(r#"DELETE FROM {} WHERE "index" = ?"#, self.curated_table))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete curated article"))?;
        Ok(())
    }

    async fn replace_curated(&self, articles: &[NewArticle]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin replace"))?;
        sqlx::query(&format!("DELETE FROM {}", self.curated_table))
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to clear curated list"))?;
        insert_rows(&mut tx, &self.curated_table, articles).await?;
        tx.commit().await.map_err(db_error("Failed to commit replace"))?;
        Ok(())
    }
}
