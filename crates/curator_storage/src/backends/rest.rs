use async_trait::async_trait;
use curator_core::{Article, ArticleId, ArticleStore, Error, NewArticle, Result};
use reqwest::{Client, RequestBuilder, Response};
use std::env;
use tracing::debug;
use url::Url;
use crate::{StoreBackend, StoreOptions};

/// Settings for a PostgREST endpoint, such as the one a Supabase project exposes.
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub articles_table: String,
    pub curated_table: String,
}

impl RestConfig {
    pub fn new(options: &StoreOptions) -> Self {
        let url = options
            .backend_url
            .clone()
            .or_else(|| env::var("CURATOR_BACKEND_URL").ok())
            .unwrap_or_else(|| "http://localhost:54321".to_string());
        let api_key = options
            .api_key
            .clone()
            .or_else(|| env::var("CURATOR_API_KEY").ok());
        Self {
            url,
            api_key,
            articles_table: options.articles_table(),
            curated_table: options.curated_table(),
        }
    }
}

pub struct RestStore {
    client: Client,
    config: RestConfig,
    articles_url: Url,
    curated_url: Url,
}

impl RestStore {
    pub fn new(config: RestConfig) -> Result<Self> {
        let articles_url = table_url(&config.url, &config.articles_table)?;
        let curated_url = table_url(&config.url, &config.curated_table)?;
        Ok(Self {
            client: Client::new(),
            config,
            articles_url,
            curated_url,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    async fn list(&self, url: &Url) -> Result<Vec<Article>> {
        debug!("GET {}", url);
        let request = self
            .client
            .get(url.clone())
            .query(&[("select", "*"), ("order", "index.desc")]);
        let response = check(self.authorize(request).send().await?).await?;
        Ok(response.json::<Vec<Article>>().await?)
    }

    async fn delete_where(&self, filter: &str) -> Result<()> {
        debug!("DELETE {} where index={}", self.curated_url, filter);
        let request = self
            .client
            .delete(self.curated_url.clone())
            .query(&[("index", filter)]);
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }
}

fn table_url(base: &str, table: &str) -> Result<Url> {
    let raw = format!("{}/rest/v1/{}", base.trim_end_matches('/'), table);
    Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Storage(format!("{} returned {}: {}", url, status, body)))
}

#[async_trait]
impl StoreBackend for RestStore {
    fn get_error_message() -> &'static str {
        "REST store should be reachable at CURATOR_BACKEND_URL"
    }

    async fn connect(options: &StoreOptions) -> Result<Self> {
        Self::new(RestConfig::new(options))
    }
}

#[async_trait]
impl ArticleStore for RestStore {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        self.list(&self.articles_url).await
    }

    async fn fetch_curated(&self) -> Result<Vec<Article>> {
        self.list(&self.curated_url).await
    }

    async fn clear_curated(&self) -> Result<()> {
        // PostgREST refuses an unfiltered DELETE
        self.delete_where("not.is.null").await
    }

    async fn insert_curated(&self, articles: &[NewArticle]) -> Result<()> {
        debug!("POST {} ({} records)", self.curated_url, articles.len());
        let request = self
            .client
            .post(self.curated_url.clone())
            .header("Prefer", "return=minimal")
            .json(articles);
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn delete_curated(&self, id: ArticleId) -> Result<()> {
        self.delete_where(&format!("eq.{}", id)).await
    }
}
