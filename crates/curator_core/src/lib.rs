pub mod error;
pub mod selection;
pub mod sort;
pub mod source;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use selection::SelectionSet;
pub use sort::{sort_articles, SortDirection, SortKey, SortOrder};
pub use source::extract_source;
pub use storage::ArticleStore;
pub use types::{Article, ArticleId, NewArticle};
