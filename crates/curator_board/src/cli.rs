use std::io::Write;

use chrono::{DateTime, NaiveDate};
use clap::{Args, Subcommand};
use curator_core::{Article, ArticleId, Result, SortDirection, SortKey, SortOrder};

use crate::board::ArticleBoard;
use crate::notice::Notice;

#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    #[command(subcommand)]
    pub command: BoardCommands,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DisplayArgs {
    /// Sort key: id or source
    #[arg(long, default_value_t = SortKey::Id)]
    pub sort: SortKey,
    /// Sort direction: asc or desc
    #[arg(long, default_value_t = SortDirection::Descending)]
    pub order: SortDirection,
    /// Hide content snippets
    #[arg(long)]
    pub condensed: bool,
}

impl DisplayArgs {
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::new(self.sort, self.order)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum BoardCommands {
    /// List all articles
    List {
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Show the curated list
    Curated {
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Replace the curated list with the given article ids (none clears it)
    Curate {
        ids: Vec<ArticleId>,
    },
    /// Remove one entry from the curated list by its curated id
    Remove {
        id: ArticleId,
    },
}

/// Runs one command against a loaded board, writing to `out`. Store
/// failures are reported as notices, not as errors.
pub async fn handle_command<W: Write>(
    args: BoardArgs,
    board: &mut ArticleBoard,
    out: &mut W,
) -> Result<Option<Notice>> {
    match args.command {
        BoardCommands::List { display } => {
            writeln!(out, "All Articles ({})", board.articles().len())?;
            let articles = board.sorted_articles(display.sort_order());
            if articles.is_empty() {
                writeln!(out, "  No articles found")?;
            }
            for article in articles {
                let selected = board.is_selected(article.id);
                write_article(out, article, Some(selected), display.condensed)?;
            }
            Ok(None)
        }
        BoardCommands::Curated { display } => {
            writeln!(out, "Curated List ({})", board.curated().len())?;
            let curated = board.sorted_curated(display.sort_order());
            if curated.is_empty() {
                writeln!(out, "  No curated articles yet")?;
            }
            for article in curated {
                write_article(out, article, None, display.condensed)?;
            }
            Ok(None)
        }
        BoardCommands::Curate { ids } => {
            board.clear_selection();
            for id in ids {
                board.toggle_article_selection(id);
            }
            let notice = board.curate().await;
            writeln!(out, "{}", notice)?;
            Ok(Some(notice))
        }
        BoardCommands::Remove { id } => {
            let notice = board.remove(id).await;
            writeln!(out, "{}", notice)?;
            Ok(Some(notice))
        }
    }
}

/// `checkbox` is `None` for lists without selection.
pub fn write_article<W: Write>(
    out: &mut W,
    article: &Article,
    checkbox: Option<bool>,
    condensed: bool,
) -> std::io::Result<()> {
    let mark = match checkbox {
        Some(true) => "[x] ",
        Some(false) => "[ ] ",
        None => "",
    };
    writeln!(out, "  {}#{} {}", mark, article.id, article.title_or_default())?;

    if !condensed {
        if let Some(snippet) = article.content_snippet.as_deref().filter(|s| !s.is_empty()) {
            writeln!(out, "      {}", snippet)?;
        }
    }

    let mut meta = vec![article.source_label()];
    if let Some(date) = article.pub_date.as_deref() {
        meta.push(format_pub_date(date));
    }
    meta.push(article.link.clone());
    let meta: Vec<_> = meta.into_iter().filter(|m| !m.is_empty()).collect();
    writeln!(out, "      {}", meta.join(" · "))
}

/// Renders a publish date as `YYYY-MM-DD`; unrecognised values pass through.
pub fn format_pub_date(raw: &str) -> String {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
