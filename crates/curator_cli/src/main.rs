use clap::{Parser, Subcommand};
use curator_board::{handle_command, init_logging, ArticleBoard, BoardArgs, BoardCommands};
use curator_storage::{read_articles_file, SQLiteStore, StoreBackend, StoreOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Select articles and keep a curated list for the newsletter",
    long_about = None
)]
pub struct Cli {
    /// Store backend: sqlite or rest
    #[arg(long, default_value = "rest", value_parser = ["sqlite", "rest"])]
    store: String,
    /// Base URL of the REST store
    #[arg(long, env = "CURATOR_BACKEND_URL")]
    backend_url: Option<String>,
    #[arg(long, env = "CURATOR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// SQLite database file
    #[arg(long, env = "CURATOR_DB_PATH")]
    db_path: Option<PathBuf>,
    #[arg(long, env = "CURATOR_ARTICLES_TABLE")]
    articles_table: Option<String>,
    #[arg(long, env = "CURATOR_CURATED_TABLE")]
    curated_table: Option<String>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a JSON array of articles into the SQLite articles table
    Import { file: PathBuf },
    #[command(flatten)]
    Board(BoardCommands),
}

impl Cli {
    fn store_options(&self) -> StoreOptions {
        StoreOptions {
            backend_url: self.backend_url.clone(),
            api_key: self.api_key.clone(),
            db_path: self.db_path.clone(),
            articles_table: self.articles_table.clone(),
            curated_table: self.curated_table.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let logger = init_logging(cli.verbose).with_new_prefixes("📋".to_string());
    let options = cli.store_options();

    let command = match cli.command {
        Commands::Import { file } => {
            if cli.store != "sqlite" {
                anyhow::bail!("import writes to a local database; pass --store sqlite");
            }
            let articles = read_articles_file(&file)?;
            let store = SQLiteStore::connect(&options).await?;
            store.import_articles(&articles).await?;
            println!(
                "✅ Imported {} article(s) into {}",
                articles.len(),
                store.get_db_path().display()
            );
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Board(command) => command,
    };

    let store = curator_storage::create_store(&cli.store, &options).await?;

    info!("💾 Loading articles...");
    let mut board = ArticleBoard::new(store).with_logger(logger);
    board.load().await;

    let args = BoardArgs { command };
    let notice = handle_command(args, &mut board, &mut std::io::stdout()).await?;

    match notice {
        Some(notice) if notice.is_error() => Ok(ExitCode::FAILURE),
        _ => Ok(ExitCode::SUCCESS),
    }
}
