pub mod board;
pub mod cli;
pub mod logging;
pub mod notice;
pub mod reconcile;

pub use board::ArticleBoard;
pub use cli::{handle_command, BoardArgs, BoardCommands, DisplayArgs};
pub use logging::{init_logging, Logger};
pub use notice::{Notice, NoticeKind};
pub use reconcile::{curation_records, missing_ids, CurationReconciler};
