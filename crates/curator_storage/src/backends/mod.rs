pub mod memory;
pub mod rest;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryStore;
pub use rest::{RestConfig, RestStore};

#[cfg(feature = "sqlite")]
pub use sqlite::SQLiteStore;
