//! Storage engine keeping everything in process memory.

mod database;
mod table;

pub use database::{Database, DEFAULT_PARTITION_COUNT};
pub use table::Table;
