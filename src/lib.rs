pub mod catalog;
pub mod config;
pub mod constructs;
pub mod errors;
pub mod executor;
pub mod information_schema;
pub mod memory;
pub mod server;
pub mod session;
pub mod sql;
pub mod stats;
