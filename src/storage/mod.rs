//! Durable storage for tracker documents.
//!
//! The stores talk to storage only through the [`KeyValueStore`] trait. Two
//! implementations ship with the crate: [`MemoryStore`] for tests and
//! embedding, and [`FileStore`] for the command-line tool.

mod file;
mod gateway;
mod memory;

pub use file::FileStore;
pub use gateway::{KeyValueStore, keys, load_json, load_json_or_recover, save_json};
pub use memory::MemoryStore;
