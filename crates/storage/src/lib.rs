#![forbid(unsafe_code)]

//! Key/value preference storage.
//!
//! A small typed wrapper over a string store: values are JSON, known keys
//! are namespaced constants, and backends are swappable behind
//! [`KeyValueStore`].

pub mod kv;
pub mod sqlite;

pub use kv::{get_json, keys, set_json, KeyValueStore, MemoryStore, StoreError};
pub use sqlite::{SqliteInitError, SqliteStore};
