// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod storage;

pub use http::HttpPageSource;
pub use storage::{cache_key, FileStore, MemoryStore};
