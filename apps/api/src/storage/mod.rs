//! Key-value store collaborator.
//!
//! The résumé engine never touches storage directly; handlers go through the
//! repository functions in `resumes`, which take any `KeyValueStore`.
//! `AppState` holds an `Arc<dyn KeyValueStore>`, chosen at startup: Redis
//! when `REDIS_URL` is set, the in-process `MemoryStore` otherwise.

pub mod memory;
pub mod redis_store;
pub mod resumes;

use async_trait::async_trait;

use crate::errors::AppError;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}
