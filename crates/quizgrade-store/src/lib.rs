//! quizgrade-store: Quiz and attempt storage.
//!
//! Implements the `QuizStore` and `AttemptStore` traits over an in-memory
//! state that can be snapshotted to JSON, plus the quiz CRUD operations used
//! to author quizzes.

pub mod config;
pub mod error;
pub mod memory;

pub use config::{load_config, load_config_from, QuizgradeConfig};
pub use error::StoreError;
pub use memory::MemoryStore;
