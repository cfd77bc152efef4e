//! Flat-file, embedded and in-memory data backends.
//!
//! Vocabulary resources share one layout whether they live on disk or are
//! compiled in:
//!
//! ```text
//! themes.txt                    shared pools
//! styles.txt
//! modifiers.txt
//! <story_type>/styles.txt       per-story-type pools, preferred when present
//! <story_type>/modifiers.txt
//! ```

mod embedded;
mod file_vocabulary;
mod json_store;
mod memory_store;
mod pool;
mod provider;

pub use embedded::EmbeddedVocabulary;
pub use file_vocabulary::FileVocabulary;
pub use json_store::{DEFAULT_CACHE_FILE, JsonResultStore};
pub use memory_store::InMemoryResultStore;
pub use pool::{parse_pool, partition_path, shared_path};
pub use provider::CompositeDataProvider;
