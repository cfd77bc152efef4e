//! Trait definitions for the jokegen story generator.
//!
//! These are the seams between the generation pipeline and its
//! collaborators: vocabulary, result storage, the text generation service
//! and randomness.

mod driver;
mod provider;
mod random;
mod store;
mod vocabulary;

pub use driver::JokegenDriver;
pub use provider::StoryDataProvider;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use store::ResultStore;
pub use vocabulary::VocabularySource;
