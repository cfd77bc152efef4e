//! Text generation service clients for jokegen.
//!
//! [`OpenAICompatibleClient`] implements
//! [`JokegenDriver`](jokegen_interface::JokegenDriver) for any endpoint that
//! follows the OpenAI chat completions format.

mod config;
pub mod openai_compat;

pub use config::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, ModelConfig};
pub use openai_compat::OpenAICompatibleClient;
