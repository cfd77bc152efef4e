//! HTTP surface for jokegen.
//!
//! - `GET /story?type=&theme=&style=&modifier=&force=` returns
//!   `{"prompt", "story", "timestamp"}`
//! - `GET /health` returns `{"status": "healthy"}`

mod api;
mod config;
mod error;
mod serve;

pub use api::{ApiState, StoryQuery, create_router};
pub use config::{DEFAULT_BIND, ServerConfig};
pub use error::ApiError;
pub use serve::{serve, serve_with_shutdown};
