//! Core data types for the jokegen story generator.
//!
//! This crate provides the data model shared by the generation pipeline,
//! the data backends and the front ends.

mod category;
mod message;
mod options;
mod request;
mod result;
mod story_type;

pub use category::StoryDataCategory;
pub use message::{Message, MessageBuilder, Role};
pub use options::StoryOptions;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, Output};
pub use result::StoryResult;
pub use story_type::StoryType;
