//! Storyteller tactics catalogue
//!
//! This crate holds the card catalogue and the logic built on top of it:
//! - `store`: the read-only card collection loaded at startup
//! - `sampler`: uniform random draws per category
//! - `suggest`: structure suggestions from a text generation service
//! - `generator`: the text generation seam and its HTTP client

pub mod card;
pub mod error;
pub mod generator;
pub mod sampler;
pub mod store;
pub mod suggest;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use card::{Card, Category};
pub use error::{GeneratorError, SampleError, StoreError, SuggestError};
pub use generator::{AnthropicClient, ChatMessage, GenerationRequest, Role, TextGenerator};
pub use sampler::Sampler;
pub use store::CardStore;
pub use suggest::{resolve_titles, SuggestConfig, SuggestionEngine, TalkPlan};
