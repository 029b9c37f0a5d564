//! LLM relationship oracle adapter.

mod chat;
mod llm;
mod openrouter;

pub use chat::ChatCompletion;
pub use llm::LlmOracle;
pub use openrouter::OpenRouter;
