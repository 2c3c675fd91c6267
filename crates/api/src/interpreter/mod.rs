//! Turning free-text customer requests into order intents.
//!
//! The backend never parses natural language itself. An [`OrderInterpreter`]
//! (a hosted language model in production) turns "two burgers and a coke"
//! into an [`Intent`], and the ordering service decides what to do with it.

mod error;
mod intent;
mod together;

pub use error::InterpreterError;
pub use intent::{Intent, RequestedItem, extract_json_object};
pub use together::{SYSTEM_PROMPT, TogetherClient};

use async_trait::async_trait;

/// Something that can read a customer's request.
#[async_trait]
pub trait OrderInterpreter: Send + Sync {
    /// Interpret one customer request.
    async fn interpret(&self, user_input: &str) -> Result<Intent, InterpreterError>;
}
