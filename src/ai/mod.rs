//! AI writing polish
//!
//! Sends the message text to a generative-text service (Gemini) with a fixed
//! rewrite instruction and hands the reply back to the form.

mod actor;
mod client;
mod prompts;

pub use actor::{AiActorHandle, AiCommand, AiEvent, spawn_ai_actor};
pub use client::{GeminiClient, TextGenerator};
#[cfg(test)]
pub use client::MockTextGenerator;
pub use prompts::polish_prompt;
