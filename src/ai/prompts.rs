//! Prompts for AI features

/// Instruction prepended to the message when polishing
pub const POLISH_INSTRUCTION: &str =
    "Rewrite the following text to be professional, polite, and concise: ";

/// Build the polish prompt for the given message text
pub fn polish_prompt(message: &str) -> String {
    format!("{}{}", POLISH_INSTRUCTION, message)
}
