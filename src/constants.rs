//! Application-wide constants
//!
//! Fixed texts and tuning values live here so they are discoverable in one place.

/// Collection every submitted message is written to.
pub const MESSAGES_COLLECTION: &str = "messages";

// === Status line texts ===

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_SENT: &str = "Message sent successfully!";
pub const MSG_SEND_FAILED: &str = "Failed to send message";
pub const MSG_POLISHED: &str = "Message polished";
pub const MSG_POLISH_FAILED: &str = "AI polish failed";
pub const MSG_AI_KEY_MISSING: &str = "AI API key not configured";

// === Event loop ===

/// Input poll timeout while a request is in flight (keeps the spinner moving).
pub const POLL_BUSY_MS: u64 = 50;

/// Input poll timeout when idle.
pub const POLL_IDLE_MS: u64 = 150;

/// Capacity of worker command channels.
pub const WORKER_CHANNEL_CAPACITY: usize = 16;

// === UI ===

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;

/// Height of a single-line input field including borders.
pub const INPUT_HEIGHT: u16 = 3;

/// Maximum width of the form; wider terminals get side margins.
pub const FORM_MAX_WIDTH: u16 = 90;
