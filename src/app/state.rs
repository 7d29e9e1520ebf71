//! Application state types
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.

use chrono::{DateTime, Utc};

use crate::ai::polish_prompt;
use crate::constants::{
    MSG_AI_KEY_MISSING, MSG_FILL_ALL_FIELDS, MSG_POLISH_FAILED, MSG_POLISHED, MSG_SEND_FAILED,
    MSG_SENT,
};
use crate::delivery::{OutboundMessageRecord, SubmitOutcome};
use crate::error::{RemoteError, status_text};
use crate::input::KeybindingEntry;

/// Focusable elements of the form, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Message,
    PolishButton,
    SendButton,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::PolishButton,
            Self::PolishButton => Self::SendButton,
            Self::SendButton => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::SendButton,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
            Self::PolishButton => Self::Message,
            Self::SendButton => Self::PolishButton,
        }
    }

    /// Whether typing goes into this element
    pub fn is_text(self) -> bool {
        matches!(self, Self::Name | Self::Email | Self::Message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The single, most recent outcome shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl ToString) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.to_string(),
        }
    }

    pub fn error(text: impl ToString) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.to_string(),
        }
    }

    #[cfg(test)]
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Contact form contents and in-flight flags.
///
/// Fields are only validated on submit. The two flags are independent.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub message: String,
    pub is_polishing: bool,
    pub is_submitting: bool,
    pub status: Option<StatusMessage>,
}

impl FormState {
    pub fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Message => Some(&mut self.message),
            FormField::PolishButton | FormField::SendButton => None,
        }
    }

    pub fn insert_char(&mut self, field: FormField, c: char) {
        if let Some(buf) = self.field_mut(field) {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self, field: FormField) {
        if let Some(buf) = self.field_mut(field) {
            buf.pop();
        }
    }

    pub fn set_success(&mut self, text: impl ToString) {
        self.status = Some(StatusMessage::success(text));
    }

    pub fn set_error(&mut self, text: impl ToString) {
        self.status = Some(StatusMessage::error(text));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    fn message_is_blank(&self) -> bool {
        self.message.trim().is_empty()
    }

    /// Polish button enabled
    pub fn can_polish(&self) -> bool {
        !self.is_polishing && !self.message_is_blank()
    }

    /// Send button enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting
    }

    /// Start a polish. Returns the prompt to send, or None when nothing should be sent.
    pub fn begin_polish(&mut self, ai_configured: bool) -> Option<String> {
        if !self.can_polish() {
            return None;
        }
        if !ai_configured {
            self.set_error(MSG_AI_KEY_MISSING);
            return None;
        }

        self.is_polishing = true;
        self.clear_status();
        Some(polish_prompt(&self.message))
    }

    /// Apply the result of a polish call. Always clears `is_polishing`.
    pub fn finish_polish(&mut self, result: Result<String, RemoteError>) {
        match result {
            Ok(text) => {
                let polished = text.trim();
                if !polished.is_empty() {
                    self.message = polished.to_string();
                    self.set_success(MSG_POLISHED);
                }
            }
            Err(e) => self.set_error(status_text(&e, MSG_POLISH_FAILED)),
        }
        self.is_polishing = false;
    }

    /// Validate and start a submission. Returns the record to deliver.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Option<OutboundMessageRecord> {
        if !self.can_submit() {
            return None;
        }
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            self.set_error(MSG_FILL_ALL_FIELDS);
            return None;
        }

        self.is_submitting = true;
        self.clear_status();
        Some(OutboundMessageRecord::new(
            &self.name,
            &self.email,
            &self.message,
            now,
        ))
    }

    /// Apply a submission outcome. Always clears `is_submitting`.
    ///
    /// Both failure kinds produce the same status text shape.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) {
        match outcome.error() {
            None => {
                self.set_success(MSG_SENT);
                self.reset_fields();
            }
            Some(e) => self.set_error(status_text(e, MSG_SEND_FAILED)),
        }
        self.is_submitting = false;
    }
}

/// Help overlay contents
#[derive(Debug, Clone, Default)]
pub struct HelpState {
    pub keybindings: Vec<KeybindingEntry>,
    pub scroll: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: FormState,
    pub focus: FormField,
    /// Whether an AI key is configured; polish reports a missing key otherwise
    pub ai_configured: bool,
    pub help: Option<HelpState>,
}

impl AppState {
    pub fn is_busy(&self) -> bool {
        self.form.is_polishing || self.form.is_submitting
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled() -> FormState {
        FormState {
            name: "  Ada Lovelace ".to_string(),
            email: " ada@example.com ".to_string(),
            message: " hey can u call me ".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_focus_ring_wraps() {
        let mut field = FormField::Name;
        for _ in 0..5 {
            field = field.next();
        }
        assert_eq!(field, FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::SendButton);
        assert!(!FormField::SendButton.is_text());
    }

    #[test]
    fn test_typing_only_reaches_text_fields() {
        let mut form = FormState::default();
        form.insert_char(FormField::Name, 'A');
        form.insert_char(FormField::PolishButton, 'x');
        form.insert_char(FormField::Message, '\n');
        form.backspace(FormField::Email);

        assert_eq!(form.name, "A");
        assert_eq!(form.message, "\n");
        assert!(form.email.is_empty());
        assert!(form.status.is_none());
    }

    #[test]
    fn test_polish_blank_message_is_noop() {
        let mut form = FormState {
            message: "   \n".to_string(),
            status: Some(StatusMessage::success("earlier")),
            ..Default::default()
        };

        assert!(form.begin_polish(true).is_none());
        assert!(!form.is_polishing);
        assert_eq!(form.status, Some(StatusMessage::success("earlier")));
        assert_eq!(form.message, "   \n");
    }

    #[test]
    fn test_polish_without_key_reports_error() {
        let mut form = filled();
        assert!(form.begin_polish(false).is_none());
        assert!(!form.is_polishing);
        assert_eq!(form.status, Some(StatusMessage::error("AI API key not configured")));
    }

    #[test]
    fn test_polish_success_replaces_message() {
        let mut form = filled();
        form.set_error("stale");

        let prompt = form.begin_polish(true).unwrap();
        assert_eq!(
            prompt,
            "Rewrite the following text to be professional, polite, and concise:  hey can u call me "
        );
        assert!(form.is_polishing);
        assert!(form.status.is_none());
        assert!(!form.can_polish());

        form.finish_polish(Ok("\n  Could you please call me?  \n".to_string()));
        assert!(!form.is_polishing);
        assert_eq!(form.message, "Could you please call me?");
        assert_eq!(form.status, Some(StatusMessage::success("Message polished")));
    }

    #[test]
    fn test_polish_empty_reply_keeps_message() {
        let mut form = filled();
        form.begin_polish(true).unwrap();
        form.finish_polish(Ok("   ".to_string()));

        assert!(!form.is_polishing);
        assert_eq!(form.message, " hey can u call me ");
        assert!(form.status.is_none());
    }

    #[test]
    fn test_polish_error_surfaces_message_or_fallback() {
        let mut form = filled();
        form.begin_polish(true).unwrap();
        form.finish_polish(Err(RemoteError::EmptyResponse("Gemini")));
        assert!(!form.is_polishing);
        assert_eq!(form.status, Some(StatusMessage::error("Gemini returned no content")));

        form.begin_polish(true).unwrap();
        form.finish_polish(Err(RemoteError::WorkerUnavailable));
        assert_eq!(form.status, Some(StatusMessage::error("AI polish failed")));
    }

    #[test]
    fn test_polish_ignored_while_in_flight() {
        let mut form = filled();
        form.begin_polish(true).unwrap();
        assert!(form.begin_polish(true).is_none());
    }

    #[test]
    fn test_submit_requires_every_field() {
        for blank in [FormField::Name, FormField::Email, FormField::Message] {
            let mut form = filled();
            *form.field_mut(blank).unwrap() = "  \t".to_string();

            assert!(form.begin_submit(Utc::now()).is_none());
            assert!(!form.is_submitting);
            assert_eq!(form.status, Some(StatusMessage::error("Please fill in all fields")));
        }
    }

    #[test]
    fn test_submit_builds_trimmed_record() {
        let mut form = filled();
        form.set_error("stale");
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

        let record = form.begin_submit(now).unwrap();
        assert!(form.is_submitting);
        assert!(form.status.is_none());
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.email, "ada@example.com");
        assert_eq!(record.message, "hey can u call me");
        assert_eq!(record.created_at, "2026-10-19T12:00:00.000Z");

        // Send is disabled until the outcome arrives
        assert!(form.begin_submit(now).is_none());
    }

    #[test]
    fn test_submit_success_resets_fields() {
        let mut form = filled();
        form.begin_submit(Utc::now()).unwrap();
        form.finish_submit(SubmitOutcome::BothSucceeded);

        assert!(!form.is_submitting);
        assert!(form.name.is_empty() && form.email.is_empty() && form.message.is_empty());
        assert_eq!(form.status, Some(StatusMessage::success("Message sent successfully!")));
    }

    #[test]
    fn test_submit_failure_keeps_fields() {
        let mut form = filled();
        form.begin_submit(Utc::now()).unwrap();
        form.finish_submit(SubmitOutcome::EmailFailedAfterStoreSucceeded(
            RemoteError::WorkerUnavailable,
        ));

        assert!(!form.is_submitting);
        assert_eq!(form.name, "  Ada Lovelace ");
        assert_eq!(form.status, Some(StatusMessage::error("Failed to send message")));
    }

    #[test]
    fn test_failure_text_does_not_reveal_failed_step() {
        let status_for = |outcome: SubmitOutcome| {
            let mut form = filled();
            form.begin_submit(Utc::now()).unwrap();
            form.finish_submit(outcome);
            form.status.unwrap()
        };

        let store_failed = status_for(SubmitOutcome::StoreFailed(RemoteError::WorkerUnavailable));
        let email_failed = status_for(SubmitOutcome::EmailFailedAfterStoreSucceeded(
            RemoteError::WorkerUnavailable,
        ));
        assert_eq!(store_failed, email_failed);
    }
}
