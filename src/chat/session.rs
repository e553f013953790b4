//! The chat session owned by one view of the history assistant.
//!
//! A session holds an append-only transcript, a pending flag that
//! enforces one in-flight generation request at a time, and the draft
//! input text. Every accepted turn appends exactly one user message
//! and one assistant message, substituting a fixed fallback when the
//! API fails or returns nothing usable.
//!
//! Use `ChatSessionBuilder` to construct a valid `ChatSession`.

use tokio::sync::mpsc;
use uuid::Uuid;

use super::models::{Message, Role, Transcript};
use super::prompt;
use crate::gemini::generate_content;
use crate::notify::Notice;

/// Seeded as the first transcript entry of every session.
pub const WELCOME_MESSAGE: &str = "Hello! I'm your History AI assistant powered by Google's Gemini. I'm here to help you explore the fascinating world of history - from ancient civilizations to modern times. Ask me anything about historical events, figures, civilizations, or time periods. What would you like to learn about today?";

/// Substituted when the API responds but no text can be extracted.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I apologize, but I could not generate a response. Please try again.";

/// Substituted when the request fails in transport or returns a
/// non-success status.
pub const API_ERROR_FALLBACK: &str = "I apologize, but I encountered an error while processing your request. Please make sure your API key is valid and try again.";

/// Raised as a notice alongside the API error fallback.
pub const API_ERROR_NOTICE: &str =
    "Failed to get response from AI. Please check your API key and try again.";

pub struct ChatSession {
    api_hostname: String,
    api_key: String,
    model: String,
    session_id: Uuid,
    transcript: Transcript,
    pending: bool,
    draft: String,
    notices: Option<mpsc::UnboundedSender<Notice>>,
    next_id: u64,
}

impl ChatSession {
    /// Runs one turn. Ignored when the trimmed text is empty or a
    /// request is already in flight; nothing is queued and no error
    /// is raised. Every accepted call resolves `pending` back to
    /// false, whatever the outcome of the outbound request.
    pub async fn submit(&mut self, draft_text: &str) {
        let text = draft_text.trim();
        if text.is_empty() || self.pending {
            return;
        }

        let user_msg = Message::new(self.next_id(), Role::User, text);
        self.transcript.push(user_msg);
        self.draft.clear();
        self.pending = true;

        let combined = prompt::render_history_question(text);
        let reply = match generate_content(&self.api_hostname, &self.api_key, &self.model, &combined)
            .await
        {
            Ok(response) => response
                .first_text()
                .unwrap_or(EMPTY_REPLY_FALLBACK)
                .to_string(),
            Err(e) => {
                tracing::error!("Generation request failed for session {}: {}", self.session_id, e);
                if let Some(tx) = &self.notices {
                    // The receiver may already be gone; the transcript
                    // fallback still records the failure.
                    let _ = tx.send(Notice::error(API_ERROR_NOTICE));
                }
                API_ERROR_FALLBACK.to_string()
            }
        };

        let assistant_msg = Message::new(self.next_id(), Role::Assistant, &reply);
        self.transcript.push(assistant_msg);
        self.pending = false;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct ChatSessionBuilder {
    api_hostname: String,
    api_key: String,
    model: String,
    notices: Option<mpsc::UnboundedSender<Notice>>,
}

impl ChatSessionBuilder {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            notices: None,
        }
    }

    /// Deliver transient user-facing notices over `transmitter`.
    pub fn notices(mut self, transmitter: mpsc::UnboundedSender<Notice>) -> Self {
        self.notices = Some(transmitter);
        self
    }

    /// Builds the session and seeds the transcript with the welcome
    /// message. Each built session owns its state exclusively.
    pub fn build(self) -> ChatSession {
        let mut session = ChatSession {
            api_hostname: self.api_hostname,
            api_key: self.api_key,
            model: self.model,
            session_id: Uuid::new_v4(),
            transcript: Transcript::new(),
            pending: false,
            draft: String::new(),
            notices: self.notices,
            next_id: 0,
        };
        let welcome = Message::new(session.next_id(), Role::Assistant, WELCOME_MESSAGE);
        session.transcript.push(welcome);
        session
    }
}
