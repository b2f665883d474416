use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::catalog::{retrieve, CatalogStore};
use crate::models::ChatTurn;
use crate::prompt::PromptBuilder;
use crate::session::{trim_history, SessionStore};
use crate::utils::error::ApiError;

use super::llm_service::GenerativeBackend;

#[derive(Debug)]
pub struct ChatReply {
    pub reply: String,
    pub timestamp: DateTime<Utc>,
}

/// The retrieval + context-assembly + history pipeline behind `POST /chat`.
///
/// Per message: append the user turn and trim, retrieve catalog payloads on
/// the raw message, assemble the prompt, call the backend, append the reply
/// and trim again, then persist the session (when one was named).
pub struct ChatService {
    catalog: Arc<CatalogStore>,
    sessions: SessionStore,
    backend: Arc<dyn GenerativeBackend>,
    prompt: PromptBuilder,
    max_history_tokens: usize,
}

impl ChatService {
    pub fn new(
        catalog: Arc<CatalogStore>,
        sessions: SessionStore,
        backend: Arc<dyn GenerativeBackend>,
        prompt: PromptBuilder,
        max_history_tokens: usize,
    ) -> Self {
        Self {
            catalog,
            sessions,
            backend,
            prompt,
            max_history_tokens,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub async fn handle_message(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ChatReply, ApiError> {
        // Sessionless requests run against an ephemeral history.
        let mut history = match session_id {
            Some(id) => self.sessions.history(id),
            None => Vec::new(),
        };

        history.push(ChatTurn::user(message));
        history = trim_history(history, self.max_history_tokens);

        let payloads = retrieve(message, self.catalog.entries());
        debug!(
            "Retrieved {} payload(s), {} turn(s) of history in prompt",
            payloads.len(),
            history.len()
        );

        let prompt = self.prompt.assemble(&payloads, &history);

        let reply = self
            .backend
            .generate(&prompt)
            .await
            .map_err(|e| ApiError::Backend(e.to_string()))?;

        let assistant_turn = ChatTurn::assistant(reply.clone());
        let timestamp = assistant_turn.ts;
        history.push(assistant_turn);
        history = trim_history(history, self.max_history_tokens);

        if let Some(id) = session_id {
            self.sessions.set(id, history);
        }

        info!(
            "Chat handled: session={}, reply_len={}",
            session_id.unwrap_or("<ephemeral>"),
            reply.len()
        );

        Ok(ChatReply { reply, timestamp })
    }

    /// Drop a session's server-side history. Unknown ids are fine.
    pub fn clear_session(&self, session_id: Option<&str>) {
        if let Some(id) = session_id {
            self.sessions.clear(id);
        }
    }
}
