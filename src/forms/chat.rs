use crate::error::ChefError;
use crate::models::chat::Message;
use crate::session::ChefSession;
use log::debug;

/// The chat box: holds what the user typed until a send succeeds.
#[derive(Debug, Clone, Default)]
pub struct ChatInput {
    pub text: String,
}

impl ChatInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends the typed text as one turn. Returns `Ok(None)` without sending when
    /// the box is blank or another request is still running. The text is kept
    /// if the send fails so it can be retried.
    pub async fn submit(&mut self, session: &ChefSession) -> Result<Option<Message>, ChefError> {
        let content = self.text.trim();
        if content.is_empty() || session.is_loading() {
            debug!("Ignoring chat submit (blank input or request in flight)");
            return Ok(None);
        }

        let reply = session.send_message(content).await?;
        self.text.clear();
        Ok(Some(reply))
    }
}
