//! In-memory `ChefApi` for driving the session and forms without a backend.

use super::ChefApi;
use crate::error::ChefError;
use crate::models::chat::{ Conversation, Message, Role };
use crate::models::substitution::Substitution;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::atomic::{ AtomicBool, AtomicI64, Ordering };
use std::sync::Mutex;
use tokio::sync::Notify;

pub fn network_error(context: &'static str) -> ChefError {
    ChefError::Network { context, status: StatusCode::INTERNAL_SERVER_ERROR }
}

/// Holds `ask_chef` until the test releases it.
#[derive(Default)]
pub struct AskGate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct MockChefApi {
    /// Every call made, as "method arg..." strings.
    pub calls: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<Result<String, ChefError>>>,
    substitution: Mutex<Option<Substitution>>,
    stored_messages: Mutex<Vec<Message>>,
    conversations: Mutex<Vec<Conversation>>,
    next_id: AtomicI64,
    fail_appends: AtomicBool,
    fail_creates: AtomicBool,
    pub gate: Option<AskGate>,
}

impl MockChefApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self { gate: Some(AskGate::default()), ..Self::default() }
    }

    pub fn queue_answer(&self, answer: &str) {
        self.answers.lock().unwrap().push_back(Ok(answer.to_string()));
    }

    pub fn queue_error(&self, error: ChefError) {
        self.answers.lock().unwrap().push_back(Err(error));
    }

    pub fn set_substitution(&self, substitution: Substitution) {
        *self.substitution.lock().unwrap() = Some(substitution);
    }

    pub fn seed_messages(&self, messages: Vec<Message>) {
        *self.stored_messages.lock().unwrap() = messages;
    }

    pub fn seed_conversations(&self, conversations: Vec<Conversation>) {
        *self.conversations.lock().unwrap() = conversations;
    }

    pub fn fail_appends(&self) {
        self.fail_appends.store(true, Ordering::SeqCst);
    }

    pub fn fail_creates(&self) {
        self.fail_creates.store(true, Ordering::SeqCst);
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

pub fn conversation(id: i64, title: &str) -> Conversation {
    let now = Utc::now();
    Conversation { id, title: title.to_string(), created_at: now, updated_at: now }
}

pub fn stored_message(id: i64, conversation_id: i64, role: Role, content: &str) -> Message {
    Message { id, conversation_id, role, content: content.to_string(), created_at: Utc::now() }
}

#[async_trait]
impl ChefApi for MockChefApi {
    async fn ask_chef(&self, question: &str) -> Result<String, ChefError> {
        self.record(format!("ask {}", question));
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(network_error("No mock answer queued")))
    }

    async fn get_substitution(
        &self,
        ingredient: &str,
        dietary_restrictions: Option<&[String]>,
        available_ingredients: Option<&[String]>
    ) -> Result<Substitution, ChefError> {
        self.record(
            format!(
                "substitute {} {:?} {:?}",
                ingredient,
                dietary_restrictions,
                available_ingredients
            )
        );
        self.substitution
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| network_error("Failed to get substitution"))
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, ChefError> {
        self.record("list_conversations".to_string());
        Ok(self.conversations.lock().unwrap().clone())
    }

    async fn create_conversation(&self, title: &str) -> Result<Conversation, ChefError> {
        self.record(format!("create_conversation {}", title));
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(network_error("Failed to create conversation"));
        }
        Ok(conversation(self.next_id(), title))
    }

    async fn get_conversation(&self, conversation_id: i64) -> Result<Conversation, ChefError> {
        self.record(format!("get_conversation {}", conversation_id));
        self.conversations
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == conversation_id)
            .cloned()
            .ok_or_else(|| network_error("Failed to fetch conversation"))
    }

    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, ChefError> {
        self.record(format!("list_messages {}", conversation_id));
        Ok(
            self.stored_messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.conversation_id == conversation_id)
                .cloned()
                .collect()
        )
    }

    async fn append_message(
        &self,
        conversation_id: i64,
        role: Role,
        content: &str
    ) -> Result<Message, ChefError> {
        self.record(format!("append {} {} {}", conversation_id, role.as_str(), content));
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(network_error("Failed to add message"));
        }
        Ok(stored_message(self.next_id() + 1000, conversation_id, role, content))
    }
}
