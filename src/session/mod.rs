//! The chat session: which conversation is open, what the user sees of it,
//! and the two-phase send (show locally first, then store and ask the backend).

use crate::api::ChefApi;
use crate::error::ChefError;
use crate::models::chat::{ Conversation, DeliveryStatus, LocalMessage, Message, Role };
use crate::models::substitution::Substitution;
use log::{ debug, error, info, warn };
use std::sync::atomic::{ AtomicI64, AtomicUsize, Ordering };
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct SessionState {
    conversations: Vec<Conversation>,
    current: Option<Conversation>,
    messages: Vec<LocalMessage>,
    /// Bumped whenever the visible conversation is swapped out. A turn only
    /// appends its reply if the epoch it started under is still current.
    epoch: u64,
    last_error: Option<String>,
}

impl SessionState {
    fn settle(&mut self, temp_id: i64, outcome: Result<&Message, ()>) {
        if let Some(entry) = self.messages.iter_mut().find(|m| m.message.id == temp_id) {
            match outcome {
                Ok(stored) => {
                    entry.message = stored.clone();
                    entry.status = DeliveryStatus::Confirmed;
                }
                Err(()) => entry.status = DeliveryStatus::Failed,
            }
        }
    }
}

/// Decrements the in-flight counter when the guarded call finishes, however it finishes.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct ChefSession {
    api: Arc<dyn ChefApi>,
    default_title: String,
    state: RwLock<SessionState>,
    in_flight: AtomicUsize,
    last_temp_id: AtomicI64,
}

impl ChefSession {
    pub fn new(api: Arc<dyn ChefApi>, default_title: impl Into<String>) -> Self {
        Self {
            api,
            default_title: default_title.into(),
            state: RwLock::new(SessionState::default()),
            in_flight: AtomicUsize::new(0),
            last_temp_id: AtomicI64::new(0),
        }
    }

    pub async fn current_conversation(&self) -> Option<Conversation> {
        self.state.read().await.current.clone()
    }

    pub async fn messages(&self) -> Vec<LocalMessage> {
        self.state.read().await.messages.clone()
    }

    pub async fn conversations(&self) -> Vec<Conversation> {
        self.state.read().await.conversations.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn next_temp_id(&self) -> i64 {
        self.last_temp_id.fetch_sub(1, Ordering::SeqCst) - 1
    }

    async fn record_error(&self, action: &str, err: &ChefError) {
        error!("{} failed: {}", action, err);
        self.state.write().await.last_error = Some(err.to_string());
    }

    pub async fn load_conversations(&self) -> Result<Vec<Conversation>, ChefError> {
        match self.api.list_conversations().await {
            Ok(list) => {
                debug!("Loaded {} conversations", list.len());
                self.state.write().await.conversations = list.clone();
                Ok(list)
            }
            Err(e) => {
                self.record_error("Loading conversations", &e).await;
                Err(e)
            }
        }
    }

    /// Creates a conversation on the backend and makes it the open one with an
    /// empty message list. A missing or blank title falls back to the default.
    pub async fn start_new_conversation(&self, title: Option<&str>) -> Result<Conversation, ChefError> {
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => self.default_title.as_str(),
        };

        match self.api.create_conversation(title).await {
            Ok(conversation) => {
                info!("Started conversation {} ('{}')", conversation.id, conversation.title);
                let mut state = self.state.write().await;
                state.current = Some(conversation.clone());
                state.messages.clear();
                state.conversations.insert(0, conversation.clone());
                state.epoch += 1;
                Ok(conversation)
            }
            Err(e) => {
                self.record_error("Starting a conversation", &e).await;
                Err(e)
            }
        }
    }

    /// Opens an existing conversation with its messages in server order.
    pub async fn load_conversation(&self, conversation_id: i64) -> Result<Conversation, ChefError> {
        let loaded = futures::try_join!(
            self.api.get_conversation(conversation_id),
            self.api.list_messages(conversation_id)
        );

        match loaded {
            Ok((conversation, messages)) => {
                info!("Opened conversation {} with {} messages", conversation.id, messages.len());
                let mut state = self.state.write().await;
                state.current = Some(conversation.clone());
                state.messages = messages.into_iter().map(LocalMessage::confirmed).collect();
                state.epoch += 1;
                Ok(conversation)
            }
            Err(e) => {
                self.record_error("Opening a conversation", &e).await;
                Err(e)
            }
        }
    }

    /// Sends one chat turn and returns the stored assistant reply.
    ///
    /// The user's message is shown before anything reaches the network. If a
    /// later step fails the message stays in the list, marked failed, and the
    /// error is returned as-is.
    pub async fn send_message(&self, content: &str) -> Result<Message, ChefError> {
        let user_temp_id = self.next_temp_id();
        let (conversation, epoch) = loop {
            if let Some(turn) = self.begin_turn(user_temp_id, content).await {
                break turn;
            }
            self.start_new_conversation(None).await?;
        };

        let _loading = LoadingGuard::new(&self.in_flight);
        let result = self.complete_turn(&conversation, user_temp_id, epoch, content).await;
        if let Err(e) = &result {
            self.record_error("Sending a message", e).await;
        }
        result
    }

    /// Shows the user's message in whatever conversation is open, reading the
    /// conversation and the epoch under the same guard as the push.
    async fn begin_turn(&self, user_temp_id: i64, content: &str) -> Option<(Conversation, u64)> {
        let mut state = self.state.write().await;
        let conversation = state.current.clone()?;
        state.messages.push(
            LocalMessage::pending(Message::local(user_temp_id, conversation.id, Role::User, content))
        );
        state.last_error = None;
        Some((conversation, state.epoch))
    }

    async fn complete_turn(
        &self,
        conversation: &Conversation,
        user_temp_id: i64,
        epoch: u64,
        content: &str
    ) -> Result<Message, ChefError> {
        let stored_user = self.api.append_message(conversation.id, Role::User, content).await;
        self.state.write().await.settle(user_temp_id, stored_user.as_ref().map_err(|_| ()));
        stored_user?;

        let answer = self.api.ask_chef(content).await?;

        let assistant_temp_id = self.next_temp_id();
        {
            let mut state = self.state.write().await;
            if state.epoch == epoch {
                state.messages.push(
                    LocalMessage::pending(
                        Message::local(assistant_temp_id, conversation.id, Role::Assistant, &answer)
                    )
                );
            } else {
                warn!(
                    "Conversation {} is no longer open; storing its reply without showing it",
                    conversation.id
                );
            }
        }

        let stored_assistant = self.api.append_message(
            conversation.id,
            Role::Assistant,
            &answer
        ).await;
        self.state.write().await.settle(assistant_temp_id, stored_assistant.as_ref().map_err(|_| ()));
        stored_assistant
    }

    pub async fn get_substitution(
        &self,
        ingredient: &str,
        dietary_restrictions: Option<&[String]>,
        available_ingredients: Option<&[String]>
    ) -> Result<Substitution, ChefError> {
        let _loading = LoadingGuard::new(&self.in_flight);
        self.state.write().await.last_error = None;

        match self.api.get_substitution(ingredient, dietary_restrictions, available_ingredients).await {
            Ok(substitution) => Ok(substitution),
            Err(e) => {
                self.record_error("Substitution lookup", &e).await;
                Err(e)
            }
        }
    }
}
