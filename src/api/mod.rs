pub mod http;
#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use crate::config::ApiConfig;
use crate::error::ChefError;
use crate::models::chat::{ Conversation, Message, Role };
use crate::models::substitution::Substitution;
use log::info;
use std::sync::Arc;

pub use self::http::HttpChefApi;

/// The remote cooking backend. Every call is an independent request; nothing is cached.
#[async_trait]
pub trait ChefApi: Send + Sync {
    async fn ask_chef(&self, question: &str) -> Result<String, ChefError>;

    async fn get_substitution(
        &self,
        ingredient: &str,
        dietary_restrictions: Option<&[String]>,
        available_ingredients: Option<&[String]>
    ) -> Result<Substitution, ChefError>;

    /// Conversations in the order the server returns them.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, ChefError>;

    async fn create_conversation(&self, title: &str) -> Result<Conversation, ChefError>;

    async fn get_conversation(&self, conversation_id: i64) -> Result<Conversation, ChefError>;

    /// Messages in the order the server returns them.
    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, ChefError>;

    async fn append_message(
        &self,
        conversation_id: i64,
        role: Role,
        content: &str
    ) -> Result<Message, ChefError>;
}

pub fn new_client(config: &ApiConfig) -> Result<Arc<dyn ChefApi>, ChefError> {
    info!(
        "Chef API configured: BaseURL={}, Tables={} / {}",
        config.base_url,
        config.tables.conversations,
        config.tables.messages
    );
    Ok(Arc::new(HttpChefApi::from_config(config)?))
}
