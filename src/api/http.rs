use async_trait::async_trait;
use log::{ debug, warn };
use reqwest::{ Client as HttpClient, Response };
use serde::{ Deserialize, Serialize };

use super::ChefApi;
use crate::config::ApiConfig;
use crate::error::ChefError;
use crate::models::chat::{ Conversation, Message, Role };
use crate::models::substitution::{ Substitution, SubstitutionRequest };

const ASK_ROUTE: &str = "ai/chef/ask";
const SUBSTITUTE_ROUTE: &str = "ai/chef/substitute";

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct CreateConversationRequest<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct AppendMessageRequest<'a> {
    conversation_id: i64,
    role: Role,
    content: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpChefApi {
    http: HttpClient,
    config: ApiConfig,
}

impl HttpChefApi {
    pub fn from_config(config: &ApiConfig) -> Result<Self, ChefError> {
        let http = HttpClient::builder().timeout(config.request_timeout).build()?;
        Ok(Self { http, config: config.clone() })
    }

    fn url(&self, route: &str) -> String {
        self.config.endpoint(route)
    }

    /// Turns a non-success status into `ChefError::Network` tagged with `context`.
    fn check(resp: Response, context: &'static str) -> Result<Response, ChefError> {
        let status = resp.status();
        if !status.is_success() {
            warn!("{}: {} returned {}", context, resp.url(), status);
            return Err(ChefError::Network { context, status });
        }
        Ok(resp)
    }
}

#[async_trait]
impl ChefApi for HttpChefApi {
    async fn ask_chef(&self, question: &str) -> Result<String, ChefError> {
        let url = self.url(ASK_ROUTE);
        debug!("POST {} ({} chars)", url, question.len());
        let resp = self.http.post(&url).json(&AskRequest { question }).send().await?;
        let data = Self::check(resp, "Failed to get AI chef response")?
            .json::<AskResponse>().await?;
        Ok(data.answer)
    }

    async fn get_substitution(
        &self,
        ingredient: &str,
        dietary_restrictions: Option<&[String]>,
        available_ingredients: Option<&[String]>
    ) -> Result<Substitution, ChefError> {
        let url = self.url(SUBSTITUTE_ROUTE);
        let req = SubstitutionRequest {
            ingredient: ingredient.to_string(),
            dietary_restrictions: dietary_restrictions.map(|r| r.to_vec()),
            available_ingredients: available_ingredients.map(|a| a.to_vec()),
        };
        debug!("POST {} ingredient={}", url, ingredient);
        let resp = self.http.post(&url).json(&req).send().await?;
        let data = Self::check(resp, "Failed to get substitution")?
            .json::<Substitution>().await?;
        Ok(data)
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, ChefError> {
        let url = self.url(&self.config.tables.conversations);
        debug!("GET {}", url);
        let resp = self.http.get(&url).send().await?;
        let data = Self::check(resp, "Failed to fetch conversations")?
            .json::<Vec<Conversation>>().await?;
        Ok(data)
    }

    async fn create_conversation(&self, title: &str) -> Result<Conversation, ChefError> {
        let url = self.url(&self.config.tables.conversations);
        debug!("POST {} title={}", url, title);
        let resp = self.http.post(&url).json(&CreateConversationRequest { title }).send().await?;
        let data = Self::check(resp, "Failed to create conversation")?
            .json::<Conversation>().await?;
        Ok(data)
    }

    async fn get_conversation(&self, conversation_id: i64) -> Result<Conversation, ChefError> {
        let url = self.url(&format!("{}/{}", self.config.tables.conversations, conversation_id));
        debug!("GET {}", url);
        let resp = self.http.get(&url).send().await?;
        let data = Self::check(resp, "Failed to fetch conversation")?
            .json::<Conversation>().await?;
        Ok(data)
    }

    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, ChefError> {
        let url = self.url(&self.config.tables.messages);
        debug!("GET {}?conversation_id={}", url, conversation_id);
        let resp = self.http
            .get(&url)
            .query(&[("conversation_id", conversation_id)])
            .send().await?;
        let data = Self::check(resp, "Failed to fetch messages")?
            .json::<Vec<Message>>().await?;
        Ok(data)
    }

    async fn append_message(
        &self,
        conversation_id: i64,
        role: Role,
        content: &str
    ) -> Result<Message, ChefError> {
        let url = self.url(&self.config.tables.messages);
        debug!("POST {} conversation_id={} role={}", url, conversation_id, role.as_str());
        let body = AppendMessageRequest { conversation_id, role, content };
        let resp = self.http.post(&url).json(&body).send().await?;
        let data = Self::check(resp, "Failed to add message")?
            .json::<Message>().await?;
        Ok(data)
    }
}
