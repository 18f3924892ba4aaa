use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dal::{ChatStore, StoreError},
    domain::{DealSet, NewMessage, Role, User},
};

use super::{ChatCompleter, DealScraper};

pub const LOCATION_QUESTION: &str = "Hey camper! Before we start, what city or ZIP are you in?";
pub const GREETING_FALLBACK: &str = "Unable to fetch outdoor info right now.";
pub const NO_RESPONSE: &str = "No response.";

const MIN_MESSAGE_CHARS: usize = 2;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("message must be at least 2 characters")]
    MessageTooShort,
    #[error("conversation {0} not found")]
    ConversationNotFound(Uuid),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Opening {
    AskLocation(String),
    Greeting(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exchange {
    pub conversation_id: Option<Uuid>,
    pub reply: String,
}

/// The outdoor chat flow: location onboarding, greetings and persisted exchanges.
pub struct Assistant {
    store: Arc<dyn ChatStore>,
    chat: Arc<dyn ChatCompleter>,
    deals: Arc<DealScraper>,
}

impl Assistant {
    pub fn new(
        store: Arc<dyn ChatStore>,
        chat: Arc<dyn ChatCompleter>,
        deals: Arc<DealScraper>,
    ) -> Self {
        Assistant { store, chat, deals }
    }

    pub fn store(&self) -> &dyn ChatStore {
        self.store.as_ref()
    }

    pub async fn open_session(&self, user: &User) -> Result<Opening, AssistantError> {
        let profile = match self.store.profile(user.id).await? {
            Some(profile) => profile,
            None => {
                log::info!("Creating profile for user {}", user.id);
                self.store.insert_profile(user.id).await?
            }
        };

        match profile.known_location() {
            Some(location) => Ok(Opening::Greeting(self.greet(location).await)),
            None => Ok(Opening::AskLocation(LOCATION_QUESTION.to_string())),
        }
    }

    pub async fn set_location(&self, user: &User, location: &str) -> Result<String, AssistantError> {
        let location = location.trim();
        if location.chars().count() < MIN_MESSAGE_CHARS {
            return Err(AssistantError::MessageTooShort);
        }

        self.store.update_location(user.id, location).await?;
        Ok(self.greet(location).await)
    }

    pub async fn greet(&self, location: &str) -> String {
        let deals = self.deals.gather().await;
        let prompt = greeting_prompt(location, &deals_line(&deals));

        match self.chat.complete(&prompt).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => GREETING_FALLBACK.to_string(),
            Err(e) => {
                log::error!("Greeting completion failed: {:?}", e);
                GREETING_FALLBACK.to_string()
            }
        }
    }

    pub async fn send_message(
        &self,
        user: &User,
        conversation_id: Option<Uuid>,
        text: &str,
    ) -> Result<Exchange, AssistantError> {
        let text = text.trim();
        let text_len = text.chars().count();
        if text_len < MIN_MESSAGE_CHARS {
            return Err(AssistantError::MessageTooShort);
        }

        let conversation_id = match conversation_id {
            Some(id) => match self.store.conversation(id).await? {
                Some(c) if c.user_id == user.id => Some(c.id),
                _ => return Err(AssistantError::ConversationNotFound(id)),
            },
            // Two-character messages get a reply but no conversation.
            None if text_len > MIN_MESSAGE_CHARS => {
                let title = conversation_title(user);
                Some(self.store.create_conversation(user.id, &title).await?.id)
            }
            None => None,
        };

        let reply = match self.chat.complete(&outdoor_prompt(text)).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => NO_RESPONSE.to_string(),
            Err(e) => {
                log::error!("Chat completion failed: {:?}", e);
                NO_RESPONSE.to_string()
            }
        };

        if let Some(id) = conversation_id {
            self.store
                .insert_messages(
                    id,
                    &[
                        NewMessage {
                            role: Role::User,
                            content: text.to_string(),
                        },
                        NewMessage {
                            role: Role::Assistant,
                            content: reply.clone(),
                        },
                    ],
                )
                .await?;
        }

        Ok(Exchange {
            conversation_id,
            reply,
        })
    }
}

pub fn conversation_title(user: &User) -> String {
    format!("{}_chat_{}", user.handle(), Utc::now().timestamp_millis())
}

/// First line of each source joined together, or empty when there is nothing to show.
pub fn deals_line(deals: &DealSet) -> String {
    let combined = deals
        .iter()
        .filter_map(|(_, entries)| entries.first())
        .filter(|d| !d.is_empty())
        .map(|d| d.as_str())
        .collect::<Vec<&str>>()
        .join(" | ");

    match combined.is_empty() {
        true => String::new(),
        false => format!("Current outdoor deals: {}", combined),
    }
}

pub fn greeting_prompt(location: &str, deals_line: &str) -> String {
    format!(
        r#"
You are an outdoors and camping assistant.
Generate a friendly one-paragraph greeting for someone located in {}.
Include:
- today's weather summary,
- short climate trend for the week,
- 1–2 hiking spots nearby,
- and append this if provided: "{}".
Do not use emojis. Keep under 120 words.
"#,
        location, deals_line
    )
}

pub fn outdoor_prompt(text: &str) -> String {
    format!(
        "You are a helpful outdoor-activity assistant.\nOnly answer about camping, hiking, outdoor gear, or weather.\nUser says: {}",
        text
    )
}
