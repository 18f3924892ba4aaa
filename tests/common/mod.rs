#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::TcpListener,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use trailmix::{
    dal::{ChatStore, StoreError},
    domain::{Conversation, Message, NewMessage, Profile, Session, Source, User},
    routes::RevalidationWindow,
    services::{ChatCompleter, ChatError, DealScraper, PageFetcher, SessionError, SessionProvider},
    startup::{run, AppState},
};
use uuid::Uuid;

pub const TOKEN: &str = "token-camper";
pub const OTHER_TOKEN: &str = "token-other";

pub fn test_sources() -> Vec<Source> {
    vec![
        Source::new("A", "https://a.test/", "fallback A"),
        Source::new("B", "https://b.test/", "fallback B"),
        Source::new("C", "https://c.test/", "fallback C"),
    ]
}

pub struct FixtureFetcher {
    pub pages: HashMap<String, String>,
}

impl FixtureFetcher {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        FixtureFetcher {
            pages: pages
                .iter()
                .map(|(u, p)| (u.to_string(), p.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> String {
        self.pages.get(url).cloned().unwrap_or_default()
    }
}

/// Replies with a fixed text (or fails) and remembers every prompt.
pub struct ScriptedChat {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedChat {
    pub fn replying(reply: &str) -> Self {
        ScriptedChat {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        ScriptedChat {
            reply: None,
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompleter for ScriptedChat {
    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ChatError::Upstream(
                async_openai::error::OpenAIError::InvalidArgument("offline".to_string()),
            )),
        }
    }
}

pub struct FakeSessions {
    pub users: HashMap<String, User>,
}

impl FakeSessions {
    pub fn new() -> Self {
        let mut users = HashMap::new();
        users.insert(
            TOKEN.to_string(),
            User {
                id: Uuid::new_v4(),
                email: Some("camper@example.com".to_string()),
            },
        );
        users.insert(
            OTHER_TOKEN.to_string(),
            User {
                id: Uuid::new_v4(),
                email: Some("other@example.com".to_string()),
            },
        );
        FakeSessions { users }
    }
}

#[async_trait]
impl SessionProvider for FakeSessions {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<User, SessionError> {
        Ok(User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        match (email, password) {
            ("camper@example.com", "hunter22") => Ok(Session {
                access_token: TOKEN.to_string(),
                refresh_token: "refresh".to_string(),
                expires_in: 3600,
                user: self.users[TOKEN].clone(),
            }),
            _ => Err(SessionError::InvalidCredentials),
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), SessionError> {
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<User>, SessionError> {
        Ok(self.users.get(access_token).cloned())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub profiles: Mutex<HashMap<Uuid, Profile>>,
    pub conversations: Mutex<Vec<Conversation>>,
    pub messages: Mutex<Vec<Message>>,
}

#[async_trait]
impl ChatStore for MemoryStore {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }

    async fn insert_profile(&self, user_id: Uuid) -> Result<Profile, StoreError> {
        let profile = Profile {
            id: user_id,
            location: None,
        };
        self.profiles
            .lock()
            .unwrap()
            .entry(user_id)
            .or_insert(profile.clone());
        Ok(profile)
    }

    async fn update_location(&self, user_id: Uuid, location: &str) -> Result<(), StoreError> {
        self.profiles.lock().unwrap().insert(
            user_id,
            Profile {
                id: user_id,
                location: Some(location.to_string()),
            },
        );
        Ok(())
    }

    async fn create_conversation(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> Result<Conversation, StoreError> {
        let conversation = Conversation {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            created_at: Utc::now(),
        };
        self.conversations.lock().unwrap().push(conversation.clone());
        Ok(conversation)
    }

    async fn conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, StoreError> {
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == conversation_id)
            .cloned())
    }

    async fn conversations(&self, user_id: Uuid) -> Result<Vec<Conversation>, StoreError> {
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_messages(
        &self,
        conversation_id: Uuid,
        messages: &[NewMessage],
    ) -> Result<(), StoreError> {
        let mut stored = self.messages.lock().unwrap();
        for m in messages {
            stored.push(Message {
                id: Uuid::new_v4(),
                conversation_id,
                role: m.role,
                content: m.content.clone(),
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn messages(&self, conversation_id: Uuid) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub chat: Arc<ScriptedChat>,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

pub async fn spawn_app_with(
    fetcher: Arc<dyn PageFetcher>,
    sources: Vec<Source>,
    chat: Arc<ScriptedChat>,
) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let store = Arc::new(MemoryStore::default());

    let state = AppState {
        deals: DealScraper::new(fetcher, sources),
        revalidation: RevalidationWindow(Duration::from_secs(1800)),
        chat: chat.clone(),
        sessions: Arc::new(FakeSessions::new()),
        store: store.clone(),
    };
    let server = run(listener, state).expect("Failed to bind address");
    tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        chat,
        store,
    }
}

pub async fn spawn_app(pages: &[(&str, &str)], chat: ScriptedChat) -> TestApp {
    spawn_app_with(
        Arc::new(FixtureFetcher::new(pages)),
        test_sources(),
        Arc::new(chat),
    )
    .await
}
