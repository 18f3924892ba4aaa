pub mod chat_store;
pub mod conversation_db;
pub mod message_db;
pub mod profile_db;

pub use chat_store::*;
