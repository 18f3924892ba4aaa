//! Backend for the outdoor assistant: a best-effort retail deal scraper,
//! a chat-completion proxy and the signed-in chat flow built on top of them.

pub mod configuration;
pub mod dal;
pub mod domain;
pub mod routes;
pub mod services;
pub mod startup;
