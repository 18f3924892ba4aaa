pub mod assistant;
pub mod deal_extractor;
pub mod deal_fetcher;
pub mod deal_responder;
pub mod openai_client;
pub mod session_provider;

pub use assistant::*;
pub use deal_extractor::*;
pub use deal_fetcher::*;
pub use deal_responder::*;
pub use openai_client::*;
pub use session_provider::*;
