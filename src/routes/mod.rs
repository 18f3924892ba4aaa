pub mod api_error;
pub mod assistant_route;
pub mod auth_route;
pub mod chat_route;
pub mod deals_route;
pub mod default_route;
pub mod history_route;

pub use api_error::ApiError;
pub use deals_route::RevalidationWindow;
