pub mod account;
pub mod conversation;
pub mod deal_set;
pub mod html_tag;
pub mod source;

pub use account::*;
pub use conversation::*;
pub use deal_set::*;
pub use source::*;
