mod chat;
mod core;

pub use self::chat::{ChatClient, FALLBACK_REPLY};
pub use self::core::{Message, Role, completion};
