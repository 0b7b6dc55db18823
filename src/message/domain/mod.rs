//! Message domain types.

mod conversation;
mod error;
mod ids;
mod message;
mod role;

pub use conversation::Conversation;
pub use error::{MessageDomainError, ParseRoleError};
pub use ids::{ConversationId, MessageId};
pub use message::Message;
pub use role::Role;
