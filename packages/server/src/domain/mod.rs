//! Domain layer: entities, value objects and the interfaces the use cases depend on.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod name_generator;
pub mod repository;
pub mod roster;
pub mod value_object;

pub use entity::{ChatMessage, Notification, Participant, welcome_message};
pub use error::{MessagePushError, RepositoryError, RosterError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use name_generator::{FixedNameGenerator, NameGenerator, RandomNameGenerator};
pub use repository::RosterRepository;
pub use roster::Roster;
pub use value_object::{ChannelId, ChannelIdFactory, DisplayName, MessageContent, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
