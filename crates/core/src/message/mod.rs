//! Posting and listing messages.
//!
//! A message pairs a short text with one uploaded image. Posting writes the
//! image to object storage and then inserts the row; the two writes are
//! independent and a failed insert leaves the stored image in place.
//! Listing resolves each row's image to a public CDN URL.

mod error;
mod service;
mod types;

pub use error::MessageError;
pub use service::{MessageService, MessageStore};
pub use types::{
    DEFAULT_EXTENSION, Message, MessageEntry, NewMessage, PostMessageInput, PostedMessage,
    file_extension, object_key,
};
