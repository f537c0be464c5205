//! Core business logic for msgcreator.
//!
//! This crate contains the message-board logic with ZERO web or database
//! dependencies. Persistence is reached through the [`message::MessageStore`]
//! trait, implemented by the db crate.
//!
//! # Modules
//!
//! - `cdn` - Public URL generation for stored images
//! - `storage` - Object storage for uploaded images
//! - `message` - Posting and listing messages

pub mod cdn;
pub mod message;
pub mod storage;
