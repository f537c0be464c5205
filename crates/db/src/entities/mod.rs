//! `SeaORM` entities.

pub mod messages;
