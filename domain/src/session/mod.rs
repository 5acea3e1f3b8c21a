//! Conversation domain.
//!
//! - [`entities::Message`]: a single `{role, content}` turn
//! - [`entities::Role`]: system, user or assistant

pub mod entities;
