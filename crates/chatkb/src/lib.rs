//! Chatkb - Chat Relay and Knowledge Base
//!
//! Relays chat messages to an OpenAI-compatible completion API, remembers the
//! last few exchanges, and lets users promote an answer into a tagged,
//! file-backed knowledge base.

pub mod completion;
pub mod config;
pub mod persistence;
pub mod records;
pub mod server;
pub mod service;
pub mod store;
