//! REST API module for chatkb
//!
//! Exposes the chat, recent-history and knowledge-base operations over HTTP,
//! plus the pages of the browser front end.

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod types;
