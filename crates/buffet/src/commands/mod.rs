//! Subcommand implementations.

mod chat;
mod serve;

pub use chat::{ask, chat, models, new_thread, open, show, threads};
pub use serve::serve;
