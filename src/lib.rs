//! SmartNotes: a terminal note editor that asks a chat-completion model for
//! titles, tags, rewrites and continuations.

pub mod ai;
pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod notification;
pub mod widgets;
