//! Terminal front end
//!
//! Key handling and rendering around [`EditorState`](crate::editor::EditorState).
//! The text widgets are views; the editor's note is the source of truth.

mod app_events;
mod app_render;
mod app_state;

pub use app_state::{App, Focus};
