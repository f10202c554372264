//! Note editing session
//!
//! The orchestrator that owns the note and turns user actions into
//! completion requests, plus the small state machines it is built from.

mod editor_events;
mod editor_state;
mod format_menu;
mod loading;
mod note;
mod selection;

pub use editor_state::{EditorState, Suggestion, TriggerError};
pub use format_menu::{FORMAT_ACTIONS, FormatAction, FormatMenuState};
pub use loading::{LoadingState, OperationKind};
pub use note::Note;
pub use selection::{SelectionAnchor, SelectionTracker, TextPosition};
