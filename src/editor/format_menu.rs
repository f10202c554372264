//! Contextual format menu
//!
//! The preset rewrites offered for a selection, and which one is
//! highlighted while the menu is open.

/// A rewrite offered in the format menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatAction {
    pub label: &'static str,
    /// Sent to the model as the formatting instruction
    pub instruction: &'static str,
}

pub const FORMAT_ACTIONS: [FormatAction; 4] = [
    FormatAction {
        label: "Make it formal",
        instruction: "Rewrite this in a formal tone",
    },
    FormatAction {
        label: "Make it concise",
        instruction: "Make this more concise",
    },
    FormatAction {
        label: "Fix grammar",
        instruction: "Fix any grammar issues in this text",
    },
    FormatAction {
        label: "Rephrase",
        instruction: "Rephrase this text",
    },
];

/// Highlighted entry in the format menu
#[derive(Debug, Clone, Default)]
pub struct FormatMenuState {
    selected_index: usize,
}

impl FormatMenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the highlight to the first entry (menu reopened)
    pub fn reset(&mut self) {
        self.selected_index = 0;
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_action(&self) -> FormatAction {
        FORMAT_ACTIONS[self.selected_index]
    }

    /// Direct selection by index (digit keys); out-of-range is ignored
    pub fn select_index(&mut self, index: usize) -> Option<FormatAction> {
        let action = FORMAT_ACTIONS.get(index).copied()?;
        self.selected_index = index;
        Some(action)
    }

    /// Move to the next action, wrapping to the first at the end
    pub fn navigate_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % FORMAT_ACTIONS.len();
    }

    /// Move to the previous action, wrapping to the last at the start
    pub fn navigate_previous(&mut self) {
        self.selected_index = if self.selected_index == 0 {
            FORMAT_ACTIONS.len() - 1
        } else {
            self.selected_index - 1
        };
    }
}
