//! Selection anchor tracking
//!
//! Captures the user's current text selection as an explicit byte range
//! over the note content. The anchor is what the contextual format menu is
//! positioned against; at most one exists at a time.

/// A `(row, column)` position over the content's lines
///
/// Columns count characters, not bytes, matching what the text widget
/// reports for its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TextPosition {
    pub row: usize,
    pub col: usize,
}

impl TextPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for TextPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A captured, non-empty selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionAnchor {
    /// Distinguishes successive anchors so a late format result only closes
    /// the menu it was started from
    pub id: u64,
    /// Byte offset of the selection start in the content
    pub start: usize,
    /// Byte offset one past the selection end
    pub end: usize,
    pub text: String,
    /// Where the selection ends; the menu is placed here
    pub end_position: TextPosition,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    anchor: Option<SelectionAnchor>,
    next_id: u64,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the selection between `from` and `to` (in either order)
    ///
    /// Any existing anchor is released first. Returns `None`, leaving no
    /// anchor behind, when the selection is empty or falls outside the
    /// content.
    pub fn capture(
        &mut self,
        content: &str,
        from: TextPosition,
        to: TextPosition,
    ) -> Option<&SelectionAnchor> {
        self.release();

        let (start_pos, end_pos) = if from <= to { (from, to) } else { (to, from) };
        let start = byte_offset(content, start_pos)?;
        let end = byte_offset(content, end_pos)?;
        if start == end {
            return None;
        }

        self.next_id = self.next_id.wrapping_add(1);
        self.anchor = Some(SelectionAnchor {
            id: self.next_id,
            start,
            end,
            text: content[start..end].to_string(),
            end_position: end_pos,
        });
        self.anchor.as_ref()
    }

    /// Drop the current anchor, if any
    pub fn release(&mut self) -> Option<SelectionAnchor> {
        self.anchor.take()
    }

    /// Drop the current anchor only if it is the one with `id`
    pub fn release_if(&mut self, id: u64) -> bool {
        if self.anchor.as_ref().is_some_and(|a| a.id == id) {
            self.anchor = None;
            true
        } else {
            false
        }
    }

    pub fn anchor(&self) -> Option<&SelectionAnchor> {
        self.anchor.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Convert a line/char position into a byte offset into `content`
///
/// A column equal to the line's length addresses the end of that line.
/// Returns `None` for rows or columns past the end.
pub fn byte_offset(content: &str, pos: TextPosition) -> Option<usize> {
    let mut offset = 0;
    for (row, line) in content.split('\n').enumerate() {
        if row == pos.row {
            if pos.col == 0 {
                return Some(offset);
            }
            let mut chars = line.char_indices().skip(pos.col);
            return match chars.next() {
                Some((byte, _)) => Some(offset + byte),
                None if line.chars().count() == pos.col => Some(offset + line.len()),
                None => None,
            };
        }
        offset += line.len() + 1;
    }
    None
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
