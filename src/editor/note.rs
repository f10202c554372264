/// The note being edited
///
/// Lives only for the session. Tags keep their order and are never
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub content: String,
    pub title: String,
    pub tags: Vec<String>,
}

impl Note {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there is nothing but whitespace to send to the model
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Remove the tag at `index`, returning it; out-of-range is a no-op
    pub fn remove_tag(&mut self, index: usize) -> Option<String> {
        if index < self.tags.len() {
            Some(self.tags.remove(index))
        } else {
            None
        }
    }
}
