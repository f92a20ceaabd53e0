/// The raw text in the search box. Mutated on every keystroke, never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    raw: String,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the raw text. Returns `false` when the text did not actually change.
    pub fn set(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if raw == self.raw {
            return false;
        }
        self.raw = raw;
        true
    }

    pub fn current(&self) -> &str {
        &self.raw
    }
}
