/// One successful download: the resolved track title and its download link.
///
/// Entries are immutable; identity is their position in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    label: String,
    link: String,
}

impl HistoryEntry {
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn link(&self) -> &str {
        &self.link
    }
}
