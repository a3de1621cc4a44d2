//! Which card, if any, is expanded

use serde::Serialize;

/// Expansion state of the grid; at most one card is ever expanded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "name", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    Collapsed,
    Expanded(String),
}

/// Result of a selection transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Opened(String),
    Closed(String),
    Switched { from: String, to: String },
}

impl Selection {
    pub fn expanded_name(&self) -> Option<&str> {
        match self {
            Selection::Collapsed => None,
            Selection::Expanded(name) => Some(name),
        }
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded_name() == Some(name)
    }

    /// Card click: open, toggle closed, or switch directly to another card
    pub fn select(&mut self, name: &str) -> SelectionChange {
        let previous = std::mem::take(self);
        match previous {
            Selection::Collapsed => {
                *self = Selection::Expanded(name.to_string());
                SelectionChange::Opened(name.to_string())
            }
            Selection::Expanded(current) if current == name => SelectionChange::Closed(current),
            Selection::Expanded(current) => {
                *self = Selection::Expanded(name.to_string());
                SelectionChange::Switched {
                    from: current,
                    to: name.to_string(),
                }
            }
        }
    }

    /// Close affordance; returns the card that was open
    pub fn collapse(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Selection::Collapsed => None,
            Selection::Expanded(name) => Some(name),
        }
    }
}
