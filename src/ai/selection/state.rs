//! Selection state for the suggestion panel
//!
//! Tracks which suggestion is highlighted and whether the operator is
//! stepping through them with the navigation keys.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<usize>,
    /// Set once Alt+Up/Down/j/k has been used; Enter then inserts
    navigating: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight a suggestion directly (Alt+1..3)
    ///
    /// Direct selection does not enter navigation mode.
    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.navigating = false;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.navigating = false;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    /// Move to the next suggestion, wrapping to the first
    pub fn next(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.navigating = true;
        self.selected = Some(match self.selected {
            Some(current) => (current + 1) % count,
            None => 0,
        });
    }

    /// Move to the previous suggestion, wrapping to the last
    pub fn previous(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.navigating = true;
        self.selected = Some(match self.selected {
            Some(0) | None => count - 1,
            Some(current) => current - 1,
        });
    }

    /// The highlighted index, or the first suggestion when none is
    pub fn resolved(&self, count: usize) -> Option<usize> {
        match self.selected {
            Some(index) if index < count => Some(index),
            _ if count > 0 => Some(0),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
