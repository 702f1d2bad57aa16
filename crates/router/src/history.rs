//! Navigation history.

use crate::HOME_PATH;
use std::collections::VecDeque;

/// Back/forward stack of visited locations.
///
/// Pushing discards any forward entries. When the stack grows past `limit`
/// the oldest entries are dropped.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    index: usize,
    limit: usize,
}

impl History {
    /// Start with a single `/` entry.
    pub fn new(limit: usize) -> Self {
        Self::starting_at(HOME_PATH, limit)
    }

    pub fn starting_at(path: impl Into<String>, limit: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(path.into());
        Self {
            entries,
            index: 0,
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> &str {
        self.entries
            .get(self.index)
            .map(String::as_str)
            .unwrap_or(HOME_PATH)
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(path.into());

        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
    }

    pub fn replace(&mut self, path: impl Into<String>) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = path.into(),
            None => self.push(path),
        }
    }

    /// Step back one entry. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one entry. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Index of the current entry within [`History::entries`].
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
