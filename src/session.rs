/*!
 * Editing session for a psalter document.
 *
 * The session owns the ordered document sequence, a list of single items and
 * whole fragment groups, and is its only writer. Every operation runs to
 * completion; out-of-range indices are ignored rather than treated as errors.
 * `flatten` expands groups in place to produce the compiler's input.
 */

use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::content::{ContentItem, DocumentEntry};

/// The mutable document sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingSession {
    entries: Vec<DocumentEntry>,
}

impl EditingSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session of single items, as read back from a project file
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        Self {
            entries: items.into_iter().map(DocumentEntry::Leaf).collect(),
        }
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry at the end, or at the front when `at_end` is false
    pub fn insert(&mut self, entry: impl Into<DocumentEntry>, at_end: bool) {
        let entry = entry.into();
        if at_end {
            self.entries.push(entry);
        } else {
            self.entries.insert(0, entry);
        }
    }

    /// Insert an entry before `index`; indices past the end append
    pub fn insert_at(&mut self, index: usize, entry: impl Into<DocumentEntry>) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry.into());
    }

    /// Swap the entry with its predecessor and return its new index.
    ///
    /// The first entry and out-of-range indices stay where they are.
    pub fn move_up(&mut self, index: usize) -> usize {
        if index == 0 || index >= self.entries.len() {
            return index;
        }
        self.entries.swap(index, index - 1);
        index - 1
    }

    /// Swap the entry with its successor and return its new index.
    ///
    /// The last entry and out-of-range indices stay where they are.
    pub fn move_down(&mut self, index: usize) -> usize {
        if index >= self.entries.len().saturating_sub(1) {
            return index;
        }
        self.entries.swap(index, index + 1);
        index + 1
    }

    /// Remove and return the entry at `index`
    pub fn delete_at(&mut self, index: usize) -> Option<DocumentEntry> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    /// Replace a single item. Fragment groups are not field-editable, so
    /// replacing one is refused; returns whether the entry was replaced.
    pub fn replace_at(&mut self, index: usize, item: ContentItem) -> bool {
        match self.entries.get_mut(index) {
            Some(DocumentEntry::Leaf(existing)) => {
                *existing = item;
                true
            }
            Some(DocumentEntry::Group(group)) => {
                debug!("Refusing to edit fragment group {} in place", group.source_file());
                false
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Every leaf item in document order, groups expanded in place
    pub fn flatten(&self) -> Vec<ContentItem> {
        self.entries
            .iter()
            .flat_map(|entry| entry.items().iter().cloned())
            .collect()
    }

    /// Display labels of the entries, in order
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(DocumentEntry::display_label).collect()
    }
}

/// Shared handle that serializes access to a session.
///
/// Mutations run to completion under the lock; readers take a flattened
/// snapshot so compilation and typesetting never hold it.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<EditingSession>>,
}

impl SessionHandle {
    pub fn new(session: EditingSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session
    pub fn update<R>(&self, f: impl FnOnce(&mut EditingSession) -> R) -> R {
        let mut session = self.inner.lock();
        f(&mut session)
    }

    /// Flattened copy of the current sequence
    pub fn snapshot(&self) -> Vec<ContentItem> {
        self.inner.lock().flatten()
    }

    /// Display labels of the current sequence
    pub fn labels(&self) -> Vec<String> {
        self.inner.lock().labels()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
