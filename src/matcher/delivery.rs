use std::fmt;

use crate::candidate::Candidate;

/// One batch of matches handed to listeners.
#[derive(Debug)]
pub struct MatchDelivery<'a> {
    /// Token the matches belong to.
    pub token: &'a str,
    /// Rows to display, in order.
    pub matches: &'a [Candidate],
    /// Set on deliveries that augment an already-visible list; the UI
    /// should keep its current highlight.
    pub preserve_highlight: bool,
}

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

pub(crate) type Listener = Box<dyn FnMut(&MatchDelivery<'_>)>;

/// Listener registrations, notified in subscription order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<(ListenerHandle, Listener)>,
    next_id: u64,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl ListenerRegistry {
    pub fn subscribe(&mut self, callback: Listener) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((handle, callback));
        handle
    }

    /// Returns whether the handle was still registered.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub fn notify(&mut self, delivery: &MatchDelivery<'_>) {
        for (_, callback) in &mut self.entries {
            callback(delivery);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
