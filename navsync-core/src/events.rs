//! Observer plumbing for "links changed" notifications.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;

use crate::nav::NavModel;

/// Receives the rebuilt navigation after every [`crate::nav::NavBuilder::rebuild`].
pub trait NavListener {
    fn links_changed(&mut self, model: &NavModel);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Weakly held listeners; dropping the listener's last `Rc` unsubscribes it.
pub struct Subscribers<T: ?Sized> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Weak<RefCell<T>>)>,
}

impl<T: ?Sized> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<T: ?Sized> Subscribers<T> {
    pub fn subscribe(&mut self, listener: &Rc<RefCell<T>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Rc::downgrade(listener)));
        id
    }

    /// Returns `false` if the subscription was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Live subscriptions; dropped listeners are not counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke `f` on every live listener in subscription order and prune dead ones.
    /// Returns how many listeners were notified.
    pub fn notify(&mut self, mut f: impl FnMut(&mut T)) -> usize {
        self.entries.retain(|(_, weak)| weak.strong_count() > 0);
        let mut delivered = 0;
        for (id, weak) in &self.entries {
            let Some(listener) = weak.upgrade() else {
                continue;
            };
            // A listener that is already borrowed is mid-callback; skip rather than panic.
            match listener.try_borrow_mut() {
                Ok(mut guard) => {
                    f(&mut guard);
                    delivered += 1;
                }
                Err(_) => warn!("listener {id:?} busy, skipping notification"),
            }
        }
        delivered
    }
}
