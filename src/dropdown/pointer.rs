//! Outside-click listener registry
//!
//! The terminal has one global pointer stream. A dropdown only wants to
//! hear about pointer-downs elsewhere while its menu is open, so it
//! subscribes on open and holds the returned [`ListenerGuard`]. Dropping
//! the guard unsubscribes; there is no other way to unsubscribe, so a
//! closed or dropped dropdown can never leave a stale listener behind.
//!
//! The host asks the registry who is subscribed ([`PointerListeners::subscribers`])
//! and delivers an outside press to those dropdowns only.
//!
//! Single-threaded by design of the UI loop (`Rc`, not `Arc`).

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Identifier of one live subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeSet<ListenerId>,
}

/// Shared registry of outside-click subscriptions
///
/// Cheap to clone; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    inner: Rc<RefCell<Registry>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays registered until the guard is dropped
    pub fn subscribe(&self) -> ListenerGuard {
        let mut registry = self.inner.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.active.insert(id);
        tracing::trace!(listener = id.0, "pointer listener registered");

        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions
    pub fn active(&self) -> usize {
        self.inner.borrow().active.len()
    }

    /// Live subscriptions in the order they were taken
    pub fn subscribers(&self) -> Vec<ListenerId> {
        self.inner.borrow().active.iter().copied().collect()
    }
}

/// Live outside-click subscription, released on drop
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Still registered (false once the registry itself is gone)
    pub fn is_live(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().active.contains(&self.id))
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.remove(&self.id);
            tracing::trace!(listener = self.id.0, "pointer listener released");
        }
    }
}
