//! # Listener Registry
//!
//! Synchronous subscriptions to store state.
//!
//! Each store owns a `Listeners<S>` and calls [`Listeners::notify`] once at
//! the end of every mutating method, after the state is fully updated. A
//! listener therefore only ever sees complete states.

use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn FnMut(&S)>;

/// Ordered set of listeners for a state type `S`.
pub struct Listeners<S> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener<S>)>,
}

impl<S> Listeners<S> {
    pub fn new() -> Self {
        Listeners {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Registers a listener. Listeners run in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&S) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Calls every listener with the current state.
    pub fn notify(&mut self, state: &S) {
        for (_, listener) in self.entries.iter_mut() {
            listener(state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for Listeners<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Listeners<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<u32> = Listeners::new();

        let a = Rc::clone(&seen);
        listeners.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = Rc::clone(&seen);
        listeners.subscribe(move |v| b.borrow_mut().push(("b", *v)));

        listeners.notify(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners: Listeners<()> = Listeners::default();

        let c = Rc::clone(&count);
        let id = listeners.subscribe(move |_| *c.borrow_mut() += 1);
        listeners.notify(&());
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.notify(&());

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut listeners: Listeners<()> = Listeners::new();
        let first = listeners.subscribe(|_| {});
        listeners.unsubscribe(first);
        let second = listeners.subscribe(|_| {});
        assert_ne!(first, second);
        assert_eq!(listeners.len(), 1);
    }
}
