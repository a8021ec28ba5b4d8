// Copyright 2025 the Kaymo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component-local observable state.
//!
//! An [`Observable`] holds the current value and notifies subscribers when it changes. It is a
//! thin wrapper over a `tokio::sync::watch` channel, so subscribers can `await` changes from a
//! task or poll [`watch::Receiver::has_changed`] from synchronous code.

use tokio::sync::watch;

/// A value with change notification.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    /// Creates a store holding `value`.
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Returns a receiver that sees every later change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Runs `f` against the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Mutates the value in place. Subscribers are notified only if `f` returns `true`.
    pub fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Observable<T> {
    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: PartialEq> Observable<T> {
    /// Replaces the value, notifying subscribers if it differs from the current one.
    pub fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_notifies_only_on_change() {
        let store = Observable::new(2024);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        assert!(!store.set(2024));
        assert!(!rx.has_changed().unwrap());

        assert!(store.set(2000));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 2000);
        assert_eq!(store.get(), 2000);
    }

    #[test]
    fn update_reports_modification() {
        let store = Observable::new(vec![1, 2]);
        let mut rx = store.subscribe();
        assert!(!store.update(|_| false));
        assert!(!rx.has_changed().unwrap());
        assert!(store.update(|v| {
            v.push(3);
            true
        }));
        assert_eq!(rx.borrow_and_update().len(), 3);
        assert_eq!(store.with(Vec::len), 3);
    }

    #[test]
    fn clones_share_the_value() {
        let a = Observable::new(0_u32);
        let b = a.clone();
        b.set(7);
        assert_eq!(a.get(), 7);
        let _rx = a.subscribe();
        assert_eq!(b.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn subscribers_can_await_changes() {
        let store = Observable::new("temperature");
        let mut rx = store.subscribe();
        let writer = store.clone();
        tokio::spawn(async move {
            writer.set("rainfall");
        });
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "rainfall");
    }
}
