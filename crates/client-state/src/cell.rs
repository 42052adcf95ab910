//! Observable state cell with synchronous push notification.
//!
//! A [`Cell`] holds one value and a list of observer callbacks. Replacing
//! the value notifies every observer synchronously, in registration order,
//! on the one thread the client runs on. Handles are cheap `Rc` clones, so
//! producers and consumers can each hold the same cell.
//!
//! ```ignore
//! let title = Cell::new("cur_media_title", "(no video loaded)".to_string());
//! let sub = title.subscribe(|t| render_title(t));
//! title.set("Intro.mp4".to_string());
//! drop(sub); // unregisters
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type ObserverCallback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Observer<T> {
    id: u64,
    callback: ObserverCallback<T>,
}

struct ObserverList<T> {
    entries: Vec<Observer<T>>,
    next_id: u64,
}

/// One queued notification round: the value published by a `set` that
/// arrived while another round was running, plus the observers registered
/// at publish time.
struct PendingRound<T> {
    value: T,
    observer_ids: Vec<u64>,
}

struct NotifyQueue<T> {
    running: bool,
    pending: VecDeque<PendingRound<T>>,
}

struct CellInner<T> {
    /// Cell name, used as a structured logging field.
    name: &'static str,
    value: RefCell<T>,
    observers: RefCell<ObserverList<T>>,
    queue: RefCell<NotifyQueue<T>>,
}

impl<T: Clone + 'static> CellInner<T> {
    fn observer_ids(&self) -> Vec<u64> {
        self.observers.borrow().entries.iter().map(|o| o.id).collect()
    }

    fn find_callback(&self, id: u64) -> Option<ObserverCallback<T>> {
        self.observers
            .borrow()
            .entries
            .iter()
            .find(|o| o.id == id)
            .map(|o| Rc::clone(&o.callback))
    }

    fn remove_observer(&self, id: u64) {
        let mut observers = self.observers.borrow_mut();
        let before = observers.entries.len();
        observers.entries.retain(|o| o.id != id);
        if observers.entries.len() != before {
            tracing::debug!(cell = self.name, observer_id = id, "Observer unregistered");
        }
    }

    /// Deliver one published value to the observers that were registered
    /// when it was published. Observers unregistered since (or during the
    /// round, possibly by their own callback) are skipped; no borrow is
    /// held while a callback runs, so callbacks are free to call back into
    /// the cell.
    fn run_round(&self, value: &T, observer_ids: &[u64]) {
        for &id in observer_ids {
            if let Some(callback) = self.find_callback(id) {
                (&mut *callback.borrow_mut())(value);
            }
        }
    }

    /// Try to become the delivering caller. Returns false if a round is
    /// already in progress, in which case the caller must queue instead of
    /// delivering (the in-progress caller drains the queue).
    fn begin_delivery(&self) -> bool {
        let mut queue = self.queue.borrow_mut();
        if queue.running {
            return false;
        }
        queue.running = true;
        true
    }

    /// Run every round queued while delivery was in progress, then release
    /// the delivering role.
    fn finish_delivery(&self) {
        loop {
            let next = self.queue.borrow_mut().pending.pop_front();
            match next {
                Some(round) => self.run_round(&round.value, &round.observer_ids),
                None => break,
            }
        }
        self.queue.borrow_mut().running = false;
    }
}

/// One independently observable slot of shared client state.
///
/// `get` returns a clone of the current value, `set` replaces it wholesale
/// and notifies observers, `subscribe` registers an observer callback and
/// hands back a [`Subscription`] guard that unregisters on drop. No
/// operation fails or blocks; everything runs synchronously on the calling
/// thread (`Cell` is deliberately neither `Send` nor `Sync`).
pub struct Cell<T> {
    inner: Rc<CellInner<T>>,
}

impl<T: Clone + 'static> Cell<T> {
    /// Create a cell holding `initial`. The name shows up in debug logs.
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            inner: Rc::new(CellInner {
                name,
                value: RefCell::new(initial),
                observers: RefCell::new(ObserverList {
                    entries: Vec::new(),
                    next_id: 0,
                }),
                queue: RefCell::new(NotifyQueue {
                    running: false,
                    pending: VecDeque::new(),
                }),
            }),
        }
    }

    /// Cell name as used in log output.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Current value. Never blocks, never fails.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Replace the value and synchronously notify every observer, in
    /// registration order.
    ///
    /// The stored value is updated before any observer runs, so `get`
    /// inside a callback already sees the new value. A `set` issued from
    /// within a notification callback does not nest rounds: delivery is
    /// queued and runs after the current round completes, so every observer
    /// sees every published value, in publish order.
    pub fn set(&self, value: T) {
        let round_value = value.clone();
        *self.inner.value.borrow_mut() = value;
        let observer_ids = self.inner.observer_ids();
        tracing::debug!(
            cell = self.inner.name,
            observers = observer_ids.len(),
            "Value replaced"
        );

        if !self.inner.begin_delivery() {
            tracing::debug!(cell = self.inner.name, "Delivery deferred: round in progress");
            self.inner.queue.borrow_mut().pending.push_back(PendingRound {
                value: round_value,
                observer_ids,
            });
            return;
        }
        self.inner.run_round(&round_value, &observer_ids);
        self.inner.finish_delivery();
    }

    /// Clone the current value, let `f` modify it, publish the result.
    /// Shorthand for read-modify-`set` on sequence and mapping cells.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Register an observer. The callback is invoked immediately with the
    /// current value, then on every subsequent `set`, until the returned
    /// guard is dropped.
    ///
    /// Values published before registration are never delivered, even when
    /// their rounds are still queued; the immediate call already carries
    /// the newest value. The immediate call is a normal notification: a
    /// `set` issued from inside it is queued and delivered after it
    /// returns, same as during any other round.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let callback: ObserverCallback<T> = Rc::new(RefCell::new(callback));
        let id = {
            let mut observers = self.inner.observers.borrow_mut();
            let id = observers.next_id;
            observers.next_id += 1;
            observers.entries.push(Observer {
                id,
                callback: Rc::clone(&callback),
            });
            id
        };
        tracing::debug!(cell = self.inner.name, observer_id = id, "Observer registered");

        // The immediate notification follows the same queue protocol as a
        // round started by `set`: without it, a `set` from inside this call
        // would deliver synchronously and re-borrow the callback mid-call.
        // When registration happens inside an already-running round, the
        // outer deliverer drains whatever this call queues.
        let delivering = self.inner.begin_delivery();
        let current = self.inner.value.borrow().clone();
        (&mut *callback.borrow_mut())(&current);
        if delivering {
            self.inner.finish_delivery();
        }

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.remove_observer(id);
                }
            })),
        }
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().entries.len()
    }
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("name", &self.inner.name)
            .field("value", &self.inner.value.borrow())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Guard for one observer registration. Dropping it unregisters the
/// observer; holding it keeps the callback alive. Safe to drop from within
/// a notification callback: other observers of the same round are neither
/// skipped nor invoked twice.
///
/// The guard holds only a weak reference to the cell, so it does not keep
/// the cell alive, and unregistering after the cell is gone is a no-op.
#[must_use = "dropping a Subscription unregisters the observer immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unregister now instead of at end of scope.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
