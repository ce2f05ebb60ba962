//! # Signal
//!
//! Single-producer, multi-consumer change notification used for every
//! piece of state propagation in the document core.
//!
//! Delivery is synchronous and happens on the caller's thread. Handlers are
//! invoked from a snapshot taken at the start of `emit`, so a handler may
//! connect or disconnect other handlers (or itself) while being notified.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifier returned by [`Signal::connect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

/// Type alias for a connected handler
type Slot<T> = Rc<dyn Fn(&T)>;

/// Callback registry with snapshot-based delivery
pub struct Signal<T> {
    slots: RefCell<Vec<(SlotId, Slot<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register a handler, returning the id needed to disconnect it
    pub fn connect(&self, handler: impl Fn(&T) + 'static) -> SlotId {
        let id = SlotId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.slots.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not connected.
    pub fn disconnect(&self, id: SlotId) -> bool {
        let mut slots = self.slots.borrow_mut();
        let before = slots.len();
        slots.retain(|(slot_id, _)| *slot_id != id);
        slots.len() != before
    }

    pub fn disconnect_all(&self) {
        self.slots.borrow_mut().clear();
    }

    pub fn slot_count(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Notify every handler connected at the time of the call, in order
    pub fn emit(&self, args: &T) {
        let snapshot: Vec<Slot<T>> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, slot)| Rc::clone(slot))
            .collect();

        for slot in snapshot {
            slot(args);
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slot_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_should_deliver_to_all_handlers_in_order() {
        let signal = Signal::<u32>::new();
        let received = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&received);
        signal.connect(move |value| first.borrow_mut().push(("first", *value)));
        let second = Rc::clone(&received);
        signal.connect(move |value| second.borrow_mut().push(("second", *value)));

        signal.emit(&7);

        assert_eq!(*received.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn disconnect_should_stop_delivery() {
        let signal = Signal::<()>::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = Rc::clone(&count);

        let id = signal.connect(move |_| count_clone.set(count_clone.get() + 1));
        signal.emit(&());
        assert!(signal.disconnect(id));
        signal.emit(&());

        assert_eq!(count.get(), 1);
        assert!(!signal.disconnect(id));
        assert_eq!(signal.slot_count(), 0);
    }

    #[test]
    fn handler_may_disconnect_itself_during_emit() {
        let signal = Rc::new(Signal::<()>::new());
        let id_cell: Rc<Cell<Option<SlotId>>> = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0));

        let weak_signal = Rc::downgrade(&signal);
        let id_for_handler = Rc::clone(&id_cell);
        let calls_for_handler = Rc::clone(&calls);
        let id = signal.connect(move |_| {
            calls_for_handler.set(calls_for_handler.get() + 1);
            if let (Some(signal), Some(id)) = (weak_signal.upgrade(), id_for_handler.get()) {
                signal.disconnect(id);
            }
        });
        id_cell.set(Some(id));

        signal.emit(&());
        signal.emit(&());

        assert_eq!(calls.get(), 1);
        assert_eq!(signal.slot_count(), 0);
    }

    #[test]
    fn handler_connected_during_emit_should_wait_for_next_emit() {
        let signal = Rc::new(Signal::<()>::new());
        let late_calls = Rc::new(Cell::new(0));

        let weak_signal = Rc::downgrade(&signal);
        let late = Rc::clone(&late_calls);
        signal.connect(move |_| {
            if let Some(signal) = weak_signal.upgrade() {
                let late = Rc::clone(&late);
                signal.connect(move |_| late.set(late.get() + 1));
            }
        });

        signal.emit(&());
        assert_eq!(late_calls.get(), 0);

        signal.emit(&());
        assert_eq!(late_calls.get(), 1);
    }
}
