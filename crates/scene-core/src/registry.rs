//! Injected lookup for "the one live scene".
//!
//! The composition root owns a [`SceneRegistry`] and hands it to whatever
//! needs the active instance. Installing a new instance disposes the previous
//! one first, and a late release from an already replaced instance leaves the
//! slot alone. All methods take `&self` and never hold a borrow while calling
//! out, so subscribers and `dispose` implementations may call back in.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type InstanceId = u64;

/// Something the registry can hold and tear down.
pub trait ManagedInstance {
    fn instance_id(&self) -> InstanceId;
    fn dispose(&self);
}

type Subscriber<T> = Rc<dyn Fn(Option<&Rc<T>>)>;

pub struct SceneRegistry<T> {
    current: RefCell<Option<Rc<T>>>,
    subscribers: RefCell<Vec<(u32, Subscriber<T>)>>,
    next_subscriber: Cell<u32>,
}

impl<T> Default for SceneRegistry<T> {
    fn default() -> Self {
        Self {
            current: RefCell::new(None),
            subscribers: RefCell::new(Vec::new()),
            next_subscriber: Cell::new(0),
        }
    }
}

impl<T: ManagedInstance> SceneRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Rc<T>> {
        self.current.borrow().clone()
    }

    /// Make `instance` the live one, disposing whatever was there before.
    pub fn install(&self, instance: Rc<T>) {
        let previous = self.current.borrow_mut().take();
        if let Some(prev) = previous {
            if prev.instance_id() != instance.instance_id() {
                log::info!(
                    "[registry] disposing instance {} before installing {}",
                    prev.instance_id(),
                    instance.instance_id()
                );
                prev.dispose();
            }
        }
        *self.current.borrow_mut() = Some(instance);
        self.notify();
    }

    /// Clear the slot if `id` is still the registered instance.
    pub fn release(&self, id: InstanceId) -> bool {
        let released = {
            let mut slot = self.current.borrow_mut();
            match slot.as_ref() {
                Some(current) if current.instance_id() == id => {
                    *slot = None;
                    true
                }
                _ => false,
            }
        };
        if released {
            self.notify();
        }
        released
    }

    /// Dispose and clear the live instance, if any.
    pub fn dispose_current(&self) {
        let previous = self.current.borrow_mut().take();
        if let Some(prev) = previous {
            prev.dispose();
            self.notify();
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn(Option<&Rc<T>>) + 'static) -> u32 {
        let id = self.next_subscriber.get() + 1;
        self.next_subscriber.set(id);
        self.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: u32) -> bool {
        let mut subs = self.subscribers.borrow_mut();
        let before = subs.len();
        subs.retain(|(sid, _)| *sid != id);
        subs.len() != before
    }

    fn notify(&self) {
        let current = self.current();
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(current.as_ref());
        }
    }
}
