// Host-side tests for the single-live-instance registry.

use scene_core::{InstanceId, ManagedInstance, SceneRegistry};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Fake {
    id: InstanceId,
    disposed: Cell<u32>,
}

impl Fake {
    fn new(id: InstanceId) -> Rc<Self> {
        Rc::new(Self {
            id,
            disposed: Cell::new(0),
        })
    }
}

impl ManagedInstance for Fake {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn dispose(&self) {
        self.disposed.set(self.disposed.get() + 1);
    }
}

fn current_id(registry: &SceneRegistry<Fake>) -> Option<InstanceId> {
    registry.current().map(|f| f.id)
}

#[test]
fn install_disposes_the_previous_instance() {
    let registry = SceneRegistry::new();
    let a = Fake::new(1);
    let b = Fake::new(2);
    registry.install(a.clone());
    registry.install(b.clone());
    assert_eq!(a.disposed.get(), 1);
    assert_eq!(b.disposed.get(), 0);
    assert_eq!(current_id(&registry), Some(2));
}

#[test]
fn reinstalling_the_same_instance_keeps_it_alive() {
    let registry = SceneRegistry::new();
    let a = Fake::new(7);
    registry.install(a.clone());
    registry.install(a.clone());
    assert_eq!(a.disposed.get(), 0);
    assert_eq!(current_id(&registry), Some(7));
}

#[test]
fn stale_release_leaves_the_slot_alone() {
    let registry = SceneRegistry::new();
    registry.install(Fake::new(1));
    registry.install(Fake::new(2));
    assert!(!registry.release(1));
    assert_eq!(current_id(&registry), Some(2));
    assert!(registry.release(2));
    assert_eq!(current_id(&registry), None);
    assert!(!registry.release(2));
}

#[test]
fn subscribers_see_every_change_until_unsubscribed() {
    let registry = SceneRegistry::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let sub = registry.subscribe(move |current: Option<&Rc<Fake>>| {
        sink.borrow_mut().push(current.map(|f| f.id));
    });

    registry.install(Fake::new(1));
    registry.install(Fake::new(2));
    registry.release(2);
    assert_eq!(*seen.borrow(), vec![Some(1), Some(2), None]);

    assert!(registry.unsubscribe(sub));
    assert!(!registry.unsubscribe(sub));
    registry.install(Fake::new(3));
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn dispose_current_tears_down_and_clears() {
    let registry = SceneRegistry::new();
    let a = Fake::new(4);
    registry.install(a.clone());
    registry.dispose_current();
    assert_eq!(a.disposed.get(), 1);
    assert!(registry.current().is_none());

    registry.dispose_current();
    assert_eq!(a.disposed.get(), 1);
}

#[test]
fn subscriber_may_read_the_registry() {
    let registry = Rc::new(SceneRegistry::<Fake>::new());
    let inner = Rc::downgrade(&registry);
    let seen = Rc::new(Cell::new(0));
    let sink = seen.clone();
    registry.subscribe(move |_| {
        if let Some(r) = inner.upgrade() {
            sink.set(r.current().map(|f| f.id).unwrap_or(0));
        }
    });
    registry.install(Fake::new(9));
    assert_eq!(seen.get(), 9);
}
