//! Observable, last-write-wins state cells.
//!
//! A [`MutableState`] holds one value and a list of observers. Writes that
//! the cell's [`MutationPolicy`] considers equivalent to the current value
//! are dropped without notifying anyone, so observers fire on value
//! *changes*, not on writes.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::runtime::RuntimeHandle;

/// Decides whether a write replaces the stored value.
pub trait MutationPolicy<T> {
    fn equivalent(&self, current: &T, next: &T) -> bool;
}

/// Writes equal to the current value (`==`) are no-ops.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralEqualityPolicy;

impl<T: PartialEq> MutationPolicy<T> for StructuralEqualityPolicy {
    fn equivalent(&self, current: &T, next: &T) -> bool {
        current == next
    }
}

type Observer<T> = Rc<dyn Fn(&T)>;

struct StateInner<T> {
    value: T,
    policy: Box<dyn MutationPolicy<T>>,
    observers: IndexMap<u64, Observer<T>>,
    next_observer_id: u64,
    runtime: Option<RuntimeHandle>,
}

pub struct MutableState<T: Clone + 'static> {
    inner: Rc<RefCell<StateInner<T>>>,
}

impl<T: Clone + 'static> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self::with_policy(value, StructuralEqualityPolicy)
    }

    /// Creates a cell whose writes are checked against the runtime's UI
    /// thread in debug builds.
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        let state = Self::new(value);
        state.inner.borrow_mut().runtime = Some(runtime);
        state
    }
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn with_policy(value: T, policy: impl MutationPolicy<T> + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StateInner {
                value,
                policy: Box::new(policy),
                observers: IndexMap::new(),
                next_observer_id: 1,
                runtime: None,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn value(&self) -> T {
        self.get()
    }

    /// Stores `value` and notifies observers. Returns false when the write
    /// was equivalent to the current value and therefore dropped.
    pub fn set(&self, value: T) -> bool {
        let observers: Vec<Observer<T>> = {
            let mut inner = self.inner.borrow_mut();
            if let Some(runtime) = inner.runtime.as_ref() {
                runtime.assert_ui_thread();
            }
            if inner.policy.equivalent(&inner.value, &value) {
                return false;
            }
            inner.value = value.clone();
            inner.observers.values().cloned().collect()
        };
        for observer in observers {
            observer(&value);
        }
        true
    }

    /// Registers `observer`, called with every new value. The observer stays
    /// registered until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_observer_id;
            inner.next_observer_id += 1;
            inner.observers.insert(id, Rc::new(observer));
            id
        };
        let weak: Weak<RefCell<StateInner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    match inner.try_borrow_mut() {
                        Ok(mut inner) => {
                            inner.observers.shift_remove(&id);
                        }
                        Err(_) => log::warn!("observer {id} dropped while its state was borrowed"),
                    }
                }
            })),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: self.clone(),
        }
    }
}

impl<T: Clone + std::fmt::Debug + 'static> std::fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MutableState")
            .field(&self.inner.borrow().value)
            .finish()
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T: Clone + 'static> {
    inner: MutableState<T>,
}

impl<T: Clone + 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> State<T> {
    pub fn get(&self) -> T {
        self.inner.get()
    }

    pub fn value(&self) -> T {
        self.inner.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        self.inner.subscribe(observer)
    }
}

/// Guard returned by [`MutableState::subscribe`].
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
