#![forbid(unsafe_code)]

//! Live bindings over a [`Store`]: full views and lens-derived views.
//!
//! A [`Binding<T>`] mirrors the store's value. A [`DerivedBinding<T, U>`]
//! mirrors `project(value)` and writes back through `unproject`, so a
//! narrowed view still publishes through the store's single `set` path.
//!
//! Both kinds hold their own [`Subscription`]; dropping the binding
//! unsubscribes it. The cached value is kept behind an `Rc`, so `with`
//! runs its closure without holding the cache borrowed and the closure may
//! write to the store.

use std::cell::RefCell;
use std::rc::Rc;

use super::store::{Store, Subscription};

/// A read/write projection pair: `project: &T -> U` and
/// `unproject: (U, &T) -> T`.
///
/// Well-behaved lenses satisfy `project(&unproject(u, t)) == u`.
pub struct Lens<T, U> {
    project: Rc<dyn Fn(&T) -> U>,
    unproject: Rc<dyn Fn(U, &T) -> T>,
}

impl<T, U> Clone for Lens<T, U> {
    fn clone(&self) -> Self {
        Self {
            project: Rc::clone(&self.project),
            unproject: Rc::clone(&self.unproject),
        }
    }
}

impl<T, U> std::fmt::Debug for Lens<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lens").finish_non_exhaustive()
    }
}

impl<T, U> Lens<T, U> {
    pub fn new(
        project: impl Fn(&T) -> U + 'static,
        unproject: impl Fn(U, &T) -> T + 'static,
    ) -> Self {
        Self {
            project: Rc::new(project),
            unproject: Rc::new(unproject),
        }
    }

    #[must_use]
    pub fn project(&self, whole: &T) -> U {
        (self.project)(whole)
    }

    #[must_use]
    pub fn unproject(&self, part: U, whole: &T) -> T {
        (self.unproject)(part, whole)
    }
}

/// A live view of a store's full value.
///
/// `get()` always equals the store's current value.
pub struct Binding<T> {
    cached: Rc<RefCell<Rc<T>>>,
    _subscription: Subscription,
}

impl<T: Clone + 'static> Binding<T> {
    pub(crate) fn new(store: &Store<T>) -> Self {
        let cached = Rc::new(RefCell::new(Rc::new(store.get())));
        let target = Rc::clone(&cached);
        let subscription = store.subscribe(move |value: &T| {
            *target.borrow_mut() = Rc::new(value.clone());
        });
        Self {
            cached,
            _subscription: subscription,
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        T::clone(&self.cached.borrow())
    }

    /// Access the cached value by reference. `f` sees the value as it was
    /// when called, even if it publishes a new one.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let current = Rc::clone(&self.cached.borrow());
        f(&current)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.cached.borrow())
            .finish()
    }
}

type WriteHook<U> = Rc<dyn Fn(&U)>;

/// A live, writable view of `lens.project(store value)`.
pub struct DerivedBinding<T, U> {
    store: Store<T>,
    lens: Lens<T, U>,
    cached: Rc<RefCell<Rc<U>>>,
    on_write: Option<WriteHook<U>>,
    _subscription: Subscription,
}

impl<T: Clone + 'static, U: Clone + 'static> DerivedBinding<T, U> {
    pub(crate) fn new(store: &Store<T>, lens: Lens<T, U>) -> Self {
        let cached = Rc::new(RefCell::new(Rc::new(store.with(|whole| lens.project(whole)))));
        let target = Rc::clone(&cached);
        let projector = lens.clone();
        let subscription = store.subscribe(move |whole: &T| {
            *target.borrow_mut() = Rc::new(projector.project(whole));
        });
        Self {
            store: store.clone(),
            lens,
            cached,
            on_write: None,
            _subscription: subscription,
        }
    }

    /// Run `hook` with the new part before each write-through.
    #[must_use]
    pub fn on_write(mut self, hook: impl Fn(&U) + 'static) -> Self {
        self.on_write = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn get(&self) -> U {
        U::clone(&self.cached.borrow())
    }

    pub fn with<R>(&self, f: impl FnOnce(&U) -> R) -> R {
        let current = Rc::clone(&self.cached.borrow());
        f(&current)
    }

    /// Write `part` back: `store.set(unproject(part, current))`.
    pub fn set(&self, part: U) {
        if let Some(hook) = &self.on_write {
            hook(&part);
        }
        let next = self.store.with(|whole| self.lens.unproject(part, whole));
        self.store.set(next);
    }
}

impl<T, U: std::fmt::Debug> std::fmt::Debug for DerivedBinding<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedBinding")
            .field("value", &self.cached.borrow())
            .field("has_write_hook", &self.on_write.is_some())
            .finish()
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Bind to the full value. Dropping the binding unsubscribes it.
    #[must_use]
    pub fn subscribe_full(&self) -> Binding<T> {
        Binding::new(self)
    }

    /// Bind to a lens projection of the value, writable through the lens.
    #[must_use]
    pub fn subscribe_derived<U: Clone + 'static>(&self, lens: Lens<T, U>) -> DerivedBinding<T, U> {
        DerivedBinding::new(self, lens)
    }
}
