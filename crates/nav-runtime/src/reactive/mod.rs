#![forbid(unsafe_code)]

//! Observable state for the reader.
//!
//! - [`Store`]: a shared, version-tracked value that notifies subscriber
//!   callbacks synchronously on every `set`.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Binding`]: a live copy of the store's full value.
//! - [`Lens`] and [`DerivedBinding`]: a narrowed view that writes back
//!   through the store's own `set`.
//!
//! # Architecture
//!
//! `Store<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscribers are stored as `Weak` function pointers and cleaned up lazily
//! during notification. Bindings are ordinary subscribers that cache the
//! latest (projected) value.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per `set`.
//! 2. Subscribers are notified in registration order.
//! 3. Dropping a [`Subscription`] (or a binding) removes the callback before
//!    the next notification cycle.
//! 4. A binding's `get()` never returns a value older than the last
//!    completed `set`.
//!    This holds when a subscriber calls `set` re-entrantly: the outer
//!    notification stops once a newer value has been published.

pub mod binding;
pub mod store;

pub use binding::{Binding, DerivedBinding, Lens};
pub use store::{Store, Subscription};
