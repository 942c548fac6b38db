#![forbid(unsafe_code)]

//! Named navigation history layered over a [`HistoryBackend`].
//!
//! # Design
//!
//! [`HistoryStore`] owns a [`Store<NavigationStack>`] and the backend. Every
//! operation runs in the same order:
//!
//! 1. resolve the destination against the current tail,
//! 2. update the backend (`push` or `replace`),
//! 3. compute the next stack snapshot and publish it through `Store::set`.
//!
//! The backend borrow is released before publishing, so subscribers always
//! observe a backend that already reflects the stack they are handed.
//!
//! # Invariants
//!
//! 1. The published stack is never empty and index 0 is the home entry.
//! 2. `push` grows the stack by one; `replace_top` and `rename_active`
//!    keep its length; `go_home` leaves exactly the home entry;
//!    `go_to_index(i)` leaves `i + 1` entries.
//! 3. The backend and the stack are written only through these methods.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use super::backend::{HistoryBackend, create_href};
use super::location::{Location, LocationDescriptor, NamedLocation};
use super::stack::NavigationStack;
use crate::config::NavConfig;
use crate::error::{NavError, NavResult};
use crate::reactive::{Binding, DerivedBinding, Lens, Store, Subscription};

/// The reader's breadcrumb history.
///
/// Cloning a `HistoryStore` creates a new handle to the **same** stack and
/// backend. Construct one at startup and hand clones to the views.
pub struct HistoryStore<B> {
    stack: Store<NavigationStack>,
    backend: Rc<RefCell<B>>,
    config: Rc<NavConfig>,
}

impl<B> Clone for HistoryStore<B> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            backend: Rc::clone(&self.backend),
            config: Rc::clone(&self.config),
        }
    }
}

impl<B: std::fmt::Debug> std::fmt::Debug for HistoryStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("stack", &self.stack)
            .field("backend", &self.backend.borrow())
            .field("config", &self.config)
            .finish()
    }
}

impl<B: HistoryBackend + 'static> HistoryStore<B> {
    /// Create a store with the default configuration.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, NavConfig::default())
    }

    /// Create a store whose home entry comes from `config`.
    #[must_use]
    pub fn with_config(backend: B, config: NavConfig) -> Self {
        let home = home_entry(&config);
        Self {
            stack: Store::new(NavigationStack::new(home)),
            backend: Rc::new(RefCell::new(backend)),
            config: Rc::new(config),
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate forward to `destination` and append it labeled `name`.
    pub fn push(&self, destination: impl Into<LocationDescriptor>, name: impl Into<String>) {
        let location = self.resolve(&destination.into());
        self.backend.borrow_mut().push(&location);
        let next = self
            .stack
            .with(|stack| stack.pushed(NamedLocation::new(location, name)));
        self.publish("push", next);
    }

    /// Replace the current frame with `destination` and swap the tail.
    pub fn replace_top(&self, destination: impl Into<LocationDescriptor>, name: impl Into<String>) {
        let location = self.resolve(&destination.into());
        self.backend.borrow_mut().replace(&location);
        let next = self
            .stack
            .with(|stack| stack.replace_top(NamedLocation::new(location, name)));
        self.publish("replace_top", next);
    }

    /// Navigate to the home path and reset the stack to the home entry.
    pub fn go_home(&self) {
        let home = home_entry(&self.config);
        self.backend.borrow_mut().push(home.location());
        self.publish("go_home", NavigationStack::reset(home));
    }

    /// Navigate to the entry at `index` and drop everything after it.
    ///
    /// An index outside the published stack leaves the stack and the
    /// backend untouched.
    pub fn go_to_index(&self, index: usize) -> NavResult<()> {
        let (target, next) = self.stack.with(|stack| {
            let target = stack.get(index).cloned();
            (target, stack.truncated(index))
        });
        let (Some(target), Some(next)) = (target, next) else {
            let len = self.len();
            warn!(op = "go_to_index", index, len, "history index out of range");
            return Err(NavError::IndexOutOfRange { index, len });
        };
        self.backend.borrow_mut().push(target.location());
        self.publish("go_to_index", next);
        Ok(())
    }

    /// Relabel the current location once its display name is known.
    ///
    /// The backend frame is replaced in place; no new entry is created.
    pub fn rename_active(&self, name: impl Into<String>) {
        let renamed = self.stack.with(|stack| stack.current().renamed(name));
        self.backend.borrow_mut().replace(renamed.location());
        let next = self.stack.with(|stack| stack.replace_top(renamed));
        self.publish("rename_active", next);
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Live view of the current location.
    ///
    /// Setting it replaces the backend's current frame, then swaps the tail
    /// of the stack; earlier entries are kept as they are.
    #[must_use]
    pub fn current_location(&self) -> DerivedBinding<NavigationStack, NamedLocation> {
        let lens = Lens::new(
            |stack: &NavigationStack| stack.current().clone(),
            |tail, stack: &NavigationStack| {
                let next = stack.replace_top(tail);
                log_update("current_location.set", &next);
                next
            },
        );
        let backend = Rc::clone(&self.backend);
        self.stack
            .subscribe_derived(lens)
            .on_write(move |tail: &NamedLocation| {
                backend.borrow_mut().replace(tail.location());
            })
    }

    /// Live view of the whole stack, for breadcrumbs.
    #[must_use]
    pub fn all_locations(&self) -> Binding<NavigationStack> {
        self.stack.subscribe_full()
    }

    /// Subscribe to every published stack.
    pub fn subscribe(&self, callback: impl Fn(&NavigationStack) + 'static) -> Subscription {
        self.stack.subscribe(callback)
    }

    /// Snapshot of the current stack.
    #[must_use]
    pub fn stack(&self) -> NavigationStack {
        self.stack.get()
    }

    /// Snapshot of the current tail.
    #[must_use]
    pub fn current(&self) -> NamedLocation {
        self.stack.with(|stack| stack.current().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.with(NavigationStack::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of published stacks so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.stack.version()
    }

    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Link target for `location` in the configured href style.
    #[must_use]
    pub fn href(&self, location: &Location) -> String {
        create_href(location, self.config.href_style)
    }

    /// Borrow the backend for inspection.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a backend method.
    #[must_use]
    pub fn backend(&self) -> Ref<'_, B> {
        self.backend.borrow()
    }

    pub fn with_backend<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        f(&self.backend.borrow())
    }

    fn resolve(&self, destination: &LocationDescriptor) -> Location {
        self.stack
            .with(|stack| destination.resolve(Some(stack.current().location())))
    }

    fn publish(&self, op: &'static str, next: NavigationStack) {
        log_update(op, &next);
        self.stack.set(next);
    }
}

fn log_update(op: &'static str, next: &NavigationStack) {
    debug!(
        op,
        depth = next.len(),
        path = %next.current().location(),
        name = next.current().name(),
        "history updated"
    );
}

fn home_entry(config: &NavConfig) -> NamedLocation {
    let location = LocationDescriptor::path(config.home_path.as_str()).resolve(None);
    NamedLocation::new(location, config.home_label.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HrefStyle;
    use crate::history::backend::MemoryHistory;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn store() -> HistoryStore<MemoryHistory> {
        HistoryStore::with_config(
            MemoryHistory::default(),
            NavConfig::default().with_home_label("home"),
        )
    }

    fn paths(stack: &NavigationStack) -> Vec<(String, String)> {
        stack
            .iter()
            .map(|e| (e.location().path(), e.name().to_string()))
            .collect()
    }

    #[test]
    fn starts_with_home_entry() {
        let history = store();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().pathname(), "/");
        assert_eq!(history.current().name(), "home");
        assert_eq!(history.version(), 0);
    }

    #[test]
    fn push_appends_and_moves_backend_forward() {
        let history = store();
        history.push("/novel?novelId=7", "Work 7");

        assert_eq!(
            paths(&history.stack()),
            vec![
                ("/".to_string(), "home".to_string()),
                ("/novel?novelId=7".to_string(), "Work 7".to_string()),
            ]
        );
        assert_eq!(history.backend().len(), 2);
        assert_eq!(history.backend().current().path(), "/novel?novelId=7");
    }

    #[test]
    fn replace_top_swaps_tail_and_backend_frame() {
        let history = store();
        history.push("/chapter?chapterId=3", "Ch. 3");
        history.replace_top(LocationDescriptor::search_only("chapterId=4"), "Ch. 4");

        let stack = history.stack();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.current().location().path(), "/chapter?chapterId=4");
        assert_eq!(history.backend().len(), 2);
        assert_eq!(history.backend().current().search(), "?chapterId=4");
    }

    #[test]
    fn go_home_resets_and_pushes_root() {
        let history = store();
        history.push("/novel?novelId=7", "Work 7");
        history.push("/chapter?chapterId=3", "Ch. 3");
        history.go_home();

        assert_eq!(history.len(), 1);
        assert_eq!(history.current().name(), "home");
        assert_eq!(history.backend().len(), 4);
        assert_eq!(history.backend().current().path(), "/");
    }

    #[test]
    fn go_to_index_truncates_and_pushes_target() {
        let history = store();
        history.push("/novel?novelId=7", "Work 7");
        history.push("/chapter?chapterId=3", "Ch. 3");
        history.go_to_index(1).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().name(), "Work 7");
        assert_eq!(history.backend().current().path(), "/novel?novelId=7");
    }

    #[test]
    fn go_to_index_out_of_range_is_rejected_without_side_effects() {
        let history = store();
        history.push("/novel?novelId=7", "Work 7");
        let before = history.stack();
        let version = history.version();

        let err = history.go_to_index(2).unwrap_err();
        assert_eq!(err, NavError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(history.stack(), before);
        assert_eq!(history.version(), version);
        assert_eq!(history.backend().len(), 2);
    }

    #[test]
    fn rename_active_keeps_location_and_prefix() {
        let history = store();
        history.push("/novel?novelId=7", "Work 7");
        history.push("/chapter?chapterId=3", "");
        let before = history.stack();

        history.rename_active("Chapter Three");
        let after = history.stack();
        assert_eq!(after.len(), 3);
        assert_eq!(after.as_slice()[..2], before.as_slice()[..2]);
        assert_eq!(after.current().location(), before.current().location());
        assert_eq!(after.current().name(), "Chapter Three");
        assert_eq!(history.backend().len(), 3);
    }

    #[test]
    fn current_location_view_reads_tail_and_writes_through_backend() {
        let history = store();
        let current = history.current_location();
        let all = history.all_locations();
        history.push("/chapter?chapterId=3", "Ch. 3");
        assert_eq!(current.get().name(), "Ch. 3");

        let refined = NamedLocation::new(Location::parse("/chapter?chapterId=3&page=2"), "Ch. 3 (2)");
        current.set(refined.clone());

        assert_eq!(current.get(), refined);
        assert_eq!(all.get().current(), &refined);
        assert_eq!(all.get().len(), 2);
        assert_eq!(history.backend().len(), 2);
        assert_eq!(history.backend().current(), refined.location());
    }

    #[test]
    fn subscribers_see_backend_already_updated() {
        let history = store();
        let consistent = Rc::new(Cell::new(true));
        let observer = history.clone();
        let flag = Rc::clone(&consistent);
        let _sub = history.subscribe(move |stack| {
            let matches = observer.with_backend(|b| b.current() == stack.current().location());
            flag.set(flag.get() && matches);
        });

        history.push("/novel?novelId=7", "Work 7");
        history.push("/chapter?chapterId=3", "Ch. 3");
        history.replace_top("/chapter?chapterId=4", "Ch. 4");
        history.rename_active("Chapter Four");
        history.go_to_index(1).unwrap();
        history.go_home();

        assert!(consistent.get());
        assert_eq!(history.version(), 6);
    }

    #[test]
    fn redirect_from_subscriber_keeps_views_in_sync() {
        let history = store();
        let redirector = history.clone();
        let _guard = history.subscribe(move |stack| {
            if stack.current().pathname() == "/bad" {
                redirector.go_home();
            }
        });
        let all = history.all_locations();
        let current = history.current_location();

        history.push("/bad", "bad");

        assert_eq!(history.len(), 1);
        assert_eq!(all.get(), history.stack());
        assert_eq!(current.get().name(), "home");
        assert_eq!(history.backend().current().path(), "/");
        assert_eq!(history.version(), 2);
    }

    #[test]
    fn custom_home_from_config() {
        let config = NavConfig {
            home_path: "/search".into(),
            home_label: "搜索".into(),
            href_style: HrefStyle::Browser,
        };
        let history = HistoryStore::with_config(MemoryHistory::default(), config);
        history.push("/novel", "n");
        history.go_home();
        assert_eq!(history.current().pathname(), "/search");
        assert_eq!(history.current().name(), "搜索");
        assert_eq!(history.href(history.current().location()), "/search");
    }

    #[test]
    fn clones_share_stack_and_backend() {
        let history = store();
        let other = history.clone();
        other.push("/novel?novelId=1", "Work 1");
        assert_eq!(history.len(), 2);
        assert_eq!(history.backend().len(), 2);
    }
}
