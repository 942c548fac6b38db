#![forbid(unsafe_code)]

//! Breadcrumb projection of the navigation stack.

use nav_runtime::config::HrefStyle;
use nav_runtime::error::NavResult;
use nav_runtime::history::{HistoryBackend, HistoryStore, NavigationStack, create_href};

/// One rendered breadcrumb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    /// Position in the stack; pass to `go_to_index`.
    pub index: usize,
    pub label: String,
    pub href: String,
    /// The last crumb, i.e. the page being shown.
    pub active: bool,
}

impl Crumb {
    /// Navigate back to this crumb. The active crumb is not a link, so
    /// following it does nothing and returns `Ok(false)`.
    pub fn follow<B: HistoryBackend + 'static>(&self, history: &HistoryStore<B>) -> NavResult<bool> {
        if self.active {
            return Ok(false);
        }
        history.go_to_index(self.index)?;
        Ok(true)
    }
}

/// Crumbs for every entry of `stack`, root first.
#[must_use]
pub fn breadcrumbs(stack: &NavigationStack, style: HrefStyle) -> Vec<Crumb> {
    let last = stack.len() - 1;
    stack
        .iter()
        .enumerate()
        .map(|(index, entry)| Crumb {
            index,
            label: entry.name().to_string(),
            href: create_href(entry.location(), style),
            active: index == last,
        })
        .collect()
}
