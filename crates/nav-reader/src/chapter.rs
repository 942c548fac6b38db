#![forbid(unsafe_code)]

//! Chapter page controller.
//!
//! [`ChapterPage`] is what a chapter view talks to. It reads its route from
//! the history tail, loads the chapter from a [`ContentSource`], relabels
//! the breadcrumb once the chapter name is known, and turns the
//! previous/next/index buttons into history operations.
//!
//! # State machine
//!
//! ```text
//!              open()                load() ok
//!   ┌──────┐ ───────► ┌─────────┐ ───────────► ┌────────────┐
//!   │ Idle │          │ Loading │              │ Loaded(c)  │
//!   └──────┘          └─────────┘ ───────────► ├────────────┤
//!      │                  ▲        load() err   │ Failed(e)  │
//!      │ bad route        └──── retry()/go_* ───┴────────────┘
//!      ▼
//!   ┌────────────┐
//!   │ Redirected │   (history already sent home)
//!   └────────────┘
//! ```

use nav_runtime::history::{HistoryBackend, HistoryStore, LocationDescriptor};
use nav_runtime::reactive::{Binding, Store};
use tracing::{debug, info, warn};

use crate::config::ReaderConfig;
use crate::content::{ChapterContent, ContentError, ContentSource};
use crate::route::{CHAPTER_PATH, ChapterRoute, NOVEL_PATH};

/// Load state of the chapter page, published to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Route is valid, nothing fetched yet.
    Idle,
    Loading,
    Loaded(ChapterContent),
    Failed(ContentError),
    /// Route was invalid; history has been reset to home.
    Redirected,
}

impl LoadState {
    #[must_use]
    pub fn content(&self) -> Option<&ChapterContent> {
        match self {
            Self::Loaded(content) => Some(content),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Controller behind one chapter view.
pub struct ChapterPage<B> {
    history: HistoryStore<B>,
    config: ReaderConfig,
    route: Option<ChapterRoute>,
    state: Store<LoadState>,
}

impl<B: std::fmt::Debug> std::fmt::Debug for ChapterPage<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChapterPage")
            .field("route", &self.route)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<B: HistoryBackend + 'static> ChapterPage<B> {
    /// Open the page for the current history tail.
    ///
    /// A tail without `novelId`, `chapterId` and a known source `url` sends
    /// history home and leaves the page [`Redirected`](LoadState::Redirected).
    pub fn open(history: HistoryStore<B>, config: ReaderConfig) -> Self {
        let tail = history.current();
        let route = ChapterRoute::from_location(tail.location())
            .filter(|route| config.active_source(&route.main_page_url).is_some());

        let state = if route.is_some() {
            LoadState::Idle
        } else {
            warn!(path = %tail.location(), "invalid chapter route, redirecting home");
            history.go_home();
            LoadState::Redirected
        };

        Self {
            history,
            config,
            route,
            state: Store::new(state),
        }
    }

    #[must_use]
    pub fn route(&self) -> Option<&ChapterRoute> {
        self.route.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    /// Live view of the load state.
    #[must_use]
    pub fn watch_state(&self) -> Binding<LoadState> {
        self.state.subscribe_full()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore<B> {
        &self.history
    }

    /// Fetch the routed chapter and relabel the current breadcrumb with its
    /// name. A failed fetch leaves history untouched, and so does a fetch
    /// finishing after the page's entry is no longer the history tail.
    pub fn load(&self, source: &impl ContentSource) -> LoadState {
        let Some(route) = &self.route else {
            return self.state.get();
        };

        self.state.set(LoadState::Loading);
        debug!(novel_id = %route.novel_id, chapter_id = %route.chapter_id, "loading chapter");

        let next = match source.fetch_chapter(&route.novel_id, &route.chapter_id) {
            Ok(content) => {
                info!(
                    novel_id = %route.novel_id,
                    chapter_id = %route.chapter_id,
                    paragraphs = content.content_list.len(),
                    "chapter loaded"
                );
                if self.owns_tail() {
                    self.history.rename_active(content.chapter_name.as_str());
                } else {
                    debug!(chapter_id = %route.chapter_id, "history moved on, breadcrumb kept");
                }
                LoadState::Loaded(content)
            }
            Err(err) => {
                warn!(
                    novel_id = %route.novel_id,
                    chapter_id = %route.chapter_id,
                    error = %err,
                    "chapter load failed"
                );
                LoadState::Failed(err)
            }
        };
        self.state.set(next.clone());
        next
    }

    /// Load again after a failure.
    pub fn retry(&self, source: &impl ContentSource) -> LoadState {
        self.load(source)
    }

    /// Replace the current chapter with the previous one. Returns `false`
    /// when nothing is loaded, there is no previous chapter, or the history
    /// tail is no longer this page.
    pub fn go_previous(&mut self) -> bool {
        let target = self.loaded().and_then(|c| c.pre_chapter_id);
        self.go_sibling(target)
    }

    /// Replace the current chapter with the next one. Returns `false` when
    /// nothing is loaded, there is no next chapter, or the history tail is
    /// no longer this page.
    pub fn go_next(&mut self) -> bool {
        let target = self.loaded().and_then(|c| c.next_chapter_id);
        self.go_sibling(target)
    }

    /// Push the work's chapter index, labeled with the work's name.
    pub fn open_index(&self) -> bool {
        let Some(route) = &self.route else {
            return false;
        };
        let novel_name = self
            .loaded()
            .map(|c| c.novel_name)
            .unwrap_or_default();
        self.history.push(
            LocationDescriptor::path(NOVEL_PATH).with_search(route.novel_search()),
            novel_name,
        );
        true
    }

    fn loaded(&self) -> Option<ChapterContent> {
        self.state.with(|state| state.content().cloned())
    }

    /// Whether the history tail still routes to this page's chapter.
    fn owns_tail(&self) -> bool {
        self.route.is_some()
            && ChapterRoute::from_location(self.history.current().location()) == self.route
    }

    fn go_sibling(&mut self, target: Option<String>) -> bool {
        let (Some(route), Some(chapter_id)) = (&self.route, target) else {
            return false;
        };
        if !self.owns_tail() {
            debug!(chapter_id = %route.chapter_id, "history moved on, sibling navigation ignored");
            return false;
        }
        let current_name = self
            .loaded()
            .map(|c| c.chapter_name)
            .unwrap_or_default();
        let label = self.config.pending_label_for(&current_name);

        self.history.replace_top(
            LocationDescriptor::path(CHAPTER_PATH).with_search(route.chapter_search(&chapter_id)),
            label,
        );
        self.route = Some(route.with_chapter(chapter_id));
        self.state.set(LoadState::Idle);
        true
    }
}
