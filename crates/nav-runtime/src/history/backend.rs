#![forbid(unsafe_code)]

//! Host history mechanisms the store mirrors into.
//!
//! [`HistoryBackend`] is the only surface the store needs: add a frame, or
//! overwrite the current one. [`MemoryHistory`] keeps browser-like frames in
//! process; [`HashHistory`] layers `#`-prefixed hrefs on top of it for hosts
//! that route on the URL fragment.

use super::location::Location;
use crate::config::HrefStyle;

/// External history mechanism driven by [`HistoryStore`](super::HistoryStore).
pub trait HistoryBackend {
    /// Add a new browsable frame pointing at `location`.
    fn push(&mut self, location: &Location);

    /// Overwrite the current frame with `location`.
    fn replace(&mut self, location: &Location);
}

impl<B: HistoryBackend + ?Sized> HistoryBackend for Box<B> {
    fn push(&mut self, location: &Location) {
        (**self).push(location);
    }

    fn replace(&mut self, location: &Location) {
        (**self).replace(location);
    }
}

/// Render `location` as a link target in the given style.
#[must_use]
pub fn create_href(location: &Location, style: HrefStyle) -> String {
    match style {
        HrefStyle::Hash => format!("#{}", location.path()),
        HrefStyle::Browser => location.path(),
    }
}

/// In-process history with browser semantics.
///
/// # Invariants
///
/// 1. `frames` is never empty and `cursor < frames.len()`.
/// 2. `push` discards every frame after the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    frames: Vec<Location>,
    cursor: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::root())
    }
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self {
            frames: vec![initial],
            cursor: 0,
        }
    }

    /// Location of the current frame.
    #[must_use]
    pub fn current(&self) -> &Location {
        &self.frames[self.cursor]
    }

    /// Number of frames, including any forward frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn frames(&self) -> &[Location] {
        &self.frames
    }

    /// Step back one frame. Returns `false` at the first frame.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one frame. Returns `false` at the last frame.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.frames.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&mut self, location: &Location) {
        self.frames.truncate(self.cursor + 1);
        self.frames.push(location.clone());
        self.cursor += 1;
    }

    fn replace(&mut self, location: &Location) {
        self.frames[self.cursor] = location.clone();
    }
}

/// Fragment-routed history: a [`MemoryHistory`] whose frames render as
/// `#/path?query` hrefs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashHistory {
    frames: MemoryHistory,
}

impl HashHistory {
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self {
            frames: MemoryHistory::new(initial),
        }
    }

    /// Href of the current frame, e.g. `#/novel?novelId=7`.
    #[must_use]
    pub fn href(&self) -> String {
        create_href(self.frames.current(), HrefStyle::Hash)
    }

    /// Hrefs of every frame in order.
    #[must_use]
    pub fn hrefs(&self) -> Vec<String> {
        self.frames
            .frames()
            .iter()
            .map(|loc| create_href(loc, HrefStyle::Hash))
            .collect()
    }

    #[must_use]
    pub fn frames(&self) -> &MemoryHistory {
        &self.frames
    }

    pub fn back(&mut self) -> bool {
        self.frames.back()
    }

    pub fn forward(&mut self) -> bool {
        self.frames.forward()
    }
}

impl HistoryBackend for HashHistory {
    fn push(&mut self, location: &Location) {
        self.frames.push(location);
    }

    fn replace(&mut self, location: &Location) {
        self.frames.replace(location);
    }
}
