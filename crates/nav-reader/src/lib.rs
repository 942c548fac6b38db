#![forbid(unsafe_code)]

//! Reader pages on top of `nav-runtime`.
//!
//! - [`ChapterPage`] - chapter view controller (load, rename, siblings, index)
//! - [`ChapterRoute`] - route parameters carried in the query string
//! - [`ContentSource`] - where chapter text comes from
//! - [`breadcrumbs`] - crumbs rendered from the navigation stack
//! - [`ReaderConfig`] - accepted sources and placeholder labels

pub mod breadcrumbs;
pub mod chapter;
pub mod config;
pub mod content;
pub mod route;

pub use breadcrumbs::{Crumb, breadcrumbs};
pub use chapter::{ChapterPage, LoadState};
pub use config::ReaderConfig;
pub use content::{ChapterContent, ContentError, ContentSource};
pub use route::{CHAPTER_PATH, ChapterRoute, NOVEL_PATH};
