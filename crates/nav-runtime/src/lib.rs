#![forbid(unsafe_code)]

//! Reader navigation runtime.
//!
//! This crate provides the state core of the novel reader:
//!
//! - [`Store`] - observable value with subscriber callbacks
//! - [`Binding`] / [`DerivedBinding`] - live full and lens-derived views
//! - [`HistoryStore`] - the breadcrumb stack mirrored into a history backend
//! - [`HistoryBackend`] - the host history mechanism (`push` / `replace`)
//! - [`NavConfig`] - home entry and href style
//!
//! # How it fits in the system
//! Views hold bindings from [`HistoryStore::current_location`] and
//! [`HistoryStore::all_locations`] and call the store's navigation methods
//! from event handlers. Everything runs on one thread; each call updates the
//! backend, publishes the new stack and notifies bindings before returning.

pub mod config;
pub mod error;
pub mod history;
pub mod reactive;

pub use config::{DEFAULT_HOME_LABEL, HrefStyle, NavConfig, NavConfigError};
pub use error::{NavError, NavResult};
pub use history::{
    HashHistory, HistoryBackend, HistoryStore, Location, LocationDescriptor, MemoryHistory,
    NamedLocation, NavigationStack,
};
pub use reactive::{Binding, DerivedBinding, Lens, Store, Subscription};
