#![forbid(unsafe_code)]

//! Named navigation history.
//!
//! ```text
//!   view event ──► HistoryStore ──► HistoryBackend (push / replace)
//!                      │
//!                      └──► Store<NavigationStack>::set ──► bindings
//! ```
//!
//! # Module Structure
//!
//! - [`location`]: `Location`, `LocationDescriptor`, `NamedLocation`
//! - [`stack`]: the never-empty `NavigationStack`
//! - [`backend`]: the `HistoryBackend` trait and in-process backends
//! - [`store`]: `HistoryStore`, tying the three together

pub mod backend;
pub mod location;
pub mod stack;
pub mod store;

pub use backend::{HashHistory, HistoryBackend, MemoryHistory, create_href};
pub use location::{
    Location, LocationDescriptor, NamedLocation, encode_component, query_param,
};
pub use stack::NavigationStack;
pub use store::HistoryStore;
