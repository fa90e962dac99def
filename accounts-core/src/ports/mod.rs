//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The service core
//! depends only on these traits, never on a concrete store.

mod store;

pub use store::AccountStore;
