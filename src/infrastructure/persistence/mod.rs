//! Persistence adapters

pub mod call_registry;

pub use call_registry::InMemoryCallRegistry;
