//! Authentication adapters.

mod memory;

pub use memory::InMemoryAuth;
