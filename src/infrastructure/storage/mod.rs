//! Session storage implementations

mod memory;

pub use memory::InMemorySessionRepository;
