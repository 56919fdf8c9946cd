//! Storage layer - key/value store implementations

pub mod memory;

pub use memory::MemoryStore;
