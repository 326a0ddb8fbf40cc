//! インメモリ実装

pub mod roster;

pub use roster::InMemoryRosterRepository;
