//! Command implementations.

pub mod discover;
