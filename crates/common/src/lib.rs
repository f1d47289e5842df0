//! Shared error plumbing used across formrelay crates.

pub mod error;

pub use error::FromMessage;
