//! Domain layer for the Blog Writer client.
//!
//! Models, interfaces to the external identity provider and generation
//! backend, and the shared error type.

pub mod config;
pub mod error;
pub mod generation;
pub mod identity;
pub mod session;

// Re-export common error type
pub use error::{Result, WriterError};
