//! Application layer for the Blog Writer client.
//!
//! This crate coordinates the identity provider, the generation backend and
//! the in-memory view state that a front end renders.

pub mod controller;
pub mod session_hub;
pub mod state;
pub mod workflow;

pub use controller::WriterController;
pub use session_hub::SessionHub;
pub use state::WriterState;
pub use workflow::{GenerationOutcome, GenerationWorkflow};

#[cfg(test)]
pub(crate) mod test_support;
