//! Generation domain module.
//!
//! # Module Structure
//!
//! - `model`: request, result and history item models
//! - `usage`: usage/quota message formatting
//! - `backend`: the generation backend interface

mod backend;
mod model;
mod usage;

pub use backend::{BackendHealth, GenerationBackend};
pub use model::{
    DEFAULT_LENGTH, DEFAULT_TONE, GenerationRequest, GenerationResult, MAX_LENGTH, MIN_LENGTH,
    PostHistoryItem,
};
pub use usage::{FREE_PLAN_NOTICE, SIGN_UP_CONFIRMATION_NOTICE, usage_message};
