//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the identity provider session as the client sees it
//! - `source`: subscription interface for session changes
//! - `store`: persistence interface for the current session

mod model;
mod source;
mod store;

pub use model::{Session, SessionUser};
pub use source::{SessionSource, SessionSubscription};
pub use store::SessionStore;
