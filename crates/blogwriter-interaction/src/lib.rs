//! HTTP integrations with the external services.
//!
//! - [`HttpGenerationBackend`]: the content generation API
//! - [`GoTrueIdentityProvider`]: the GoTrue-compatible auth API

mod http;

pub mod api_client;
pub mod identity_client;

pub use api_client::HttpGenerationBackend;
pub use identity_client::GoTrueIdentityProvider;
