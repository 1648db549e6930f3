//! View state for the writer page.
//!
//! Everything here is transient and lives for one page view (one process for
//! the CLI). The controller mutates it under a single write lock per update,
//! so content and usage message never render out of step.

use blogwriter_core::WriterError;
use blogwriter_core::generation::{
    DEFAULT_LENGTH, DEFAULT_TONE, FREE_PLAN_NOTICE, GenerationRequest, GenerationResult,
    PostHistoryItem, usage_message,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterState {
    // Form fields
    pub keyword: String,
    pub tone: String,
    pub length: u32,

    /// Generated markdown, editable by the user
    pub content: String,
    /// Server history, replaced wholesale on every refresh
    pub history: Vec<PostHistoryItem>,
    /// Plan/usage line; reflects the latest successful generation only
    pub usage_message: String,
    /// The single user-visible error, if any
    pub error: Option<String>,
    /// A generation request is in flight
    pub loading: bool,
}

impl Default for WriterState {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            tone: DEFAULT_TONE.to_string(),
            length: DEFAULT_LENGTH,
            content: String::new(),
            history: Vec::new(),
            usage_message: FREE_PLAN_NOTICE.to_string(),
            error: None,
            loading: false,
        }
    }
}

impl WriterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the submit control is enabled.
    pub fn can_generate(&self) -> bool {
        !self.keyword.trim().is_empty() && !self.loading
    }

    /// Builds a request from the current form fields.
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            keyword: self.keyword.clone(),
            tone: self.tone.clone(),
            length: self.length,
        }
    }

    /// Marks a submission as started.
    ///
    /// Returns `false`, changing nothing, when submitting is not allowed.
    pub fn begin_submit(&mut self) -> bool {
        if !self.can_generate() {
            return false;
        }
        self.error = None;
        self.loading = true;
        true
    }

    pub fn finish_submit(&mut self) {
        self.loading = false;
    }

    /// Applies a successful generation: content and usage line together.
    pub fn apply_generation(&mut self, result: &GenerationResult) {
        self.content = result.content.clone();
        self.usage_message = usage_message(result);
    }

    pub fn apply_history(&mut self, items: Vec<PostHistoryItem>) {
        self.history = items;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Records `error` as the visible message. Content and history are kept.
    pub fn set_error(&mut self, error: &WriterError) {
        self.error = Some(error.user_message());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
