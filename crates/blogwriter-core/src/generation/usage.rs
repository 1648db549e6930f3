//! Usage/quota messages shown next to the generator.

use super::model::GenerationResult;

/// Shown before the first successful generation of a page view.
pub const FREE_PLAN_NOTICE: &str = "Free plan: 3 generations per month";

/// Shown after a sign-up that did not yield a session.
pub const SIGN_UP_CONFIRMATION_NOTICE: &str =
    "Email confirmation may be required. Sign in after confirming your address.";

/// Formats the usage line from a backend response.
///
/// The numbers are copied from the response; nothing is computed client-side.
pub fn usage_message(result: &GenerationResult) -> String {
    format!(
        "Usage: {}/{} ({} remaining)",
        result.usage_count, result.usage_limit, result.remaining
    )
}
