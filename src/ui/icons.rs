//! Shared UI icons and emojis.
//!
//! Terminal counterparts of the status icon tokens, with plain-text
//! fallbacks for terminals that can't render emoji.

use chainbuild_common::BuildResult;
use console::Emoji;

// Result indicators
pub static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static UNSTABLE: Emoji<'_, '_> = Emoji("⚠️  ", "[UNST]");
pub static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[FAIL]");
pub static ABORTED: Emoji<'_, '_> = Emoji("⛔ ", "[ABRT]");

// Progress indicators
pub static NOT_BUILT: Emoji<'_, '_> = Emoji("⏸️  ", "[--]");
pub static PHASE: Emoji<'_, '_> = Emoji("🌊 ", "[P]");

/// Emoji for a sub-build's resolved result.
pub fn for_result(result: Option<BuildResult>) -> &'static Emoji<'static, 'static> {
    match result {
        Some(BuildResult::Success) => &SUCCESS,
        Some(BuildResult::Unstable) => &UNSTABLE,
        Some(BuildResult::Failure) => &FAILURE,
        Some(BuildResult::Aborted) => &ABORTED,
        None => &NOT_BUILT,
    }
}
