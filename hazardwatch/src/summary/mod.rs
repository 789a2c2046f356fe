//! Optional plan summarization.
//!
//! A [`Summarizer`] condenses action plan text into a short summary. It is
//! strictly best effort: any failure yields `None` and never affects the plan.

mod gemini;

pub use gemini::{GeminiSummarizer, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};

use std::future::Future;

/// Prompt prefix sent with the plan text.
pub const SUMMARY_PROMPT: &str =
    "Summarize the following action plan into a 1-line summary and 4 bullets:\n\n";

/// Trait for plan summarizers.
pub trait Summarizer: Send + Sync {
    /// Returns a short summary of `plan_text`, or `None` on any failure.
    fn summarize(&self, plan_text: &str) -> impl Future<Output = Option<String>> + Send;
}
