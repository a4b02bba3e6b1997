//! The submission cycle: one synchronous pass per user action.
//!
//! [`handle_submission`] ties the session store, the scraper, and the
//! conversational pipeline together. Each pass performs at most one
//! blocking network call (a URL scrape or a generation request) and returns
//! a typed outcome instead of mutating any UI. No path panics; every
//! failure leaves the session consistent and re-submittable.

use crate::generate::{PromptKind, generate, is_content_paste};
use crate::llm::LlmConfig;
use crate::scrape::{ScrapeConfig, scrape_article};
use crate::session::SessionState;

/// Number of scraped characters echoed into the "fetched from" user message.
pub const FETCH_EXCERPT_CHARS: usize = 800;

/// Warning shown when a content paste is submitted with no format selected.
pub const NO_FORMATS_WARNING: &str =
    "Please select at least one output format before submitting content.";

/// Error shown when a URL submission cannot be fetched.
pub const FETCH_FAILED_ERROR: &str = "Couldn't fetch that URL. Try pasting the content directly.";

/// Engine-level configuration shared by all submissions of a session.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub scrape: ScrapeConfig,
    pub llm: LlmConfig,
}

/// The result of one submission pass.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Generation succeeded; the assistant reply was appended.
    Replied {
        content: String,
        /// Whether a draft was archived (content pastes only).
        draft_created: bool,
    },
    /// Input validation failed; a non-fatal warning for the user. Nothing
    /// was appended and no request was issued.
    Rejected { warning: String },
    /// A fetch or generation failure; displayed in place of the output.
    /// The conversation was not advanced.
    Failed { error: String },
    /// Nothing to process this pass.
    Idle,
}

/// Runs one submission pass over the session.
///
/// The pending slot is consumed first and is cleared even when the rest of
/// the pass fails. Typed input that will be treated as a content paste (a
/// URL, or text over the paste threshold) is validated against an empty
/// format selection before anything is mutated or fetched.
pub async fn handle_submission(
    state: &mut SessionState, typed: Option<&str>, api_key: Option<&str>, config: &EngineConfig,
) -> SubmitOutcome {
    let prompt = match state.take_pending() {
        Some(pending) => {
            if is_content_paste(&pending.content) && state.selected_formats.is_empty() {
                return SubmitOutcome::Rejected { warning: NO_FORMATS_WARNING.to_string() };
            }

            state.push_user_message(&fetched_from_message(&pending.source_url, &pending.content));
            pending.content
        }
        None => {
            let typed = match typed {
                Some(t) if !t.trim().is_empty() => t.trim(),
                _ => return SubmitOutcome::Idle,
            };

            let is_url = typed.starts_with("http");
            if (is_url || is_content_paste(typed)) && state.selected_formats.is_empty() {
                return SubmitOutcome::Rejected { warning: NO_FORMATS_WARNING.to_string() };
            }

            if is_url {
                match scrape_article(typed, &config.scrape).await {
                    Some(scraped) => {
                        state.push_user_message(&fetched_from_message(typed, &scraped));
                        scraped
                    }
                    None => return SubmitOutcome::Failed { error: FETCH_FAILED_ERROR.to_string() },
                }
            } else {
                state.push_user_message(typed);
                typed.to_string()
            }
        }
    };

    match generate(&prompt, &state.selected_formats, api_key, &config.llm).await {
        Ok(generation) => {
            state.push_assistant_message(&generation.content);

            let draft_created = generation.kind == PromptKind::ContentPaste;
            if draft_created {
                state.record_draft(&prompt, &generation.content);
            }

            state.bump_input_generation();
            SubmitOutcome::Replied { content: generation.content, draft_created }
        }
        Err(e) => {
            tracing::warn!(error = %e, "generation failed");
            SubmitOutcome::Failed { error: e.to_string() }
        }
    }
}

fn fetched_from_message(url: &str, scraped: &str) -> String {
    let excerpt: String = scraped.chars().take(FETCH_EXCERPT_CHARS).collect();
    format!("*Fetched from:* {}\n\n---\n\n{}...", url, excerpt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DRAFT_PREVIEW_CHARS, Role};

    fn run(
        state: &mut SessionState, typed: Option<&str>, api_key: Option<&str>, config: &EngineConfig,
    ) -> SubmitOutcome {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(handle_submission(state, typed, api_key, config))
    }

    fn demo_config() -> EngineConfig {
        EngineConfig::default()
    }

    /// Config whose endpoints point at a closed local port, so live-mode
    /// requests fail fast without touching the network.
    fn unreachable_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.llm.api_url = "http://127.0.0.1:9/v1/messages".to_string();
        config
    }

    #[test]
    fn test_short_input_demo_reply_no_draft() {
        let mut state = SessionState::new();
        let outcome = run(&mut state, Some("What tone do you write in?"), None, &demo_config());

        match outcome {
            SubmitOutcome::Replied { content, draft_created } => {
                assert!(content.starts_with("**Copymill**"));
                assert!(!draft_created);
            }
            other => panic!("expected Replied, got {:?}", other),
        }
        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].role, Role::User);
        assert_eq!(state.messages[1].role, Role::Assistant);
        assert!(state.draft_history.is_empty());
        assert_eq!(state.input_generation, 1);
    }

    #[test]
    fn test_content_paste_creates_draft_with_preview() {
        let mut state = SessionState::new();
        let paste = "a".repeat(1200);
        let outcome = run(&mut state, Some(&paste), None, &demo_config());

        match outcome {
            SubmitOutcome::Replied { content, draft_created } => {
                assert!(draft_created);
                assert_eq!(content.matches("**Social Post**").count(), 1);
            }
            other => panic!("expected Replied, got {:?}", other),
        }

        assert_eq!(state.draft_history.len(), 1);
        let draft = &state.draft_history[0];
        assert_eq!(draft.preview, "a".repeat(DRAFT_PREVIEW_CHARS));
    }

    #[test]
    fn test_empty_selection_rejects_paste_before_mutation() {
        let mut state = SessionState::new();
        state.selected_formats.clear();
        let paste = "a".repeat(1200);

        let outcome = run(&mut state, Some(&paste), None, &demo_config());

        assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
        assert!(state.messages.is_empty());
        assert!(state.draft_history.is_empty());
        assert_eq!(state.input_generation, 0);
    }

    #[test]
    fn test_empty_selection_allows_short_prompts() {
        let mut state = SessionState::new();
        state.selected_formats.clear();

        let outcome = run(&mut state, Some("hello there"), None, &demo_config());
        assert!(matches!(outcome, SubmitOutcome::Replied { .. }));
    }

    #[test]
    fn test_unfetchable_url_fails_without_mutation() {
        let mut state = SessionState::new();
        let outcome = run(&mut state, Some("http://127.0.0.1:9/article"), None, &demo_config());

        match outcome {
            SubmitOutcome::Failed { error } => assert_eq!(error, FETCH_FAILED_ERROR),
            other => panic!("expected Failed, got {:?}", other),
        }
        assert!(state.messages.is_empty());
        assert_eq!(state.input_generation, 0);
    }

    #[test]
    fn test_pending_consumed_and_cleared() {
        let mut state = SessionState::new();
        let scraped = "scraped article body ".repeat(30);
        state.set_pending(scraped.clone(), "https://example.com/post".to_string());

        let outcome = run(&mut state, None, None, &demo_config());

        assert!(matches!(outcome, SubmitOutcome::Replied { draft_created: true, .. }));
        assert!(state.take_pending().is_none());
        assert!(state.messages[0].content.starts_with("*Fetched from:* https://example.com/post"));
        assert_eq!(state.draft_history.len(), 1);
    }

    #[test]
    fn test_pending_cleared_even_on_rejection() {
        let mut state = SessionState::new();
        state.selected_formats.clear();
        state.set_pending("long scraped text ".repeat(30), "https://example.com/post".to_string());

        let outcome = run(&mut state, None, None, &demo_config());

        assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
        assert!(state.take_pending().is_none());
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_idle_when_nothing_to_process() {
        let mut state = SessionState::new();
        assert!(matches!(run(&mut state, None, None, &demo_config()), SubmitOutcome::Idle));
        assert!(matches!(run(&mut state, Some("   "), None, &demo_config()), SubmitOutcome::Idle));
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_failed_generation_does_not_advance_conversation() {
        let mut state = SessionState::new();
        let outcome = run(&mut state, Some("short question"), Some("test-key"), &unreachable_config());

        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, Role::User);
        assert_eq!(state.input_generation, 0);
    }

    #[test]
    fn test_resubmission_after_failure_not_duplicated() {
        let mut state = SessionState::new();
        let _ = run(&mut state, Some("short question"), Some("test-key"), &unreachable_config());
        let _ = run(&mut state, Some("short question"), Some("test-key"), &unreachable_config());

        let user_count = state.messages.iter().filter(|m| m.role == Role::User).count();
        assert_eq!(user_count, 1);
    }

    #[test]
    fn test_excerpt_truncated_in_fetched_message() {
        let mut state = SessionState::new();
        let scraped = "b".repeat(2_000);
        state.set_pending(scraped, "https://example.com/long".to_string());

        let _ = run(&mut state, None, None, &demo_config());

        let message = &state.messages[0].content;
        assert!(message.contains(&"b".repeat(FETCH_EXCERPT_CHARS)));
        assert!(!message.contains(&"b".repeat(FETCH_EXCERPT_CHARS + 1)));
        assert!(message.ends_with("..."));
    }
}
