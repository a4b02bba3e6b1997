//! Conversational copy generation.
//!
//! This is the canonical generation contract: a prompt is classified as
//! pasted source material or a short instruction by a fixed length
//! threshold, a system instruction is assembled from the format registry,
//! and exactly one request goes to the model. Without a credential the
//! pipeline substitutes canned text assembled with the same skeleton,
//! labels, order, and divider, so callers cannot structurally distinguish
//! demo output from live output.
//!
//! The batch contract in [`crate::campaign`] is the alternate structured
//! surface; the two are intentionally not merged.

use crate::formats::{ContentFormat, SECTION_DIVIDER};
use crate::llm::{LlmClient, LlmConfig};
use crate::{CopymillError, Result};

/// Prompts strictly longer than this many characters are treated as pasted
/// source material rather than a short instruction.
///
/// The exact value is a preserved product constant; see DESIGN.md.
pub const CONTENT_PASTE_THRESHOLD: usize = 300;

/// How a prompt was classified for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Long-form source material: produces the multi-format draft response
    /// and archives a draft on success.
    ContentPaste,
    /// Short instruction or question: produces a single freeform on-voice
    /// reply and archives nothing.
    Instruction,
}

/// The result of one generation pass.
#[derive(Debug, Clone)]
pub struct Generation {
    /// The reply text, live or canned.
    pub content: String,
    /// How the prompt was classified.
    pub kind: PromptKind,
}

/// Classifies a prompt by the fixed length threshold.
pub fn is_content_paste(prompt: &str) -> bool {
    prompt.chars().count() > CONTENT_PASTE_THRESHOLD
}

/// Fixed persona instruction for short-prompt replies.
const REPLY_SYSTEM_PROMPT: &str = "You are Copymill, an AI marketing copywriter.\n\n\
Voice:\n\
- CONFIDENT: \"We built X,\" not \"We tried to build X.\"\n\
- SIMPLE: Short sentences. No jargon.\n\
- FUTURE-FOCUSED: Excited about what's next.\n\
- PUNCHY: Sentence fragments.\n\
- NO HASHTAGS ever.\n\n\
Always start with \"**Copymill**\" on its own line.";

/// Canned short reply used in demo mode.
const DEMO_REPLY: &str = "**Copymill**\n\n\
I'm in demo mode (no API key configured). Here's a sample of the voice:\n\n\
**The old way:** Manual. Slow. Expensive.\n\
**The new way:** One source, every channel.\n\n\
Your audience doesn't wait. Your content shouldn't either.\n\n\
That's why we built Copymill.\n\n\
Not a template machine. A drafting engine that actually sounds like you.\n\n\
Ten assets from one article. No extra writers. Just results.";

/// Builds the system instruction for a content-paste draft request.
///
/// One instruction block per selected format, in selection order, joined by
/// the fixed divider. The registry is total over [`ContentFormat`], so no
/// selection can miss a template.
pub fn build_draft_system_prompt(formats: &[ContentFormat]) -> String {
    let format_output = formats
        .iter()
        .map(|f| f.instruction())
        .collect::<Vec<_>>()
        .join(SECTION_DIVIDER);

    format!(
        "You are Copymill, an AI marketing copywriter.\n\n\
         The user has pasted content. Transform it into the requested assets using a \
         confident, simple, future-focused, punchy voice.\n\n\
         IMPORTANT RULES:\n\
         - NO hashtags ever\n\
         - Be direct and confident\n\
         - Short sentences\n\
         - No fluff or filler words\n\n\
         Format your response EXACTLY like this:\n\n\
         **Copymill**\n\n\
         Here are your drafts:\n\n\
         ---\n\n\
         {}",
        format_output
    )
}

/// Assembles the canned multi-format demo response.
///
/// Same selected-format sections, same order, same divider as live output.
pub fn demo_draft_response(formats: &[ContentFormat]) -> String {
    let mut parts = vec!["**Copymill**\n\nHere are your drafts:".to_string()];
    for format in formats {
        parts.push(format.demo_sample().to_string());
    }

    parts.join(SECTION_DIVIDER)
}

/// Runs one conversational generation pass.
///
/// With a credential, issues exactly one request carrying the assembled
/// system instruction and the user's raw text as the sole message. Without
/// one, returns the structurally equivalent canned response. A content
/// paste with an empty format selection is rejected before any request.
///
/// The caller decides what to do with the result; in particular, draft
/// archiving for content pastes happens at the session layer.
pub async fn generate(
    prompt: &str, formats: &[ContentFormat], api_key: Option<&str>, config: &LlmConfig,
) -> Result<Generation> {
    let kind = if is_content_paste(prompt) { PromptKind::ContentPaste } else { PromptKind::Instruction };

    if kind == PromptKind::ContentPaste && formats.is_empty() {
        return Err(CopymillError::EmptySelection);
    }

    let content = match api_key {
        Some(key) => {
            let system = match kind {
                PromptKind::ContentPaste => build_draft_system_prompt(formats),
                PromptKind::Instruction => REPLY_SYSTEM_PROMPT.to_string(),
            };

            tracing::debug!(model = %config.model, ?kind, "issuing generation request");
            let client = LlmClient::new(key, config.clone());
            client.complete(Some(&system), prompt).await?
        }
        None => {
            tracing::debug!(?kind, "no credential, serving demo response");
            match kind {
                PromptKind::ContentPaste => demo_draft_response(formats),
                PromptKind::Instruction => DEMO_REPLY.to_string(),
            }
        }
    };

    Ok(Generation { content, kind })
}
