//! Batch campaign generation with a structured JSON contract.
//!
//! This is the alternate generation surface: programmatic callers get a
//! fixed four-asset object instead of chat text. Its system instruction is
//! independent of the conversational format registry and the two are
//! intentionally kept divergent (see DESIGN.md); merging them would change
//! observable output.
//!
//! Reply parsing never faults: a strict JSON parse is tried first, then the
//! substring between the first `{` and the last `}`, and if both fail the
//! caller receives a degraded [`Campaign`] carrying the raw reply. Every
//! path yields all four keys.

use serde::{Deserialize, Serialize};

use crate::llm::{LlmClient, LlmConfig};
use crate::{CopymillError, Result};

/// Fixed instruction for the four-asset batch request.
pub const CAMPAIGN_SYSTEM_PROMPT: &str = "\
You are an elite content strategist. You do not write generic marketing copy. You write \
provocative, insight-led content that challenges the status quo.

Your Voice:
- Confident, but humble.
- Simple, direct language. No jargon.
- Future-focused.

Your Task: Repurpose the provided text into 4 high-performance assets.

1. SOCIAL POST (The \"Scroll Stopper\"):
   - Start with a contrarian hook or a hard truth.
   - Use short, punchy lines.
   - End with a specific question to drive comments.

2. THREAD (The \"Value Bomb\"):
   - 5 posts total.
   - Post 1: The Hook (Make them click).
   - Posts 2-4: The Meat (High signal-to-noise ratio).
   - Post 5: The CTA (Link).

3. SHORT VIDEO SCRIPT (The \"Visual Story\"):
   - 60 seconds max.
   - Include [Visual Cues] in brackets.
   - Casual, high-energy tone.
   - Start with \"Stop doing X\" or \"Here's a secret...\"

4. RETRIEVAL SUMMARY (The \"Source of Truth\"):
   - A purely factual, density-optimized summary for an AI agent.
   - No fluff. Just facts.

Format the output as a VALID JSON object with keys: \"social_post\", \"thread\", \
\"video_script\", \"retrieval_summary\".";

/// Placeholder written into assets that could not be recovered from a
/// malformed reply.
pub const PARSE_ERROR_TEXT: &str = "Error parsing generated content.";

/// The four fixed campaign assets.
///
/// Callers can rely on all four fields being present regardless of what the
/// model returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub social_post: String,
    pub thread: String,
    pub video_script: String,
    pub retrieval_summary: String,
}

impl Campaign {
    /// Asset contents paired with their fixed export filenames.
    pub fn assets(&self) -> [(&'static str, &str); 4] {
        [
            ("social_post.txt", self.social_post.as_str()),
            ("thread.txt", self.thread.as_str()),
            ("video_script.txt", self.video_script.as_str()),
            ("retrieval_summary.txt", self.retrieval_summary.as_str()),
        ]
    }
}

/// Canned campaign returned in demo mode, bypassing the network.
pub fn demo_campaign() -> Campaign {
    Campaign {
        social_post: "Your content team isn't slow.\nYour process is.\n\n\
            We analyzed teams that turn one article into ten assets, and they share 3 habits:\n\n\
            1. One source of truth per story.\n\
            2. Formats decided before the draft exists.\n\
            3. Repurposing run as production, not a favor.\n\n\
            Without these? Your reach plateaus.\nWith them? Every story compounds.\n\n\
            How many assets does your best article become?"
            .to_string(),
        thread: "1/5 Publishing an article once is leaving reach on the table. \
            Most teams write more when they should be rewriting less.\n\n\
            2/5 Habit one: a single source of truth. One canonical story that every asset \
            derives from. No forked drafts, no drift.\n\n\
            3/5 Habit two: formats up front. The posts, the script, the email are planned \
            before the draft exists, so nothing is bolted on later.\n\n\
            4/5 Habit three: repurposing as production. Owners, deadlines, a checklist. \
            Not a Friday favor.\n\n\
            5/5 One article. Every channel. Full playbook: link.co/playbook"
            .to_string(),
        video_script: "[Visual: Host in front of a chart showing one article's reach flatlining]\n\
            Host: Stop publishing your articles once. Here's why.\n\n\
            [Visual: Article branching into ten assets]\n\
            Host: The teams winning at content don't write more. They repurpose with a system.\n\n\
            [Visual: Text overlay '1. One source of truth']\n\
            Host: One canonical story per topic. Everything derives from it.\n\n\
            [Visual: Text overlay '2. Formats up front']\n\
            Host: Decide the assets before the draft. Not after.\n\n\
            [Visual: Host smiling]\n\
            Host: Treat repurposing like production and every story compounds. Link in bio!"
            .to_string(),
        retrieval_summary: "To multiply content reach, high-output teams repurpose each source \
            article into multiple channel-specific assets using three practices: 1) A single \
            canonical source of truth per story to prevent divergent drafts; 2) Target formats \
            selected before drafting so all assets are planned as one batch; 3) Repurposing \
            operated as a production step with explicit owners and deadlines. Teams lacking \
            these practices typically publish one asset per article and see reach plateau."
            .to_string(),
    }
}

/// Recovers a [`Campaign`] from a model reply.
///
/// Two-stage parse: strict, then the `{...}` substring between the first
/// opening and last closing brace. If both fail (or the object is missing
/// keys), returns a degraded campaign whose first three assets hold
/// [`PARSE_ERROR_TEXT`] and whose `retrieval_summary` holds the raw reply
/// verbatim so the caller still sees something.
pub fn parse_campaign_reply(reply: &str) -> Campaign {
    if let Ok(campaign) = serde_json::from_str::<Campaign>(reply) {
        return campaign;
    }

    if let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) {
        if start < end {
            if let Ok(campaign) = serde_json::from_str::<Campaign>(&reply[start..=end]) {
                return campaign;
            }
        }
    }

    Campaign {
        social_post: PARSE_ERROR_TEXT.to_string(),
        thread: PARSE_ERROR_TEXT.to_string(),
        video_script: PARSE_ERROR_TEXT.to_string(),
        retrieval_summary: reply.to_string(),
    }
}

/// Generates the four campaign assets from source text.
///
/// `demo_mode` short-circuits to the canned campaign without touching the
/// network. Outside demo mode a credential is required. Issues exactly one
/// request; connectivity and authentication failures surface as their
/// distinct error variants, everything else as a generic generation
/// failure carrying the detail.
pub async fn generate_campaign(
    text: &str, api_key: Option<&str>, demo_mode: bool, config: &LlmConfig,
) -> Result<Campaign> {
    if demo_mode {
        return Ok(demo_campaign());
    }

    let key = api_key.ok_or(CopymillError::MissingApiKey)?;

    let mut config = config.clone();
    if config.temperature.is_none() {
        config.temperature = Some(0.7);
    }

    let client = LlmClient::new(key, config);
    let reply = client
        .complete(
            Some(CAMPAIGN_SYSTEM_PROMPT),
            &format!("Here is the source content to repurpose:\n\n{}", text),
        )
        .await?;

    Ok(parse_campaign_reply(&reply))
}
