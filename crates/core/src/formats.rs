//! The fixed output-format registry.
//!
//! Every generation request selects one or more [`ContentFormat`]s. Each
//! format carries the instruction block used to request it from the model,
//! a pre-written demo sample with the identical section label (so demo-mode
//! output is structurally indistinguishable from live output), and a fixed
//! export filename. The registries are total over the enum: unknown format
//! ids are rejected at the parse boundary, never looked up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Divider between per-format sections in assembled responses.
///
/// Both the live system instruction and the demo assembly use this exact
/// divider, in both cases between sections in selection order.
pub const SECTION_DIVIDER: &str = "\n\n---\n\n";

/// Fixed filename for exporting a whole conversational reply.
pub const REPLY_EXPORT_FILENAME: &str = "copymill_output.txt";

/// One of the supported marketing-copy output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentFormat {
    /// Long-form social post with a hook and a closing question.
    SocialShort,
    /// Single micro post, 280 characters max.
    SocialMicro,
    /// Talking-head video script with bracketed visual cues.
    VideoScript,
    /// Dense factual summary optimized for AI retrieval.
    RetrievalSummary,
    /// Landing page hero copy with feature bullets and a CTA.
    LandingCopy,
    /// Single marketing email with subject and preview text.
    EmailCampaign,
    /// Meta title, meta description, and H1 alternatives.
    SeoMetadata,
}

impl ContentFormat {
    /// All formats, in canonical display order.
    pub fn all() -> Vec<ContentFormat> {
        vec![
            ContentFormat::SocialShort,
            ContentFormat::SocialMicro,
            ContentFormat::VideoScript,
            ContentFormat::RetrievalSummary,
            ContentFormat::LandingCopy,
            ContentFormat::EmailCampaign,
            ContentFormat::SeoMetadata,
        ]
    }

    /// Stable identifier used on the CLI and in serialized selections.
    pub fn id(&self) -> &'static str {
        match self {
            ContentFormat::SocialShort => "social-short",
            ContentFormat::SocialMicro => "social-micro",
            ContentFormat::VideoScript => "video-script",
            ContentFormat::RetrievalSummary => "retrieval-summary",
            ContentFormat::LandingCopy => "landing-copy",
            ContentFormat::EmailCampaign => "email-campaign",
            ContentFormat::SeoMetadata => "seo-metadata",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            ContentFormat::SocialShort => "Social Post",
            ContentFormat::SocialMicro => "Micro Post",
            ContentFormat::VideoScript => "Video Script (2-3 min)",
            ContentFormat::RetrievalSummary => "Retrieval Summary",
            ContentFormat::LandingCopy => "Landing Page Copy",
            ContentFormat::EmailCampaign => "Email Campaign",
            ContentFormat::SeoMetadata => "SEO Headlines & Meta",
        }
    }

    /// Fixed plain-text export filename for this format category.
    ///
    /// Filenames are per-category, never content-derived.
    pub fn export_filename(&self) -> &'static str {
        match self {
            ContentFormat::SocialShort => "social_short.txt",
            ContentFormat::SocialMicro => "social_micro.txt",
            ContentFormat::VideoScript => "video_script.txt",
            ContentFormat::RetrievalSummary => "retrieval_summary.txt",
            ContentFormat::LandingCopy => "landing_copy.txt",
            ContentFormat::EmailCampaign => "email_campaign.txt",
            ContentFormat::SeoMetadata => "seo_metadata.txt",
        }
    }

    /// The instruction block requesting this format from the model.
    ///
    /// Each block opens with the section label the reply must reproduce.
    pub fn instruction(&self) -> &'static str {
        match self {
            ContentFormat::SocialShort => {
                "**Social Post**\n\n\
                 [Write a scroll-stopping social post. Start with a contrarian hook. \
                 Short lines. End with a question. NO HASHTAGS.]"
            }
            ContentFormat::SocialMicro => {
                "**Micro Post**\n\n\
                 [Write a single punchy micro post. Max 280 chars. Insight-heavy. \
                 NO HASHTAGS. NOT a thread.]"
            }
            ContentFormat::VideoScript => {
                "**Video Script (2-3 min)**\n\n\
                 [Write a talking head script with [Visual Cues] in brackets. \
                 Conversational but professional tone.]"
            }
            ContentFormat::RetrievalSummary => {
                "**Retrieval Summary**\n\n\
                 [Write a factual, dense summary optimized for AI retrieval. No fluff.]"
            }
            ContentFormat::LandingCopy => {
                "**Landing Page Copy**\n\n\
                 [Write landing page copy with:\n\
                 - Hero headline (bold, benefit-driven)\n\
                 - Subheadline (1-2 sentences expanding on the value)\n\
                 - 3 feature bullets (short, punchy)\n\
                 - CTA text (action-oriented button text)]"
            }
            ContentFormat::EmailCampaign => {
                "**Email Campaign**\n\n\
                 [Write a single marketing email with:\n\
                 - Subject line (curiosity-driving, under 50 chars)\n\
                 - Preview text (complementary, under 90 chars)\n\
                 - Body (conversational, 150-200 words, clear CTA)]"
            }
            ContentFormat::SeoMetadata => {
                "**SEO Headlines & Meta**\n\n\
                 [Write SEO assets:\n\
                 - Meta title (under 60 chars, keyword-rich)\n\
                 - Meta description (under 155 chars, compelling)\n\
                 - 2-3 H1 alternatives (varied angles)]"
            }
        }
    }

    /// Pre-written example output shown in demo mode.
    ///
    /// Structurally equivalent to live output: same section label, same
    /// position in the assembly.
    pub fn demo_sample(&self) -> &'static str {
        match self {
            ContentFormat::SocialShort => {
                "**Social Post**\n\n\
                 Your content team isn't slow.\n\n\
                 Your process is.\n\n\
                 We looked at teams that ship ten assets from every article and teams that ship one. \
                 The difference isn't headcount. It's three habits:\n\n\
                 1. One source of truth per story\n\
                 2. Formats decided before the draft, not after\n\
                 3. Repurposing treated as production, not an afterthought\n\n\
                 The teams publishing everywhere aren't writing more. They're rewriting less.\n\n\
                 How many assets does your best article become?"
            }
            ContentFormat::SocialMicro => {
                "**Micro Post**\n\n\
                 Your content team isn't slow. Your process is. Teams that ship ten assets per \
                 article decide formats before the draft and treat repurposing as production. \
                 One story, many surfaces."
            }
            ContentFormat::VideoScript => {
                "**Video Script (2-3 min)**\n\n\
                 [Open on host at desk]\n\n\
                 Why do some content teams publish everywhere while yours is stuck on one channel?\n\n\
                 [Cut to graphic: one article branching into ten assets]\n\n\
                 It's not headcount. It's process.\n\n\
                 [Back to host]\n\n\
                 The teams that scale pick their formats before the draft exists. The article, the \
                 posts, the email — they're planned as one batch.\n\n\
                 [Show checklist graphic]\n\n\
                 Then they treat repurposing like production. Not a favor someone does on Friday.\n\n\
                 [Back to host, closing]\n\n\
                 One source of truth. Formats up front. Production, not afterthought. That's the \
                 whole playbook.\n\n\
                 Link in description for the full breakdown."
            }
            ContentFormat::RetrievalSummary => {
                "**Retrieval Summary**\n\n\
                 High-output content teams repurpose each source article into multiple assets by \
                 (1) maintaining a single source of truth per story, (2) selecting target formats \
                 before drafting, and (3) treating repurposing as a production step with owners and \
                 deadlines. Teams without these habits typically publish one asset per article and \
                 plateau on reach."
            }
            ContentFormat::LandingCopy => {
                "**Landing Page Copy**\n\n\
                 **Hero Headline:**\n\
                 One Article. Every Channel.\n\n\
                 **Subheadline:**\n\
                 Turn each story into posts, scripts, emails, and landing copy in one pass — \
                 without hiring another writer.\n\n\
                 **Feature Bullets:**\n\
                 • One source of truth: paste an article or a URL\n\
                 • Formats up front: pick the assets before you generate\n\
                 • Production-grade drafts: on-voice, ready to edit\n\n\
                 **CTA:**\n\
                 Start Repurposing →"
            }
            ContentFormat::EmailCampaign => {
                "**Email Campaign**\n\n\
                 **Subject:** Your best article is underworked\n\n\
                 **Preview:** One story should feed every channel.\n\n\
                 **Body:**\n\
                 Hey {{first_name}},\n\n\
                 Here's a pattern we keep seeing: the article your team spent two weeks on ships \
                 once, on one channel, and retires.\n\n\
                 The teams getting ten times the reach aren't writing ten times the content. \
                 They're repurposing with a process:\n\
                 → one source of truth per story\n\
                 → formats picked before the draft\n\
                 → repurposing run as production\n\n\
                 We wrote up how to set that up in an afternoon.\n\n\
                 [Read the Playbook]\n\n\
                 — The Copymill Team"
            }
            ContentFormat::SeoMetadata => {
                "**SEO Headlines & Meta**\n\n\
                 **Meta Title:**\n\
                 Content Repurposing: Turn One Article Into Ten Assets | Copymill\n\n\
                 **Meta Description:**\n\
                 Most articles ship once and retire. Learn the three habits — single source, \
                 formats up front, production mindset — that multiply every story's reach.\n\n\
                 **H1 Alternatives:**\n\
                 • The Content Repurposing Playbook\n\
                 • Why Your Best Articles Ship Once (And How to Fix It)\n\
                 • One Article, Every Channel: Repurposing That Scales"
            }
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "social-short" => Ok(ContentFormat::SocialShort),
            "social-micro" => Ok(ContentFormat::SocialMicro),
            "video-script" => Ok(ContentFormat::VideoScript),
            "retrieval-summary" => Ok(ContentFormat::RetrievalSummary),
            "landing-copy" => Ok(ContentFormat::LandingCopy),
            "email-campaign" => Ok(ContentFormat::EmailCampaign),
            "seo-metadata" => Ok(ContentFormat::SeoMetadata),
            _ => Err(format!(
                "Unknown format: {}. Valid options: social-short, social-micro, video-script, \
                 retrieval-summary, landing-copy, email-campaign, seo-metadata",
                s
            )),
        }
    }
}
