//! Per-session conversation state.
//!
//! One [`SessionState`] holds everything a single user interaction context
//! needs: the chat transcript, the draft archive, navigation state, the
//! current format selection, and the transient pending-input slot. It is an
//! explicit context object passed by `&mut` to every handler; it is not
//! shared across simultaneous requests and lives only for the session.
//!
//! Consume-clears semantics for the transient slots are enforced by the
//! accessor methods, not by caller convention.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::formats::ContentFormat;

/// Number of source characters kept as a draft preview.
pub const DRAFT_PREVIEW_CHARS: usize = 100;

/// The role of a chat message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A chat message in the conversation transcript.
///
/// The transcript is append-only during a session; role alternation is a
/// convention, not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// One archived generation result tied to a source excerpt.
///
/// Immutable once created; never deleted within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    /// First [`DRAFT_PREVIEW_CHARS`] characters of the source text.
    pub preview: String,
    /// The generated output.
    pub content: String,
    /// Creation time, `YYYY-MM-DD HH:MM`.
    pub timestamp: String,
}

/// UI navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    History,
    Guide,
    Demo,
}

/// Scraped content waiting to be consumed by the next submission pass.
#[derive(Debug, Clone)]
pub struct PendingInput {
    pub content: String,
    pub source_url: String,
}

/// Canned strategy walkthroughs triggered out-of-band.
///
/// Applying one appends a fixed user/assistant exchange to the transcript;
/// no request is issued and no draft is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyPreset {
    /// Content pillar strategy walkthrough.
    Pillars,
    /// Quarterly content calendar walkthrough.
    Calendar,
}

impl StrategyPreset {
    fn user_message(&self) -> &'static str {
        match self {
            StrategyPreset::Pillars => "Show me a content pillar strategy",
            StrategyPreset::Calendar => "Show me a quarterly content calendar",
        }
    }

    fn response(&self) -> &'static str {
        match self {
            StrategyPreset::Pillars => {
                "**Copymill**\n\n\
                 Here are **3 content pillars** worth anchoring a program on:\n\n\
                 ## Pillar 1: Operations Authority\n\
                 Target the leaders making platform decisions. Long-form guides, benchmark \
                 reports, case studies with hard numbers. Goal: own the category conversation.\n\n\
                 ## Pillar 2: The Practitioner Playbook\n\
                 Target the people doing the work. Skills content, day-in-the-life features, \
                 community spotlights. Goal: be the brand practitioners recommend upward.\n\n\
                 ## Pillar 3: Product in Action\n\
                 Target active evaluators. Customer stories with specifics, tasteful \
                 comparisons, implementation guides. Goal: convert consideration into demos.\n\n\
                 Each pillar maps to a funnel stage: awareness, consideration, decision. \
                 Together they feed the full funnel while reinforcing one core message."
            }
            StrategyPreset::Calendar => {
                "**Copymill**\n\n\
                 Here's a quarter-shaped calendar skeleton:\n\n\
                 ## Month 1: Foundation\n\
                 Launch the flagship report. Weekly: one blog post, one social post derived \
                 from it, one email to subscribers. Goal: list growth off the report.\n\n\
                 ## Month 2: The Human Angle\n\
                 Practitioner stories and skills content. Counter the category's anxiety \
                 narrative with day-to-day specifics. Goal: engagement depth.\n\n\
                 ## Month 3: Product Proof\n\
                 Customer wins, ROI stories, comparison content. Push toward the quarter \
                 close. Goal: demo requests.\n\n\
                 The repurposing engine: every flagship piece becomes a social post, a micro \
                 post, an email excerpt, a short video script, and a retrieval summary. One \
                 piece in, ten assets out."
            }
        }
    }
}

/// The canned greeting shown when the transcript is empty.
pub fn greeting() -> String {
    let mut text = String::from(
        "**Copymill** (v0.5)\n\n\
         Hello. I'm Copymill. I turn articles into on-voice marketing drafts.\n\n\
         **Select your output formats**, then paste an article, a URL, or ask a question.\n\n\
         Available formats:\n",
    );
    for format in ContentFormat::all() {
        text.push_str("- ");
        text.push_str(format.label());
        text.push('\n');
    }

    text
}

/// All state for one user interaction context.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Conversation transcript, append-only.
    pub messages: Vec<Message>,
    /// Draft archive, append-only, insertion order.
    pub draft_history: Vec<Draft>,
    /// Current navigation target.
    pub current_page: Page,
    /// Current output-format selection.
    pub selected_formats: Vec<ContentFormat>,
    /// Transient single-slot pending input; consume-clears.
    pending_input: Option<PendingInput>,
    /// Home-navigation marker; cleared when consumed so it cannot
    /// re-trigger.
    home_requested: bool,
    /// Incremented after each successful submission so presentation layers
    /// recreate the free-text input control.
    pub input_generation: u64,
}

impl SessionState {
    /// Creates a fresh session with the default format preselected.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            draft_history: Vec::new(),
            current_page: Page::Home,
            selected_formats: vec![ContentFormat::SocialShort],
            pending_input: None,
            home_requested: false,
            input_generation: 0,
        }
    }

    /// Resets an empty transcript to the single canned greeting.
    ///
    /// Called at render time; a non-empty transcript is left untouched.
    pub fn ensure_greeting(&mut self) {
        if self.messages.is_empty() {
            self.messages.push(Message { role: Role::Assistant, content: greeting() });
        }
    }

    /// Empties the transcript for a fresh conversation.
    pub fn reset_conversation(&mut self) {
        self.messages.clear();
    }

    /// Navigates to a page.
    pub fn navigate(&mut self, page: Page) {
        self.current_page = page;
    }

    /// Records a return-to-home request from an out-of-band affordance.
    pub fn request_home(&mut self) {
        self.home_requested = true;
    }

    /// Consumes a pending home request, if any.
    ///
    /// Resets the page to home and clears the marker so the request cannot
    /// re-trigger on later passes. Returns whether a request was consumed.
    pub fn consume_home_request(&mut self) -> bool {
        if self.home_requested {
            self.home_requested = false;
            self.current_page = Page::Home;
            true
        } else {
            false
        }
    }

    /// Stores scraped content for the next submission pass.
    ///
    /// At most one pending item is outstanding; a new one replaces any
    /// unconsumed predecessor.
    pub fn set_pending(&mut self, content: String, source_url: String) {
        if self.pending_input.is_some() {
            tracing::debug!("replacing unconsumed pending input");
        }
        self.pending_input = Some(PendingInput { content, source_url });
    }

    /// Takes the pending input, clearing the slot unconditionally.
    ///
    /// The slot is cleared even if everything downstream of the caller
    /// fails; this prevents re-processing loops.
    pub fn take_pending(&mut self) -> Option<PendingInput> {
        self.pending_input.take()
    }

    /// Appends a user message unless it duplicates the last stored message.
    ///
    /// Guards against duplicate entries caused by re-render cycles of the
    /// same logical action. Returns whether the message was appended.
    pub fn push_user_message(&mut self, content: &str) -> bool {
        if self.messages.last().is_some_and(|m| m.content == content) {
            return false;
        }
        self.messages.push(Message { role: Role::User, content: content.to_string() });
        true
    }

    /// Appends an assistant message.
    pub fn push_assistant_message(&mut self, content: &str) {
        self.messages.push(Message { role: Role::Assistant, content: content.to_string() });
    }

    /// Archives a generation result against its source text.
    pub fn record_draft(&mut self, source: &str, content: &str) {
        let preview: String = source.chars().take(DRAFT_PREVIEW_CHARS).collect();
        self.draft_history.push(Draft { preview, content: content.to_string(), timestamp: now_stamp() });
    }

    /// Drafts in display order, most recent first.
    pub fn drafts_newest_first(&self) -> impl Iterator<Item = &Draft> {
        self.draft_history.iter().rev()
    }

    /// Marks a successful submission so the input control is recreated.
    pub fn bump_input_generation(&mut self) {
        self.input_generation += 1;
    }

    /// Applies a canned strategy walkthrough to the transcript.
    pub fn apply_strategy_preset(&mut self, preset: StrategyPreset) {
        self.messages
            .push(Message { role: Role::User, content: preset.user_message().to_string() });
        self.messages
            .push(Message { role: Role::Assistant, content: preset.response().to_string() });
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

fn now_stamp() -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_else(|_| String::from("unknown"))
}
