pub mod campaign;
pub mod error;
pub mod export;
pub mod fetch;
pub mod formats;
pub mod generate;
pub mod handler;
pub mod llm;
pub mod scrape;
pub mod session;

pub use campaign::{CAMPAIGN_SYSTEM_PROMPT, Campaign, demo_campaign, generate_campaign, parse_campaign_reply};
pub use error::{CopymillError, Result};
pub use export::{export_campaign, export_format, export_reply};
pub use fetch::FetchConfig;
pub use fetch::{fetch_file, fetch_stdin, fetch_url};
pub use formats::{ContentFormat, REPLY_EXPORT_FILENAME, SECTION_DIVIDER};
pub use generate::{
    CONTENT_PASTE_THRESHOLD, Generation, PromptKind, build_draft_system_prompt, demo_draft_response, generate,
    is_content_paste,
};
pub use handler::{EngineConfig, SubmitOutcome, handle_submission};
pub use llm::{API_KEY_VAR, LlmClient, LlmConfig, api_key_from_env};
pub use scrape::{CONTENT_ROOT_SELECTORS, ScrapeConfig, extract_article_text, scrape_article, try_scrape_article};
pub use session::{Draft, Message, Page, PendingInput, Role, SessionState, StrategyPreset, greeting};
