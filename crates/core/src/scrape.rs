//! Best-effort article-body extraction from web pages.
//!
//! This module fetches a page and guesses which part of it is the article
//! body using an ordered chain of container heuristics. It is deliberately
//! simple: no scoring, no multi-candidate comparison, no retries. The first
//! matching container wins, boilerplate tags are stripped, and the text of
//! paragraph, heading, and list-item elements is concatenated in document
//! order.
//!
//! # Example
//!
//! ```rust
//! use copymill_core::scrape::{ScrapeConfig, extract_article_text};
//!
//! let html = "<html><body><article><p>Story text here.</p></article></body></html>";
//! let text = extract_article_text(html, &ScrapeConfig::default()).unwrap();
//! assert_eq!(text, "Story text here.");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::fetch::{FetchConfig, fetch_url};
use crate::{CopymillError, Result};

/// Content-root candidate selectors, tried in order; first match wins.
///
/// The order is load-bearing: reordering changes extraction behavior on
/// pages where more than one candidate matches.
pub const CONTENT_ROOT_SELECTORS: &[&str] = &["article", "main", "div.post-content", "body"];

/// Tags whose text never reaches the output.
///
/// This prevents boilerplate leakage but cannot detect site-specific chrome
/// living outside these tags. Known limitation.
const STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "iframe", "aside"];

/// Elements whose text is collected, in document order.
const TEXT_ELEMENTS: &str = "p, h1, h2, h3, li";

/// Configuration for article scraping.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Hard character budget for the returned text. Truncation is silent;
    /// callers must not assume the result is a complete article.
    pub max_chars: usize,
    /// HTTP fetch settings.
    pub fetch: FetchConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self { max_chars: 15_000, fetch: FetchConfig::default() }
    }
}

/// Extracts article text from raw HTML.
///
/// Selects a content root via [`CONTENT_ROOT_SELECTORS`], drops text under
/// any of the stripped boilerplate tags, concatenates the text of
/// `p`/`h1`–`h3`/`li` elements joined by single spaces, collapses whitespace
/// runs, and truncates to the configured character budget.
///
/// # Errors
///
/// Returns [`CopymillError::NoContent`] when nothing textual survives, and
/// [`CopymillError::HtmlParseError`] if a selector fails to parse.
pub fn extract_article_text(html: &str, config: &ScrapeConfig) -> Result<String> {
    let doc = Html::parse_document(html);

    let root = select_content_root(&doc)?;

    let text_selector = parse_selector(TEXT_ELEMENTS)?;
    let mut pieces: Vec<String> = Vec::new();
    for element in root.select(&text_selector) {
        let piece = element_text(element, root);
        pieces.push(piece.trim().to_string());
    }

    let joined = pieces.join(" ");
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        return Err(CopymillError::NoContent);
    }

    if collapsed.chars().count() > config.max_chars {
        Ok(collapsed.chars().take(config.max_chars).collect())
    } else {
        Ok(collapsed)
    }
}

/// Fetches a URL and extracts its article text, propagating the cause.
///
/// Fails on network errors, timeouts, non-success statuses, and pages
/// without extractable text. Safe to retry by the caller; idempotent and
/// side-effect-free beyond the single GET.
pub async fn try_scrape_article(url: &str, config: &ScrapeConfig) -> Result<String> {
    let html = fetch_url(url, &config.fetch).await?;
    extract_article_text(&html, config)
}

/// Fetches a URL and extracts its article text, swallowing failures.
///
/// Any failure is logged and returned as `None`; this function never
/// propagates an error. Use [`try_scrape_article`] when the cause matters.
pub async fn scrape_article(url: &str, config: &ScrapeConfig) -> Option<String> {
    match try_scrape_article(url, config).await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(url, error = %e, "article scrape failed");
            None
        }
    }
}

/// Tries each root selector in order and returns the first match.
///
/// `body` is last in the chain and always present in a parsed document, so
/// this only fails if a selector string is malformed.
fn select_content_root(doc: &Html) -> Result<ElementRef<'_>> {
    for selector_str in CONTENT_ROOT_SELECTORS {
        let selector = parse_selector(selector_str)?;
        if let Some(root) = doc.select(&selector).next() {
            return Ok(root);
        }
    }

    Err(CopymillError::NoContent)
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| CopymillError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Collects the text of an element, skipping text nodes that sit under a
/// stripped boilerplate tag anywhere between the node and the content root.
fn element_text(element: ElementRef<'_>, root: ElementRef<'_>) -> String {
    let mut out = String::new();

    for node in element.descendants() {
        if let Some(text) = node.value().as_text() {
            let mut blocked = false;
            for ancestor in node.ancestors() {
                if ancestor.id() == root.id() {
                    break;
                }
                if let Some(el) = ancestor.value().as_element() {
                    if STRIP_TAGS.contains(&el.name()) {
                        blocked = true;
                        break;
                    }
                }
            }
            if !blocked {
                out.push_str(text);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Result<String> {
        extract_article_text(html, &ScrapeConfig::default())
    }

    #[test]
    fn test_scrape_config_default() {
        let config = ScrapeConfig::default();
        assert_eq!(config.max_chars, 15_000);
        assert_eq!(config.fetch.timeout, 10);
    }

    #[test]
    fn test_article_container_preferred() {
        let html = r#"
            <html><body>
                <main><p>Main text that should lose.</p></main>
                <article><p>Article text that should win.</p></article>
            </body></html>
        "#;

        let text = extract(html).unwrap();
        assert_eq!(text, "Article text that should win.");
    }

    #[test]
    fn test_main_fallback() {
        let html = r#"
            <html><body>
                <main><p>Main container text.</p></main>
                <div class="post-content"><p>Post content text.</p></div>
            </body></html>
        "#;

        let text = extract(html).unwrap();
        assert_eq!(text, "Main container text.");
    }

    #[test]
    fn test_post_content_fallback() {
        let html = r#"
            <html><body>
                <div class="post-content"><p>Conventional class text.</p></div>
                <p>Stray body paragraph.</p>
            </body></html>
        "#;

        let text = extract(html).unwrap();
        assert_eq!(text, "Conventional class text.");
    }

    #[test]
    fn test_body_fallback_strips_chrome() {
        // No <article>, no <main>, no .post-content: fall back to <body>,
        // still dropping nav/footer/script text.
        let html = r#"
            <html><body>
                <nav><li>Menu item</li></nav>
                <p>Real paragraph.</p>
                <script>var tracking = "beacon";</script>
                <footer><p>Copyright notice</p></footer>
            </body></html>
        "#;

        let text = extract(html).unwrap();
        assert_eq!(text, "Real paragraph.");
        assert!(!text.contains("beacon"));
        assert!(!text.contains("Menu item"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn test_inline_script_inside_paragraph() {
        let html = r#"
            <html><body><article>
                <p>Before <script>sneaky()</script> after.</p>
            </article></body></html>
        "#;

        let text = extract(html).unwrap();
        assert!(text.contains("Before"));
        assert!(text.contains("after."));
        assert!(!text.contains("sneaky"));
    }

    #[test]
    fn test_whitespace_collapsed() {
        let html = "<html><body><article><p>Spaced \n\n   out\ttext</p><h2>Heading</h2></article></body></html>";

        let text = extract(html).unwrap();
        assert_eq!(text, "Spaced out text Heading");
    }

    #[test]
    fn test_document_order_preserved() {
        let html = r#"
            <html><body><article>
                <h1>Title</h1>
                <p>First.</p>
                <h2>Section</h2>
                <li>Item</li>
                <p>Last.</p>
            </article></body></html>
        "#;

        let text = extract(html).unwrap();
        assert_eq!(text, "Title First. Section Item Last.");
    }

    #[test]
    fn test_truncation_budget() {
        let paragraph = format!("<p>{}</p>", "word ".repeat(5_000));
        let html = format!("<html><body><article>{}</article></body></html>", paragraph);

        let config = ScrapeConfig::default();
        let text = extract_article_text(&html, &config).unwrap();
        assert_eq!(text.chars().count(), config.max_chars);
    }

    #[test]
    fn test_small_budget_truncates() {
        let html = "<html><body><article><p>abcdefghij</p></article></body></html>";
        let config = ScrapeConfig { max_chars: 4, ..Default::default() };

        let text = extract_article_text(html, &config).unwrap();
        assert_eq!(text, "abcd");
    }

    #[test]
    fn test_no_text_elements_is_no_content() {
        let html = "<html><body><div>Bare div text only.</div></body></html>";
        assert!(matches!(extract(html), Err(CopymillError::NoContent)));
    }

    #[test]
    fn test_empty_document_is_no_content() {
        assert!(matches!(extract("<html><body></body></html>"), Err(CopymillError::NoContent)));
    }

    #[test]
    fn test_scrape_article_swallows_failures() {
        let config = ScrapeConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(scrape_article("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(result.is_none());
    }
}
