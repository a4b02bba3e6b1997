//! Interactive chat session over the session store.
//!
//! A line-oriented REPL: plain lines are submissions (pasted text, a URL,
//! or a short question), `:commands` drive navigation, format selection,
//! presets, and exports. One submission triggers one pass through the
//! engine; a slow generation blocks that pass, as designed.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use copymill_core::{
    ContentFormat, EngineConfig, Page, Role, SessionState, StrategyPreset, SubmitOutcome, api_key_from_env,
    export_format, export_reply, handle_submission, scrape_article,
};
use owo_colors::OwoColorize;

use crate::report;

const COMMANDS_HELP: &str = "Commands:\n\
  :formats IDS    set output formats (comma-separated ids)\n\
  :fetch URL      fetch an article and queue it for the next pass\n\
  :history        browse archived drafts\n\
  :guide          show the voice & style guide\n\
  :demo [DIR]     show example output per format (optionally export to DIR)\n\
  :pillars        canned content-pillar strategy walkthrough\n\
  :calendar       canned quarterly-calendar walkthrough\n\
  :save DIR       export the last reply as a text file\n\
  :new            start a fresh conversation\n\
  :home           return to the home view\n\
  :quit           exit";

const GUIDE: &str = "Voice & Style Guide\n\n\
Core approach:\n\
  - Authoritative but accessible: claims grounded in what ships, not theory.\n\
  - Structure first: the problem, what it looks like, why it matters now.\n\
  - Concrete over abstract: real tools, real numbers, no vague claims.\n\n\
Mechanics:\n\
  - Confident, but humble. \"We built X\", not \"We tried to build X\".\n\
  - Short sentences. No jargon. Sentence fragments for effect.\n\
  - Cut \"very\", \"really\", \"actually\", \"just\". No hashtags, ever.\n\
  - End by inviting a reply.";

/// Runs the interactive session until `:quit` or EOF.
///
/// The credential is re-read from the environment on every submission, so
/// exporting or unsetting the key mid-session takes effect on the next
/// pass. `demo` forces demo mode regardless.
pub async fn run(config: EngineConfig, demo: bool, formats: Vec<ContentFormat>) -> Result<()> {
    let mut state = SessionState::new();
    if !formats.is_empty() {
        state.selected_formats = formats;
    }

    if current_api_key(demo).is_some() {
        report::print_info("Connected to the generation API");
    } else {
        report::print_warning("Demo mode (no API key configured)");
    }
    eprintln!("{}\n", COMMANDS_HELP.dimmed());

    state.ensure_greeting();
    print_last_reply(&state);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if state.consume_home_request() {
            state.reset_conversation();
            state.ensure_greeting();
            print_last_reply(&state);
        }

        print!("{} ", "copymill>".bold().bright_blue());
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(':') {
            let mut parts = rest.splitn(2, ' ');
            let command = parts.next().unwrap_or_default();
            let argument = parts.next().map(str::trim);

            if !run_command(&mut state, &config, demo, command, argument).await {
                break;
            }
            continue;
        }

        submit(&mut state, Some(line), demo, &config).await;
    }

    Ok(())
}

/// Reads the credential fresh from the environment; `demo` overrides it.
fn current_api_key(demo: bool) -> Option<String> {
    if demo { None } else { api_key_from_env() }
}

/// Executes one `:command`; returns `false` when the session should end.
async fn run_command(
    state: &mut SessionState, config: &EngineConfig, demo: bool, command: &str, argument: Option<&str>,
) -> bool {
    match command {
        "quit" | "q" | "exit" => return false,
        "formats" => set_formats(state, argument),
        "fetch" => fetch_into_pending(state, config, demo, argument).await,
        "history" => {
            state.navigate(Page::History);
            print_history(state);
        }
        "guide" => {
            state.navigate(Page::Guide);
            println!("\n{}\n", GUIDE);
        }
        "demo" => {
            state.navigate(Page::Demo);
            print_demo_gallery(argument);
        }
        "pillars" => {
            state.apply_strategy_preset(StrategyPreset::Pillars);
            print_last_reply(state);
        }
        "calendar" => {
            state.apply_strategy_preset(StrategyPreset::Calendar);
            print_last_reply(state);
        }
        "save" => save_last_reply(state, argument),
        "new" => {
            state.reset_conversation();
            state.ensure_greeting();
            print_last_reply(state);
        }
        "home" => state.request_home(),
        other => report::print_warning(&format!("Unknown command :{} (try :quit, :formats, :history)", other)),
    }

    true
}

async fn submit(state: &mut SessionState, typed: Option<&str>, demo: bool, config: &EngineConfig) {
    let api_key = current_api_key(demo);
    match handle_submission(state, typed, api_key.as_deref(), config).await {
        SubmitOutcome::Replied { content, draft_created } => {
            println!("\n{}\n", content);
            if draft_created {
                eprintln!("{}", "Draft archived. Use :history to browse.".dimmed());
            }
        }
        SubmitOutcome::Rejected { warning } => report::print_warning(&warning),
        SubmitOutcome::Failed { error } => report::print_error(&error),
        SubmitOutcome::Idle => {}
    }
}

fn set_formats(state: &mut SessionState, argument: Option<&str>) {
    let Some(argument) = argument.filter(|a| !a.is_empty()) else {
        report::print_warning("Usage: :formats social-short,seo-metadata");
        return;
    };

    let mut parsed = Vec::new();
    for id in argument.split(',') {
        match id.trim().parse::<ContentFormat>() {
            Ok(format) => parsed.push(format),
            Err(e) => {
                report::print_warning(&e);
                return;
            }
        }
    }

    state.selected_formats = parsed;
    let labels: Vec<&str> = state.selected_formats.iter().map(|f| f.label()).collect();
    report::print_success(&format!("Formats: {}", labels.join(", ")));
}

/// Scrapes a URL into the pending slot, then runs the pass that consumes it.
async fn fetch_into_pending(state: &mut SessionState, config: &EngineConfig, demo: bool, argument: Option<&str>) {
    let Some(url) = argument.filter(|a| !a.is_empty()) else {
        report::print_warning("Usage: :fetch https://example.com/post");
        return;
    };

    match scrape_article(url, &config.scrape).await {
        Some(content) => {
            state.set_pending(content, url.to_string());
            submit(state, None, demo, config).await;
        }
        None => report::print_error("Couldn't fetch that URL. Try pasting the content directly."),
    }
}

fn print_history(state: &SessionState) {
    if state.draft_history.is_empty() {
        report::print_info("No drafts yet. Paste some content to generate one.");
        return;
    }

    let total = state.draft_history.len();
    for (i, draft) in state.drafts_newest_first().enumerate() {
        println!(
            "\n{} {}",
            format!("Draft {}:", total - i).bold(),
            draft.timestamp.dimmed()
        );
        println!("  {}...", draft.preview);
    }
    println!();
}

fn print_demo_gallery(export_dir: Option<&str>) {
    for format in ContentFormat::all() {
        println!("\n{}\n", format.demo_sample());
    }
    eprintln!(
        "{}",
        "This is example output. Paste your own content to generate drafts.".dimmed()
    );

    if let Some(dir) = export_dir.filter(|d| !d.is_empty()) {
        let dir = std::path::Path::new(dir);
        for format in ContentFormat::all() {
            if let Err(e) = export_format(dir, format, format.demo_sample()) {
                report::print_error(&e.to_string());
                return;
            }
        }
        report::print_success(&format!("Samples exported to {}", dir.display()));
    }
}

fn save_last_reply(state: &SessionState, argument: Option<&str>) {
    let Some(dir) = argument.filter(|a| !a.is_empty()) else {
        report::print_warning("Usage: :save ./out");
        return;
    };

    let Some(reply) = state.messages.iter().rev().find(|m| m.role == Role::Assistant) else {
        report::print_warning("Nothing to save yet");
        return;
    };

    match export_reply(std::path::Path::new(dir), &reply.content) {
        Ok(path) => report::print_success(&format!("Saved to {}", path.display())),
        Err(e) => report::print_error(&e.to_string()),
    }
}

fn print_last_reply(state: &SessionState) {
    if let Some(message) = state.messages.last() {
        println!("\n{}\n", message.content);
    }
}
