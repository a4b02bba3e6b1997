use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use copymill_core::{
    ContentFormat, EngineConfig, api_key_from_env, export_campaign, export_reply, fetch_file, fetch_stdin, generate,
    generate_campaign, try_scrape_article,
};
use owo_colors::OwoColorize;

mod chat;
mod report;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Repurpose articles into marketing-copy variants
#[derive(Parser, Debug)]
#[command(name = "copymill")]
#[command(author = "Copymill Contributors")]
#[command(version = "0.5.0")]
#[command(about = "Repurpose articles into marketing-copy variants", long_about = None)]
struct Args {
    /// URL to fetch, file of pasted source text, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output formats, comma-separated ids (social-short, social-micro,
    /// video-script, retrieval-summary, landing-copy, email-campaign,
    /// seo-metadata)
    #[arg(short = 'F', long, value_delimiter = ',', default_value = "social-short", value_name = "IDS")]
    formats: Vec<ContentFormat>,

    /// Produce the structured four-asset campaign JSON instead of drafts
    #[arg(long)]
    campaign: bool,

    /// Start an interactive chat session
    #[arg(long)]
    chat: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory to export plain-text artifacts into
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Force demo mode even when a credential is configured
    #[arg(long)]
    demo: bool,

    /// HTTP timeout in seconds for article fetches
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for article fetches
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Model identifier for generation requests
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Maximum output tokens per generation
    #[arg(long, value_name = "NUM")]
    max_tokens: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn engine_config(args: &Args) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.scrape.fetch.timeout = args.timeout;
    if let Some(user_agent) = &args.user_agent {
        config.scrape.fetch.user_agent = user_agent.clone();
    }
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if let Some(max_tokens) = args.max_tokens {
        config.llm.max_tokens = max_tokens;
    }

    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("copymill=debug,copymill_core=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
        report::print_banner();
    }

    let config = engine_config(&args);
    let api_key = if args.demo { None } else { api_key_from_env() };

    if args.verbose {
        if api_key.is_some() {
            report::print_info("Credential found, using live generation");
        } else {
            report::print_warning("No credential, running in demo mode");
        }
        eprintln!();
    }

    if args.chat {
        return chat::run(config, args.demo, args.formats).await;
    }

    let input = args
        .input
        .as_deref()
        .context("provide an INPUT (URL, file, or '-'), or use --chat")?;

    let source = if input == "-" {
        if args.verbose {
            report::print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else if input.starts_with("http://") || input.starts_with("https://") {
        if args.verbose {
            report::print_step(
                1,
                3,
                &format!("Fetching article from {}", input.bright_white().underline()),
            );
        }
        try_scrape_article(input, &config.scrape)
            .await
            .context("Failed to fetch that URL; try pasting the content directly")?
    } else {
        if args.verbose {
            report::print_step(1, 3, &format!("Reading from file {}", input.bright_white()));
        }
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?
    };

    if args.verbose {
        eprintln!(
            "  {} {}",
            "Size:".dimmed(),
            report::format_size(source.len()).bright_white()
        );
        eprintln!();
        report::print_step(
            2,
            3,
            if args.campaign { "Generating campaign assets" } else { "Generating drafts" },
        );
    }

    let output = if args.campaign {
        let campaign = generate_campaign(&source, api_key.as_deref(), api_key.is_none(), &config.llm).await?;

        if let Some(dir) = &args.save_dir {
            let written = export_campaign(dir, &campaign)?;
            if args.verbose {
                report::print_success(&format!("{} assets exported to {}", written.len(), dir.display()));
            }
        }

        serde_json::to_string_pretty(&campaign)?
    } else {
        let generation = generate(&source, &args.formats, api_key.as_deref(), &config.llm).await?;

        if let Some(dir) = &args.save_dir {
            let path = export_reply(dir, &generation.content)?;
            if args.verbose {
                report::print_success(&format!("Reply exported to {}", path.display()));
            }
        }

        generation.content
    };

    if args.verbose {
        report::print_step(3, 3, "Writing output");
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            report::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
