//! cratenote - render Discogs bracket-tag markup from the command line
//!
//! Without `--resolve`, numeric references are skipped. With it, they are
//! resolved live against the Discogs API through the caching resolver.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cratenote_common::cache::MemoryCache;
use cratenote_common::config::Config;
use cratenote_discogs::{CachedResolver, DiscogsClient};
use cratenote_markup::{Emphasis, StyledText};

/// Render Discogs bracket-tag markup as styled text runs
#[derive(Parser)]
#[command(name = "cratenote", version)]
struct Args {
    /// Markup text to render
    markup: String,

    /// Resolve numeric artist/release/master references via the Discogs API
    #[arg(long)]
    resolve: bool,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load(args.config.as_deref())?;

    let styled = if args.resolve {
        let client = DiscogsClient::new(&config.api)?;
        let resolver = CachedResolver::new(client, Arc::new(MemoryCache::new()), &config.cache);
        info!("Resolving references against {}", config.api.base_url);
        cratenote_markup::parse_with_resolver(&args.markup, &resolver).await
    } else {
        cratenote_markup::parse(&args.markup)
    };

    print_runs(&styled);
    Ok(())
}

/// One line per run: the text, then any attributes in brackets.
fn print_runs(styled: &StyledText) {
    for run in styled.runs() {
        let mut attrs = Vec::new();
        match run.emphasis {
            Some(Emphasis::Strong) => attrs.push("bold".to_string()),
            Some(Emphasis::Regular) => attrs.push("italic".to_string()),
            None => {}
        }
        if run.underline {
            attrs.push("underline".to_string());
        }
        if let Some(link) = &run.link {
            attrs.push(format!("link={link}"));
        }

        if attrs.is_empty() {
            println!("{:?}", run.text);
        } else {
            println!("{:?} [{}]", run.text, attrs.join(", "));
        }
    }
}
