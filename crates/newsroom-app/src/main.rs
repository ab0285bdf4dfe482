//! Newsroom - classify news content by keyword.
//!
//! Reads content from arguments, files or stdin and writes the assigned
//! category and tags as JSON on stdout. Logs go to stderr.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use newsroom_app::commands::{self, BatchFilter};
use newsroom_app::EngineConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Newsroom - keyword classification for news content
#[derive(Parser, Debug)]
#[command(name = "newsroom", version, about)]
struct Args {
    /// JSON keyword table to use instead of the built-in one
    #[arg(long, global = true, env = "NEWSROOM_KEYWORDS")]
    keywords: Option<PathBuf>,

    /// Bound the classification cache to N entries (0 = unbounded)
    #[arg(long, global = true, env = "NEWSROOM_CACHE_CAPACITY")]
    cache_capacity: Option<usize>,

    /// Log cache statistics when finished
    #[arg(long, global = true)]
    stats: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify each argument and print one JSON object per line
    Classify {
        /// Content to classify
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Categorize a JSON array of news items from a file or stdin
    Batch {
        /// Input file (defaults to stdin)
        file: Option<PathBuf>,

        /// Only output items in this category
        #[arg(long)]
        category: Option<String>,

        /// Only output items whose title or description contains this text
        #[arg(long)]
        keyword: Option<String>,
    },

    /// Print the active keyword table as JSON
    Keywords,
}

/// Initialize logging on stderr so stdout stays machine-readable.
fn init_logging(args: &Args) -> tracing_appender::non_blocking::WorkerGuard {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "newsroom={level},newsroom_app={level},newsroom_core={level},warn",
            level = log_level
        ))
    });

    let (non_blocking, guard) = tracing_appender::non_blocking(io::stderr());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(non_blocking).with_target(false))
        .init();

    guard
}

fn engine_config(args: &Args) -> EngineConfig {
    EngineConfig {
        keywords: args.keywords.clone(),
        cache_capacity: args.cache_capacity,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_logging(&args);

    let config = engine_config(&args);
    tracing::debug!("Starting with {:?}", config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &args.command {
        Command::Keywords => {
            let table = config.keyword_table()?;
            commands::print_keywords(&table, &mut out)?;
        }
        Command::Classify { texts } => {
            let cache = config.build_cache()?;
            commands::classify_texts(&cache, texts, &mut out)?;
            report_stats(&args, &cache.stats());
        }
        Command::Batch {
            file,
            category,
            keyword,
        } => {
            let cache = config.build_cache()?;
            let filter = BatchFilter {
                category: category.clone(),
                keyword: keyword.clone(),
            };

            match file {
                Some(path) => {
                    let input = File::open(path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    commands::run_batch(&cache, BufReader::new(input), &filter, &mut out)?;
                }
                None => {
                    commands::run_batch(&cache, io::stdin().lock(), &filter, &mut out)?;
                }
            }
            report_stats(&args, &cache.stats());
        }
    }

    out.flush()?;
    Ok(())
}

fn report_stats(args: &Args, stats: &newsroom_core::CacheStats) {
    if args.stats {
        tracing::info!(
            hits = stats.hits,
            misses = stats.misses,
            entries = stats.entries,
            "Cache hit rate {:.1}%",
            stats.hit_rate() * 100.0
        );
    }
}
