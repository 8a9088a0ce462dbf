//! Alexandria envcheck - Entry point
//!
//! This is the command-line entry point that performs configuration
//! resolution for the Alexandria platform.

use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alexandria_config::{resolve, EnvLoader, Schema};
use alexandria_envcheck::{error_lines, summary_json, summary_lines, VERSION};

/// Command-line arguments.
struct Args {
    /// Additional override files, applied after `.env`.
    env_files: Vec<PathBuf>,
    /// Print the redacted summary on success.
    summary: bool,
    /// Render the summary as JSON.
    json: bool,
    /// Suppress informational logging.
    quiet: bool,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut env_files = Vec::new();
        let mut summary = false;
        let mut json = false;
        let mut quiet = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--env-file" | "-e" => match args.next() {
                    Some(path) => env_files.push(PathBuf::from(path)),
                    None => {
                        eprintln!("--env-file requires a path");
                        std::process::exit(1);
                    }
                },
                "--summary" | "-s" => summary = true,
                "--json" => {
                    summary = true;
                    json = true;
                }
                "--quiet" | "-q" => quiet = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-V" => {
                    println!("alexandria-envcheck {VERSION}");
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {other}");
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
            }
        }

        Self {
            env_files,
            summary,
            json,
            quiet,
        }
    }
}

fn print_help() {
    println!(
        r"Alexandria Envcheck - Configuration resolution for the Alexandria platform

USAGE:
    alexandria-envcheck [OPTIONS]

OPTIONS:
    -e, --env-file <PATH>  Additional override file (repeatable; later files win)
    -s, --summary          Print the redacted configuration summary on success
        --json             Print the summary as JSON (implies --summary)
    -q, --quiet            Suppress informational logging
    -h, --help             Print help information
    -V, --version          Print version information

SOURCES (later sources override earlier ones):
    .env                   Optional local override file, never committed
    --env-file files       In the order given
    process environment    Always wins

KEY ENVIRONMENT VARIABLES:
    ENVIRONMENT            development | production | testing (default: development)
    OPENAI_API_KEY         OpenAI API key (this or ANTHROPIC_API_KEY is required)
    ANTHROPIC_API_KEY      Anthropic API key
    PINECONE_API_KEY       Pinecone API key (required)
    PINECONE_ENVIRONMENT   Pinecone environment (required)
    PINECONE_INDEX_NAME    Pinecone index name (required)
    SECRET_KEY             Signing secret (required in production)

EXAMPLES:
    # Validate the local .env plus the process environment
    alexandria-envcheck --summary

    # Validate a deployment profile
    alexandria-envcheck --env-file deploy/.env.production

Exit code 0 means the configuration resolved; any validation failure prints
every collected error to stderr, one per line, and exits 1.
"
    );
}

fn main() {
    let args = Args::parse();

    // Initialize tracing; diagnostics go to stderr so stdout stays reserved
    // for the summary.
    let default_filter = if args.quiet {
        "alexandria_envcheck=error,alexandria_config=error"
    } else {
        "alexandria_envcheck=info,alexandria_config=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let mut loader = EnvLoader::new().with_file(".env");
    for path in &args.env_files {
        loader = loader.with_file(path);
    }

    let raw = match loader.load() {
        Ok(raw) => raw,
        Err(e) => {
            error!("failed to load environment: {e}");
            std::process::exit(1);
        }
    };

    match resolve(&Schema::alexandria(), &raw) {
        Ok(config) => {
            info!(
                profile = %config.profile(),
                keys = config.len(),
                "configuration resolved"
            );
            if args.summary {
                if args.json {
                    println!("{}", summary_json(&config));
                } else {
                    for line in summary_lines(&config) {
                        println!("{line}");
                    }
                }
            }
        }
        Err(errors) => {
            for line in error_lines(&errors) {
                eprintln!("{line}");
            }
            error!(count = errors.len(), "configuration validation failed");
            std::process::exit(1);
        }
    }
}
