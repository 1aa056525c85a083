//! # Site Lens CLI (`slens`)
//!
//! The `slens` binary analyzes a site's `site.json` manifest and renders its
//! content items as cards on stdout.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `slens analyze <url>` | Fetch and render the site's manifest once |
//! | `slens analyze <url> --json` | Emit the result snapshot as JSON |
//! | `slens shell` | Interactive: analyze each URL read from stdin |
//!
//! ## Examples
//!
//! ```bash
//! # Analyze a site by base URL (".../site.json" is derived)
//! slens analyze https://example.com
//!
//! # A fully qualified manifest URL is used verbatim
//! slens analyze https://example.com/site.json
//!
//! # Machine-readable output
//! slens analyze https://example.com --json
//! ```
//!
//! Diagnostics go to stderr; stdout stays parseable. A fetch ending in the
//! error state exits with status 1.

use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};

use site_lens::card::{RenderSurface, TextCards};
use site_lens::controller::{SearchController, UiState};
use site_lens::resolver::HttpManifestResolver;

/// Site Lens — analyze a site's `site.json` manifest and render its content
/// items as cards.
#[derive(Parser)]
#[command(
    name = "slens",
    about = "Fetch a site's site.json manifest and render its content items as cards",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch and render a site's manifest once.
    ///
    /// Derives the manifest URL from the base URL (appending `/site.json`
    /// unless already present), validates the response, and renders the
    /// site overview plus one card per content item.
    Analyze {
        /// Site base URL (or a full `.../site.json` URL, used verbatim).
        url: String,

        /// Emit the result snapshot as JSON instead of text cards.
        #[arg(long)]
        json: bool,
    },

    /// Interactive shell: analyze each URL read from stdin.
    ///
    /// Every input line is an edit of the pending query followed by an
    /// analyze trigger. An empty line is rejected without a fetch. EOF exits.
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let resolver = HttpManifestResolver::new();

    match cli.command {
        Commands::Analyze { url, json } => {
            let mut controller = SearchController::new();
            controller.set_query(&url);

            if let Err(e) = controller.analyze(&resolver).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
            } else {
                TextCards.render(&controller.snapshot());
            }

            if controller.state() == UiState::Error {
                std::process::exit(1);
            }
        }
        Commands::Shell => {
            run_shell(&resolver).await?;
        }
    }

    Ok(())
}

/// Interactive loop: one controller reused across analyses.
async fn run_shell(resolver: &HttpManifestResolver) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let mut controller = SearchController::new();
    let mut renderer = TextCards;
    let stdin = std::io::stdin();

    loop {
        if interactive {
            print!("url> ");
            std::io::stdout().flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        controller.set_query(line.trim());
        if let Err(e) = controller.analyze(resolver).await {
            eprintln!("Error: {}", e);
            continue;
        }

        renderer.render(&controller.snapshot());
    }

    Ok(())
}
