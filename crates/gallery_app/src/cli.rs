//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Search Pixabay images from the terminal, with infinite scrolling.
#[derive(Debug, Default, Parser)]
#[command(name = "pixabay-gallery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Initial search query; the gallery opens with its first page loaded.
    pub query: Vec<String>,

    /// Pixabay API key.
    #[arg(long, env = "PIXABAY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Image-search endpoint (for proxies and testing).
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Configuration file (defaults to `<config dir>/pixabay-gallery/config.toml`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The positional words joined into one query, if any were given.
    pub fn initial_query(&self) -> Option<String> {
        let query = self.query.join(" ");
        if query.trim().is_empty() {
            None
        } else {
            Some(query)
        }
    }
}
