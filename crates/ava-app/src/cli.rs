use std::path::PathBuf;

use clap::Parser;

/// Ava: a terminal chat client for the Ava assistant.
#[derive(Parser, Debug)]
#[command(name = "ava", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. "debug" or "ava_chat=debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Backend base URL override.
    #[arg(long)]
    pub server: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
