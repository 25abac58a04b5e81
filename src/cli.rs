use std::time::Duration;
use clap::Parser;
use crate::postal::DEFAULT_API_URL;

const FALLBACK_COLUMNS: u16 = 80;

/// Look up Indian post offices by pincode
#[derive(Debug, Parser)]
#[command(name = "pincode-lookup", version, about)]
pub struct Cli {
    /// Pincode to look up once; omit it to start an interactive session
    pub pincode: Option<String>,

    /// Narrow the results of a one-shot lookup by post office name
    #[arg(long, requires = "pincode")]
    pub filter: Option<String>,

    /// Base URL of the postal lookup service
    #[arg(long, env = "PINCODE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Render for this many columns instead of the terminal width
    #[arg(long)]
    pub width: Option<u16>,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn columns(&self) -> u16 {
        self.width.unwrap_or_else(|| {
            crossterm::terminal::size()
                .map(|(columns, _)| columns)
                .unwrap_or(FALLBACK_COLUMNS)
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// One line typed in an interactive session
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// anything that is not a slash command, taken verbatim
    Lookup(&'a str),
    Filter(&'a str),
    Quit,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line {
            "/quit" | "/q" => Command::Quit,
            "/filter" => Command::Filter(""),
            _ => match line.strip_prefix("/filter ") {
                Some(text) => Command::Filter(text),
                None => Command::Lookup(line),
            },
        }
    }
}
