//! Command-line surface: argument model and subcommand implementations.

pub mod batch_cmd;
pub mod output;
pub mod progress;
pub mod repl;
pub mod search_cmd;

use clap::{Args, Parser, Subcommand};
use sanctions_screen::config::{
    secs, DEFAULT_BASE_URL, DEFAULT_DELAY_SECS, DEFAULT_MAX_LINKS, DEFAULT_TIMEOUT_SECS,
    INTERACTIVE_MAX_LINKS,
};
use sanctions_screen::names::{DEFAULT_FIRST_NAME_COLUMN, DEFAULT_LAST_NAME_COLUMN};
use sanctions_screen::{ColumnMapping, ExtractorKind, NameSources, ScreenConfig, ScreenError};
use std::path::PathBuf;

/// Screen names against the OpenSanctions public search.
#[derive(Parser, Debug)]
#[command(name = "sanctions-screen")]
#[command(about = "Batch and interactive name screening against OpenSanctions search pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress and decorative output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Machine-readable JSON output (also switches logs to JSON)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output (also respects NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Screen a batch of names and write a CSV report
    Batch(BatchArgs),
    /// Look up a single name, or start an interactive prompt when no name is given
    Search(SearchArgs),
}

/// Options shared by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Entity link extractor: regex or dom
    #[arg(long, default_value = "regex")]
    pub extractor: ExtractorKind,

    /// Site root to search (for staging or mock servers)
    #[arg(long, default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Single name to search; can be repeated
    #[arg(long = "name")]
    pub names: Vec<String>,

    /// Text file with one name per line
    #[arg(long)]
    pub input_txt: Option<PathBuf>,

    /// CSV file with a header row
    #[arg(long)]
    pub input_csv: Option<PathBuf>,

    /// CSV column containing the full name
    #[arg(long)]
    pub name_column: Option<String>,

    /// CSV first-name column, used when --name-column is not set
    #[arg(long, default_value = DEFAULT_FIRST_NAME_COLUMN)]
    pub first_name_column: String,

    /// CSV last-name column, used when --name-column is not set
    #[arg(long, default_value = DEFAULT_LAST_NAME_COLUMN)]
    pub last_name_column: String,

    /// Output CSV path
    #[arg(short, long, default_value = "opensanctions_results.csv")]
    pub output: PathBuf,

    /// Maximum number of entity links to keep per name
    #[arg(long, default_value_t = DEFAULT_MAX_LINKS)]
    pub max_links: usize,

    /// Delay between requests in seconds
    #[arg(long, default_value_t = DEFAULT_DELAY_SECS)]
    pub sleep: f64,

    /// Do not deduplicate names before searching
    #[arg(long)]
    pub no_dedupe: bool,

    /// Limit number of names to search (0 = no limit)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Append progress events as JSON lines to this file
    #[arg(long)]
    pub events_log: Option<PathBuf>,

    #[command(flatten)]
    pub client: ClientArgs,
}

impl BatchArgs {
    pub fn sources(&self) -> NameSources {
        NameSources {
            explicit: self.names.clone(),
            line_file: self.input_txt.clone(),
            csv_file: self.input_csv.clone(),
            columns: ColumnMapping::from_options(
                self.name_column.as_deref(),
                &self.first_name_column,
                &self.last_name_column,
            ),
        }
    }

    pub fn config(&self) -> Result<ScreenConfig, ScreenError> {
        Ok(ScreenConfig {
            base_url: self.client.base_url.clone(),
            max_links: self.max_links,
            timeout: secs(self.client.timeout)?,
            delay: secs(self.sleep)?,
            dedupe: !self.no_dedupe,
            limit: self.limit,
            extractor: self.client.extractor,
            ..ScreenConfig::default()
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Name for a one-shot search; omit for the interactive prompt
    #[arg(long)]
    pub name: Option<String>,

    /// Maximum number of entity links shown per query
    #[arg(long, default_value_t = INTERACTIVE_MAX_LINKS)]
    pub max_links: usize,

    #[command(flatten)]
    pub client: ClientArgs,
}

impl SearchArgs {
    pub fn config(&self) -> Result<ScreenConfig, ScreenError> {
        Ok(ScreenConfig {
            base_url: self.client.base_url.clone(),
            max_links: self.max_links,
            timeout: secs(self.client.timeout)?,
            extractor: self.client.extractor,
            ..ScreenConfig::interactive()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_batch_defaults() {
        let cli = Cli::parse_from(["sanctions-screen", "batch", "--name", "Jane Doe"]);
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        let config = args.config().unwrap();
        assert_eq!(config, ScreenConfig::default());
        assert_eq!(args.output, PathBuf::from("opensanctions_results.csv"));
        assert_eq!(args.sources().explicit, vec!["Jane Doe"]);
        assert_eq!(args.sources().columns, ColumnMapping::default());
    }

    #[test]
    fn test_batch_flags() {
        let cli = Cli::parse_from([
            "sanctions-screen",
            "-vv",
            "batch",
            "--name",
            "a",
            "--name",
            "b",
            "--input-csv",
            "people.csv",
            "--name-column",
            "Full Name",
            "--max-links",
            "7",
            "--sleep",
            "0",
            "--timeout",
            "2.5",
            "--no-dedupe",
            "--limit",
            "10",
            "--extractor",
            "dom",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        let config = args.config().unwrap();
        assert_eq!(config.max_links, 7);
        assert!(config.delay.is_zero());
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert!(!config.dedupe);
        assert_eq!(config.limit, 10);
        assert_eq!(config.extractor, ExtractorKind::Dom);

        let sources = args.sources();
        assert_eq!(sources.explicit, vec!["a", "b"]);
        assert_eq!(sources.csv_file, Some(PathBuf::from("people.csv")));
        assert_eq!(sources.columns, ColumnMapping::FullName("Full Name".into()));
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::parse_from(["sanctions-screen", "search"]);
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert!(args.name.is_none());
        let config = args.config().unwrap();
        assert_eq!(config.max_links, 5);
        assert!(config.delay.is_zero());
    }

    #[test]
    fn test_out_of_range_seconds_are_config_errors() {
        let cli = Cli::parse_from([
            "sanctions-screen",
            "batch",
            "--name",
            "x",
            "--timeout",
            "1e20",
        ]);
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert!(matches!(args.config(), Err(ScreenError::Config(_))));

        let cli = Cli::parse_from(["sanctions-screen", "batch", "--name", "x", "--sleep", "1e20"]);
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert!(matches!(args.config(), Err(ScreenError::Config(_))));

        let cli = Cli::parse_from(["sanctions-screen", "search", "--timeout", "1e20"]);
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert!(matches!(args.config(), Err(ScreenError::Config(_))));
    }
}
