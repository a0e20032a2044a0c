mod client;
mod output;
mod query;
#[cfg(feature = "interactive")]
mod tui;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use client::{sort_studies, SortDir, SortKey, StudiesClient};

#[derive(Parser)]
#[command(name = "neuroq")]
#[command(about = "Terminal-first boolean query builder for neuroimaging study search")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// API base URL (overrides NEUROQ_API_BASE and the config file)
    #[arg(long)]
    base: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch studies for a query and print them
    Search {
        /// The boolean query, e.g. "[-22,-4,18] NOT emotion"
        query: String,

        /// Maximum number of studies to print (0 = all)
        #[arg(short, long, default_value_t = 0)]
        limit: usize,

        /// Sort key
        #[arg(long, value_enum, default_value_t = SortArg::Year)]
        sort: SortArg,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Print raw JSON instead of formatted output
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Show how a query tokenizes, classifies, and normalizes
    Tokens {
        query: String,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Year,
    Journal,
    Title,
    Authors,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Year => SortKey::Year,
            SortArg::Journal => SortKey::Journal,
            SortArg::Title => SortKey::Title,
            SortArg::Authors => SortKey::Authors,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base = utils::resolve_api_base(cli.base.as_deref());

    match cli.command {
        Some(Commands::Search {
            query,
            limit,
            sort,
            desc,
            json,
            no_color,
        }) => {
            env_logger::init();
            let client = StudiesClient::new(base);
            // lookup failures are swallowed into an empty list by design;
            // RUST_LOG=debug surfaces them
            let rows = client.fetch(&query);
            let dir = if desc { SortDir::Desc } else { SortDir::Asc };
            let mut sorted: Vec<_> = sort_studies(&rows, sort.into(), dir)
                .into_iter()
                .cloned()
                .collect();
            if limit > 0 {
                sorted.truncate(limit);
            }
            if json {
                output::print_studies_json(&sorted)?;
            } else {
                output::print_studies(&sorted, !no_color)?;
            }
        }
        Some(Commands::Tokens { query, no_color }) => {
            env_logger::init();
            output::print_tokens(&query, !no_color)?;
        }
        None => {
            let initial = if cli.query.is_empty() {
                None
            } else {
                Some(cli.query.join(" "))
            };
            run_interactive(base, initial)?;
        }
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn run_interactive(base: String, initial: Option<String>) -> Result<()> {
    tui::run(base, initial)
}

#[cfg(not(feature = "interactive"))]
fn run_interactive(_base: String, _initial: Option<String>) -> Result<()> {
    anyhow::bail!("built without the 'interactive' feature; use `neuroq search`")
}
