//! Command-line argument definitions.

use std::path::PathBuf;

use basket_query::{ListFilter, SortDirection, SortKey, SortSpec};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "basket",
    version,
    about = "Keep a dated, categorized shopping list and report on spending",
    long_about = "Keep a dated, categorized shopping list.\n\n\
                  Items are stored locally as JSON. List them with filters, sorting \
                  and paging, summarize spending by category, or export them as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: settings.toml in the platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the item data (overrides BASKET_DATA_DIR and settings).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add an item to the top of the list.
    Add(AddArgs),

    /// Remove the item at INDEX (as shown by `list`).
    Remove {
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Change fields of the item at INDEX (as shown by `list`).
    Update(UpdateArgs),

    /// Remove every item.
    Clear,

    /// Show the list, filtered and sorted, one page at a time.
    List(ListArgs),

    /// Summarize spending: totals, highest-cost item, category breakdown.
    Report(ReportArgs),

    /// Write the list as CSV.
    Export(ExportArgs),

    /// Show the category and subcategory choices.
    Categories,

    /// Show the effective settings, or write a settings file.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Item name.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[arg(long, short = 'c')]
    pub category: String,

    #[arg(long, short = 's')]
    pub subcategory: Option<String>,

    /// Quantity (whole number, at least 1).
    #[arg(long = "qty", default_value = "1")]
    pub quantity: String,

    /// Unit price (at least 0.01).
    #[arg(long, short = 'p')]
    pub price: String,

    /// Purchase date, YYYY-MM-DD (default: today).
    #[arg(long, short = 'd')]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(value_name = "INDEX")]
    pub index: usize,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    #[arg(long, short = 's')]
    pub subcategory: Option<String>,

    #[arg(long = "qty")]
    pub quantity: Option<String>,

    #[arg(long, short = 'p')]
    pub price: Option<String>,

    /// Purchase date, YYYY-MM-DD.
    #[arg(long, short = 'd')]
    pub date: Option<String>,
}

/// Filter and sort flags shared by `list` and `export`.
#[derive(Args, Clone)]
pub struct QueryArgs {
    /// Only items in this category (exact match).
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Only items in this subcategory (exact match).
    #[arg(long, short = 's')]
    pub subcategory: Option<String>,

    /// Only items whose name contains this text (case-insensitive).
    #[arg(long)]
    pub search: Option<String>,

    /// Sort key: name, category, subcategory, qty, price, totalPrice, date.
    #[arg(long, value_name = "KEY", default_value = "date")]
    pub sort: SortKey,

    /// Sort direction.
    #[arg(long, value_enum, default_value = "desc")]
    pub direction: DirectionArg,
}

impl QueryArgs {
    pub fn filter(&self) -> ListFilter {
        let mut filter = ListFilter::new();
        if let Some(category) = &self.category {
            filter = filter.with_category(category.as_str());
        }
        if let Some(subcategory) = &self.subcategory {
            filter = filter.with_subcategory(subcategory.as_str());
        }
        if let Some(search) = &self.search {
            filter = filter.with_search(search.as_str());
        }
        filter
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.sort, self.direction.into())
    }
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Pages to load; each page after the first waits for the load delay.
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Rows per page (default from settings).
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,

    /// Delay before each extra page, in milliseconds (default from settings).
    #[arg(long = "delay-ms")]
    pub delay_ms: Option<u64>,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Print the chart data as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Output file (default: stdout). A directory receives shopping_list.csv.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Field delimiter (default from settings).
    #[arg(long)]
    pub delimiter: Option<char>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective settings to the settings file.
    #[arg(long)]
    pub init: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_flags_build_query() {
        let cli = Cli::try_parse_from([
            "basket", "list", "--category", "Dairy", "--search", "", "--sort", "totalPrice",
            "--direction", "asc", "--pages", "3",
        ])
        .unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        let filter = args.query.filter();
        assert_eq!(filter.category.as_deref(), Some("Dairy"));
        assert_eq!(filter.search, None);
        assert_eq!(args.query.sort_spec(), SortSpec::asc(SortKey::TotalPrice));
        assert_eq!(args.pages, 3);
    }

    #[test]
    fn unknown_sort_key_is_a_usage_error() {
        assert!(Cli::try_parse_from(["basket", "list", "--sort", "colour"]).is_err());
    }
}
