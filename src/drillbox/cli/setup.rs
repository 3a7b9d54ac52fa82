use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "drillbox",
    bin_name = "drillbox",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Small record-keeping and data drills", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: $DRILLBOX_DATA, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Products, prices and stock
    #[command(subcommand)]
    Inventory(InventoryCommands),

    /// Books and loans
    #[command(subcommand)]
    Library(LibraryCommands),

    /// The task list
    #[command(subcommand)]
    Tasks(TaskCommands),

    /// Mean, max and min of a numeric CSV column
    Analyze {
        /// CSV file with a header row (looked up in the data dir if not found)
        csv: PathBuf,
        /// Column to summarize
        column: String,
    },

    /// Student/course report from a CSV and a JSON file
    Report {
        /// CSV with `name` and `courses` (`;`-separated ids) columns
        students: PathBuf,
        /// JSON course table: {"ID": "Name"} or [{"id", "name"}]
        courses: PathBuf,
        /// Output file (default: <data>/report.txt)
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Print the report without writing it
        #[arg(long)]
        print_only: bool,
    },

    /// Standalone calculations
    #[command(subcommand)]
    Drill(DrillCommands),

    /// Show or set drill defaults
    Config {
        /// tax-rate, discount, passing-grade or min-word-length
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// List products
    #[command(alias = "ls")]
    List {
        /// Only products with stock
        #[arg(long)]
        available: bool,
    },
    /// Add a product or top up an existing one
    Add {
        name: String,
        price: String,
        stock: String,
    },
    /// Take units out of stock
    Sell {
        name: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Find products by name
    Search { query: String },
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommands {
    /// List books
    #[command(alias = "ls")]
    List {
        /// Only books currently on loan
        #[arg(long)]
        on_loan: bool,
    },
    /// Register a book or retitle an existing one
    Add { id: String, title: String },
    /// Lend a book
    Borrow { id: String, borrower: String },
    /// Take a book back
    Return { id: String },
    /// Find books by title
    Search { query: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks
    #[command(alias = "ls")]
    List,
    /// Add a task (words are joined with spaces)
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DrillCommands {
    /// Body mass index and its category
    Bmi {
        /// Weight in kg
        weight: String,
        /// Height in m
        height: String,
    },
    /// VAT owed on a base price
    Vat {
        base: String,
        /// Rate in [0, 1] (default: config tax-rate)
        #[arg(long)]
        rate: Option<String>,
    },
    /// Discounted prices for name:price entries
    Discount {
        #[arg(required = true, value_name = "NAME:PRICE")]
        items: Vec<String>,
        /// Fraction in [0, 1] (default: config discount)
        #[arg(long)]
        discount: Option<String>,
    },
    /// Students at or above the passing grade, from name:grade entries
    Grades {
        #[arg(required = true, value_name = "NAME:GRADE")]
        entries: Vec<String>,
        /// Minimum grade on the 0-5 scale (default: config passing-grade)
        #[arg(long)]
        minimum: Option<String>,
    },
    /// Upper-cased words longer than a threshold, with their lengths
    Words {
        #[arg(required = true)]
        text: Vec<String>,
        /// Length threshold (default: config min-word-length)
        #[arg(long)]
        min_len: Option<usize>,
    },
    /// Sum of numbers
    Sum {
        #[arg(allow_negative_numbers = true)]
        numbers: Vec<String>,
    },
    /// Concatenation of strings
    Concat { parts: Vec<String> },
    /// Atoms of a JSON structure with their depth
    Explore {
        /// JSON text, e.g. '[1, [2, 3], {"a": 4}]'
        json: String,
    },
    /// Run independent counters
    Count {
        /// Increments per counter, e.g. `3 1` runs two counters
        #[arg(required = true)]
        increments: Vec<u32>,
    },
    /// User profile card from a name, an age and optional hobbies
    Profile {
        name: String,
        #[arg(allow_negative_numbers = true)]
        age: i64,
        hobbies: Vec<String>,
        /// Social handle, repeatable (e.g. -n twitter=ana)
        #[arg(long = "network", short = 'n', value_name = "NETWORK=USER")]
        networks: Vec<String>,
    },
    /// Keep the valid e-mail addresses
    Emails {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Keep the integers above a threshold
    Above {
        /// Threshold (exclusive)
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        than: i64,
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_grouped_subcommands() {
        let cli = Cli::try_parse_from([
            "drillbox",
            "--data-dir",
            "/tmp/d",
            "inventory",
            "sell",
            "Shirt",
            "-2",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/d")));
        match cli.command {
            Commands::Inventory(InventoryCommands::Sell { name, quantity }) => {
                assert_eq!(name, "Shirt");
                assert_eq!(quantity, -2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn profile_takes_repeated_networks() {
        let cli = Cli::try_parse_from([
            "drillbox", "drill", "profile", "Ana", "28", "leer", "-n", "twitter=ana",
            "--network", "github=ana28",
        ])
        .unwrap();
        match cli.command {
            Commands::Drill(DrillCommands::Profile { name, age, hobbies, networks }) => {
                assert_eq!(name, "Ana");
                assert_eq!(age, 28);
                assert_eq!(hobbies, vec!["leer"]);
                assert_eq!(networks, vec!["twitter=ana", "github=ana28"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["drillbox", "-vv", "tasks", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
