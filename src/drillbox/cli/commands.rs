//! # CLI Layer
//!
//! One client of the drillbox library. This is the only place that reads
//! process arguments, writes to stdout and decides exit behaviour.
//!
//! - `run()`: parse, build the context, dispatch
//! - `init_context()`: resolve the data directory and open the API
//! - `handle_*()`: call the API and print the result

use super::render::{
    print_messages, render_books, render_config, render_numbered, render_products, render_stats,
};
use super::setup::{
    Cli, Commands, DrillCommands, InventoryCommands, LibraryCommands, TaskCommands,
};
use clap::Parser;
use directories::ProjectDirs;
use drillbox::api::FileApi;
use drillbox::commands::config::ConfigAction;
use drillbox::commands::{CmdMessage, CmdResult, DrillPaths};
use drillbox::config::DrillConfig;
use drillbox::drills::{
    self, bmi, counter::Counter, explore, folds, grades, pricing, profile, tax, words,
};
use drillbox::error::{DrillError, Result};
use drillbox::filter::{filter, greater_than, is_valid_email};
use drillbox::normalize::parse_decimal;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

pub const DATA_ENV: &str = "DRILLBOX_DATA";

struct AppContext {
    api: FileApi,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Inventory(cmd) => {
            let result = match cmd {
                InventoryCommands::List { available } => ctx.api.list_products(available)?,
                InventoryCommands::Add { name, price, stock } => {
                    ctx.api.add_product(&name, &price, &stock)?
                }
                InventoryCommands::Sell { name, quantity } => ctx.api.sell(&name, quantity)?,
                InventoryCommands::Search { query } => ctx.api.search_products(&query)?,
            };
            show(result);
            Ok(())
        }
        Commands::Library(cmd) => {
            let result = match cmd {
                LibraryCommands::List { on_loan } => ctx.api.list_books(on_loan)?,
                LibraryCommands::Add { id, title } => ctx.api.add_book(&id, &title)?,
                LibraryCommands::Borrow { id, borrower } => ctx.api.borrow_book(&id, &borrower)?,
                LibraryCommands::Return { id } => ctx.api.return_book(&id)?,
                LibraryCommands::Search { query } => ctx.api.search_books(&query)?,
            };
            show(result);
            Ok(())
        }
        Commands::Tasks(cmd) => handle_tasks(&mut ctx, cmd),
        Commands::Analyze { csv, column } => {
            let result = ctx.api.analyze(&csv, &column)?;
            if let Some(stats) = &result.stats {
                print!("{}", render_stats(stats));
            }
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Report {
            students,
            courses,
            out,
            print_only,
        } => {
            let result = ctx.api.report(&students, &courses, out, print_only)?;
            if let Some(report) = &result.report {
                print!("{}", report);
            }
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Drill(cmd) => handle_drill(&ctx, cmd),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "drillbox", "drillbox")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DrillError::Config("could not determine a data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = data_dir(cli)?;
    debug!(data_dir = %dir.display(), "opening data directory");
    Ok(AppContext {
        api: FileApi::open(DrillPaths::new(dir)),
    })
}

fn show(result: CmdResult) {
    print!("{}", render_products(&result.products));
    print!("{}", render_books(&result.books));
    print_messages(&result.messages);
}

fn handle_tasks(ctx: &mut AppContext, cmd: TaskCommands) -> Result<()> {
    match cmd {
        TaskCommands::List => {
            let result = ctx.api.list_tasks()?;
            print!("{}", render_numbered(&result.tasks));
            print_messages(&result.messages);
        }
        TaskCommands::Add { text } => {
            let result = ctx.api.add_task(&text.join(" "))?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config_action(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn number(field: &str, text: &str) -> Result<f64> {
    parse_decimal(text).ok_or_else(|| DrillError::Type(format!("{}: not numeric", field)))
}

fn handle_drill(ctx: &AppContext, cmd: DrillCommands) -> Result<()> {
    match cmd {
        DrillCommands::Bmi { weight, height } => {
            let value = bmi::calculate(number("weight", &weight)?, number("height", &height)?)?;
            println!("BMI: {:.2} ({})", value, bmi::classify(value)?);
        }
        DrillCommands::Vat { base, rate } => {
            let rate = match rate {
                Some(text) => tax::TaxRate::new(number("rate", &text)?)?,
                None => config(ctx)?.tax_rate()?,
            };
            let base = number("base price", &base)?;
            let owed = tax::vat(base, rate)?;
            println!(
                "VAT at {}% on {:.2}: {:.2} (total {:.2})",
                rate.percent(),
                base,
                owed,
                base + owed
            );
        }
        DrillCommands::Discount { items, discount } => {
            let discount = match discount {
                Some(text) => number("discount", &text)?,
                None => config(ctx)?.discount,
            };
            let tags = items
                .iter()
                .map(|item| pricing::PriceTag::parse(item))
                .collect::<Result<Vec<_>>>()?;
            let prices = pricing::discounted_prices(&tags, discount)?;
            for (tag, price) in tags.iter().zip(prices) {
                println!("{}: {:.2} -> {:.2}", tag.name, tag.price, price);
            }
        }
        DrillCommands::Grades { entries, minimum } => {
            let minimum = match minimum {
                Some(text) => number("minimum", &text)?,
                None => config(ctx)?.passing_grade,
            };
            let roster = entries
                .iter()
                .map(|entry| drills::parse_labeled(entry))
                .collect::<Result<Vec<_>>>()?;
            let passed = grades::passing(&roster, minimum)?;
            if passed.is_empty() {
                println!("Nobody reached {:.1}.", minimum);
            }
            for (name, grade) in passed {
                println!("{}: {:.1}", name, grade);
            }
        }
        DrillCommands::Words { text, min_len } => {
            let min_len = match min_len {
                Some(n) => n,
                None => config(ctx)?.min_word_length,
            };
            let picked = words::long_words_upper(&text.join(" "), min_len);
            for (word, len) in words::lengths(&picked) {
                println!("{} ({})", word, len);
            }
        }
        DrillCommands::Sum { numbers } => {
            let values = numbers
                .iter()
                .map(|n| number("number", n))
                .collect::<Result<Vec<_>>>()?;
            println!("{}", folds::sum(&values));
        }
        DrillCommands::Concat { parts } => {
            println!("{}", folds::concat(&parts));
        }
        DrillCommands::Explore { json } => {
            let root: serde_json::Value = serde_json::from_str(&json)
                .map_err(|e| DrillError::Validation(format!("invalid JSON: {}", e)))?;
            for (atom, depth) in explore::walk(&root, 1)? {
                println!("{}{} (depth {})", "  ".repeat(depth - 1), atom, depth);
            }
        }
        DrillCommands::Count { increments } => {
            let mut counters: Vec<Counter> = increments.iter().map(|_| Counter::new()).collect();
            for (i, (counter, times)) in counters.iter_mut().zip(&increments).enumerate() {
                let mut last = counter.count();
                for _ in 0..*times {
                    last = counter.increment();
                }
                println!("counter {}: {}", i + 1, last);
            }
        }
        DrillCommands::Profile {
            name,
            age,
            hobbies,
            networks,
        } => {
            let networks = networks
                .iter()
                .map(|token| profile::parse_network(token))
                .collect::<Result<Vec<_>>>()?;
            let (card, dropped) = profile::Profile::build(&name, age, &hobbies, &networks)?;
            println!("{}", card);
            if !dropped.is_empty() {
                print_messages(&[CmdMessage::warning(format!(
                    "Left out: {}",
                    dropped.join(", ")
                ))]);
            }
        }
        DrillCommands::Emails { addresses } => {
            for address in filter(&addresses, |a| is_valid_email(a)) {
                println!("{}", address.trim());
            }
        }
        DrillCommands::Above { than, numbers } => {
            let kept: Vec<String> = filter(&numbers, greater_than(than))
                .iter()
                .map(i64::to_string)
                .collect();
            println!("{}", kept.join(" "));
        }
    }
    Ok(())
}

fn config(ctx: &AppContext) -> Result<DrillConfig> {
    ctx.api.config()
}
