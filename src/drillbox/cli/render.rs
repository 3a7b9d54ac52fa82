//! # Rendering
//!
//! Plain-text layout for records and statistics. Width math is done with
//! `unicode-width` so accented names line up; colour is applied per message
//! level with `colored`, which honours `NO_COLOR` and non-tty output.

use colored::Colorize;
use drillbox::commands::{CmdMessage, ColumnStats, MessageLevel};
use drillbox::config::{DrillConfig, KEYS};
use drillbox::model::{Book, Product};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NAME_WIDTH: usize = 32;
const NUMBER_WIDTH: usize = 12;

fn pad_to_width(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

pub fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return String::new();
    }
    let mut out = format!(
        "{}{:>w$}{:>w$}{:>w$}\n",
        pad_to_width("Name", NAME_WIDTH),
        "Price",
        "Stock",
        "Value",
        w = NUMBER_WIDTH
    );
    for p in products {
        out.push_str(&format!(
            "{}{:>w$.2}{:>w$}{:>w$.2}\n",
            pad_to_width(&p.name, NAME_WIDTH),
            p.price,
            p.stock,
            p.value(),
            w = NUMBER_WIDTH
        ));
    }
    out
}

pub fn render_books(books: &[Book]) -> String {
    if books.is_empty() {
        return String::new();
    }
    let id_width = books
        .iter()
        .map(|b| b.id.width())
        .max()
        .unwrap_or(0)
        .max("Id".width())
        + 2;
    let mut out = format!(
        "{}{}{}\n",
        pad_to_width("Id", id_width),
        pad_to_width("Title", NAME_WIDTH + 2),
        "Borrowed by"
    );
    for b in books {
        out.push_str(&format!(
            "{}{}{}\n",
            pad_to_width(&b.id, id_width),
            pad_to_width(&b.title, NAME_WIDTH + 2),
            b.loan.borrower().unwrap_or("-")
        ));
    }
    out
}

pub fn render_numbered(lines: &[String]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>3}. {}\n", i + 1, line))
        .collect()
}

pub fn render_stats(stats: &ColumnStats) -> String {
    format!(
        "column: {}\ncount:  {}\nmean:   {:.2}\nmax:    {:.2}\nmin:    {:.2}\n",
        stats.column, stats.count, stats.mean, stats.max, stats.min
    )
}

pub fn render_config(config: &DrillConfig) -> String {
    KEYS.iter()
        .filter_map(|key| config.get(key).map(|value| format!("{} = {}\n", key, value)))
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
