use bookvault::commands::{CmdMessage, MessageLevel};
use bookvault::model::{Record, Settings};
use bookvault::search;
use bookvault::stats::{self, StatsReport};
use chrono::{DateTime, Utc};
use colored::Colorize;
use regex::Regex;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 20;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(crate) fn print_records(records: &[Record], pattern: Option<&Regex>, settings: &Settings) {
    if records.is_empty() {
        println!("No books found.");
        return;
    }

    for record in records {
        let id_col = format!("{:<width$}", record.id, width = ID_WIDTH);
        let pages = stats::format_pages(record.pages, settings.unit, settings.page_cap);
        let right = format!("{:>7}  {:<14}  {}", pages, record.tag, record.date_added);
        let time_ago = format_time_ago(record.created_at);

        let title_author = format!("{} by {}", record.title, record.author);
        let fixed = 2 + ID_WIDTH + 2 + right.width() + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let shown = truncate_to_width(&title_author, available);
        let padding = available.saturating_sub(shown.width());

        let styled = match pattern {
            Some(re) => highlight(&shown, re),
            None => shown.clone(),
        };

        println!(
            "  {}  {}{}  {}  {}",
            id_col.dimmed(),
            styled,
            " ".repeat(padding),
            right,
            time_ago.dimmed()
        );
    }
}

pub(crate) fn print_tags(tags: &[String]) {
    for tag in tags {
        println!("{tag}");
    }
}

pub(crate) fn print_settings(settings: &Settings) {
    println!("page-cap = {}", settings.page_cap);
    println!("unit     = {}", settings.unit);
    println!("theme    = {}", settings.theme);
}

pub(crate) fn print_stats(report: &StatsReport, settings: &Settings) {
    let unit = settings.unit;
    let cap = settings.page_cap;

    println!("{}", "Reading dashboard".bold());
    println!(
        "  Books: {}   Pages: {}   Avg: {}   Top tag: {}",
        report.total_books,
        stats::format_pages(report.total_pages, unit, cap),
        stats::format_pages(report.average_pages, unit, cap),
        report.top_tag.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Goal: {} / {} ({}%)",
        stats::format_pages(report.total_pages, unit, cap),
        stats::format_pages(f64::from(report.page_cap), unit, cap),
        report.percent.round()
    );
    if report.exceeded {
        println!(
            "  {}",
            format!(
                "Target exceeded by {}!",
                stats::format_pages(report.remaining.abs(), unit, cap)
            )
            .green()
        );
    } else {
        println!(
            "  {} pages remaining.",
            stats::format_pages(report.remaining, unit, cap)
        );
    }

    println!();
    println!("  Last 7 days:");
    for (day, count) in &report.week {
        println!(
            "    {}  {:<8} {}",
            day.format("%a"),
            "▇".repeat(*count),
            count
        );
    }

    println!();
    if report.tag_counts.is_empty() {
        println!("  No tags yet.");
    } else {
        println!("  Tags:");
        for (tag, count) in report.tag_counts.iter().take(8) {
            println!("    {:<16} {:<8} {}", tag, "▇".repeat(*count), count);
        }
    }
}

fn highlight(text: &str, re: &Regex) -> String {
    search::segments(text, re)
        .into_iter()
        .map(|(segment, matched)| {
            if matched {
                segment.yellow().bold().to_string()
            } else {
                segment.to_string()
            }
        })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
