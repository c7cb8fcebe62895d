//! Aggregate reading statistics for the dashboard view.

use crate::model::{Record, Settings, Unit};
use chrono::{Days, NaiveDate, Utc};

/// Snapshot of the collection's aggregates plus reading-goal progress.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub total_books: usize,
    pub total_pages: f64,
    pub average_pages: f64,
    pub top_tag: Option<String>,
    /// Tags with their record counts, most frequent first. Ties keep
    /// first-seen order.
    pub tag_counts: Vec<(String, usize)>,
    /// Add counts for the last seven days, oldest first.
    pub week: Vec<(NaiveDate, usize)>,
    pub page_cap: u32,
    /// Pages still to read toward the cap; negative once exceeded.
    pub remaining: f64,
    pub exceeded: bool,
    /// Progress toward the cap, capped at 100.
    pub percent: f64,
}

pub fn compute(records: &[Record], settings: &Settings) -> StatsReport {
    compute_as_of(records, settings, Utc::now().date_naive())
}

/// Like [`compute`], with an explicit "today" so the week window is
/// deterministic under test.
pub fn compute_as_of(records: &[Record], settings: &Settings, today: NaiveDate) -> StatsReport {
    let total_books = records.len();
    let total_pages: f64 = records.iter().map(|r| r.pages).sum();
    let average_pages = if total_books > 0 {
        (total_pages / total_books as f64).round()
    } else {
        0.0
    };

    let mut tag_counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        if record.tag.is_empty() {
            continue;
        }
        match tag_counts.iter_mut().find(|(tag, _)| *tag == record.tag) {
            Some((_, count)) => *count += 1,
            None => tag_counts.push((record.tag.clone(), 1)),
        }
    }
    tag_counts.sort_by(|a, b| b.1.cmp(&a.1));
    let top_tag = tag_counts.first().map(|(tag, _)| tag.clone());

    let week: Vec<(NaiveDate, usize)> = (0..7u64)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| {
            let count = records.iter().filter(|r| r.date_added == day).count();
            (day, count)
        })
        .collect();

    let cap = settings.page_cap;
    let remaining = f64::from(cap) - total_pages;
    let exceeded = total_pages >= f64::from(cap);
    let percent = if cap > 0 {
        (total_pages / f64::from(cap) * 100.0).min(100.0)
    } else {
        100.0
    };

    StatsReport {
        total_books,
        total_pages,
        average_pages,
        top_tag,
        tag_counts,
        week,
        page_cap: cap,
        remaining,
        exceeded,
        percent,
    }
}

/// Display transform for page counts: chapters ≈ pages/20, percent is
/// relative to the reading goal. Pages pass through unchanged.
pub fn format_pages(pages: f64, unit: Unit, cap: u32) -> String {
    match unit {
        Unit::Pages => format!("{pages}"),
        Unit::Chapters => format!("{}", (pages / 20.0).round()),
        Unit::Percent => {
            if cap > 0 {
                format!("{}%", (pages / f64::from(cap) * 100.0).round())
            } else {
                format!("{pages}")
            }
        }
    }
}
