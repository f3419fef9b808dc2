//! Calendar reference extraction.
//!
//! Maps phrases such as "tháng này", "last month", "tháng 5" or "hôm nay" to
//! a concrete year and month. Rules are tried in a fixed priority order and
//! the first match wins; questions without a time phrase get the current
//! month.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::debug;

use crate::types::{TimeContext, TimeType};

// =============================================================================
// Compiled time patterns (compiled once, reused across calls)
// =============================================================================

struct TimePatterns {
    this_month: Vec<Regex>,
    last_month: Vec<Regex>,
    specific_month: Vec<Regex>,
    today: Vec<Regex>,
    this_year: Vec<Regex>,
}

static TIME_PATTERNS: LazyLock<TimePatterns> = LazyLock::new(|| {
    let mk = |pats: &[&str]| -> Vec<Regex> {
        pats.iter()
            .map(|p| Regex::new(&format!("(?i){}", p)).expect("Invalid time regex"))
            .collect()
    };

    TimePatterns {
        this_month: mk(&[
            r"tháng\s*này",
            r"this\s*month",
            r"tháng\s*hiện\s*tại",
            r"current\s*month",
        ]),
        last_month: mk(&[r"tháng\s*(trước|rồi)", r"last\s*month", r"previous\s*month"]),
        // Group 1 holds the month number in every pattern.
        specific_month: mk(&[
            r"tháng\s*(\d{1,2})",
            r"month\s*(\d{1,2})",
            r"(\d{1,2})/(\d{4})",
        ]),
        today: mk(&[r"hôm\s*nay", r"today", r"ngày\s*hôm\s*nay"]),
        this_year: mk(&[r"năm\s*nay", r"this\s*year", r"năm\s*hiện\s*tại"]),
    }
});

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}

// =============================================================================
// TimeContextExtractor
// =============================================================================

/// Extracts the calendar period a question refers to.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeContextExtractor;

impl TimeContextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the time context of `text` relative to `today`.
    pub fn extract(&self, text: &str, today: NaiveDate) -> TimeContext {
        let normalized = text.trim().to_lowercase();
        let pats = &*TIME_PATTERNS;
        let current = TimeContext::current(today);

        let context = if any_match(&pats.this_month, &normalized) {
            TimeContext {
                time_type: TimeType::ThisMonth,
                specified: true,
                ..current
            }
        } else if any_match(&pats.last_month, &normalized) {
            let (year, month) = previous_month(today.year(), today.month());
            TimeContext {
                year,
                month,
                time_type: TimeType::LastMonth,
                specified: true,
                ..current
            }
        } else if let Some(month) = specific_month(&pats.specific_month, &normalized) {
            TimeContext {
                month,
                time_type: TimeType::SpecificMonth,
                specified: true,
                ..current
            }
        } else if any_match(&pats.today, &normalized) {
            TimeContext {
                day: Some(today),
                time_type: TimeType::Today,
                specified: true,
                ..current
            }
        } else if any_match(&pats.this_year, &normalized) {
            TimeContext {
                time_type: TimeType::ThisYear,
                specified: true,
                ..current
            }
        } else {
            current
        };

        debug!(
            year = context.year,
            month = context.month,
            time_type = ?context.time_type,
            specified = context.specified,
            "Extracted time context"
        );
        context
    }
}

/// The first in-range month number captured by the patterns, in order.
///
/// Only the first match of each pattern is considered. The year in
/// `mm/yyyy` is not used.
fn specific_month(patterns: &[Regex], text: &str) -> Option<u32> {
    patterns.iter().find_map(|re| {
        let caps = re.captures(text)?;
        let month = caps.get(1)?.as_str().parse::<u32>().ok()?;
        (1..=12).contains(&month).then_some(month)
    })
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
