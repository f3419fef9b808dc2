//! Shared types for the finance chatbot.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChatError;

// =============================================================================
// Intent
// =============================================================================

/// What a question asks about.
///
/// Variant order (excluding `Unknown`) is the classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    TotalExpense,
    TotalIncome,
    CategoryBreakdown,
    MonthlyTrend,
    BudgetStatus,
    RecentTransactions,
    WalletBalance,
    IncomeVsExpense,
    DailySummary,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::TotalExpense => "total_expense",
            Intent::TotalIncome => "total_income",
            Intent::CategoryBreakdown => "category_breakdown",
            Intent::MonthlyTrend => "monthly_trend",
            Intent::BudgetStatus => "budget_status",
            Intent::RecentTransactions => "recent_transactions",
            Intent::WalletBalance => "wallet_balance",
            Intent::IncomeVsExpense => "income_vs_expense",
            Intent::DailySummary => "daily_summary",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Time context
// =============================================================================

/// Which rule produced a [`TimeContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeType {
    ThisMonth,
    LastMonth,
    SpecificMonth,
    Today,
    ThisYear,
}

/// The calendar period a question refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeContext {
    pub year: i32,
    /// Always within 1..=12.
    pub month: u32,
    /// Set only for `TimeType::Today`.
    #[serde(rename = "date", skip_serializing_if = "Option::is_none", default)]
    pub day: Option<NaiveDate>,
    pub time_type: TimeType,
    /// False when no time expression was found and defaults apply.
    pub specified: bool,
}

impl TimeContext {
    /// The default context: the month containing `today`, unspecified.
    pub fn current(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            day: None,
            time_type: TimeType::ThisMonth,
            specified: false,
        }
    }
}

// =============================================================================
// Locale
// =============================================================================

/// Answer language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Vi,
    En,
}

impl Locale {
    /// Parse a language tag such as `vi`, `en` or `en-US`.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let lang = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match lang.as_str() {
            "vi" => Some(Locale::Vi),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

// =============================================================================
// Answers
// =============================================================================

/// A rendered chatbot answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatAnswer {
    pub answer: String,
    /// Structured payload behind the answer; `None` for unknown questions.
    pub data: Option<Value>,
    pub suggested_actions: Vec<String>,
    pub intent: Intent,
    pub confidence: f32,
    pub time_context: TimeContext,
}

/// Kind of raw rows requested from the rows endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Expense,
    Income,
    Category,
    Budget,
    Wallet,
    Transactions,
    Summary,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Expense => "expense",
            QueryType::Income => "income",
            QueryType::Category => "category",
            QueryType::Budget => "budget",
            QueryType::Wallet => "wallet",
            QueryType::Transactions => "transactions",
            QueryType::Summary => "summary",
        }
    }
}

impl FromStr for QueryType {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(QueryType::Expense),
            "income" => Ok(QueryType::Income),
            "category" => Ok(QueryType::Category),
            "budget" => Ok(QueryType::Budget),
            "wallet" => Ok(QueryType::Wallet),
            "transactions" => Ok(QueryType::Transactions),
            "summary" => Ok(QueryType::Summary),
            other => Err(ChatError::UnknownQueryType(other.to_string())),
        }
    }
}

/// Raw rows returned for callers that format answers themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRows {
    pub query_type: QueryType,
    pub rows: Vec<Value>,
    pub row_count: usize,
    pub metadata: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::IncomeVsExpense).unwrap();
        assert_eq!(json, "\"income_vs_expense\"");
        assert_eq!(Intent::RecentTransactions.to_string(), "recent_transactions");
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("vi"), Some(Locale::Vi));
        assert_eq!(Locale::from_tag("EN"), Some(Locale::En));
        assert_eq!(Locale::from_tag("en-US"), Some(Locale::En));
        assert_eq!(Locale::from_tag("vi_VN"), Some(Locale::Vi));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::from_tag(""), None);
        assert_eq!(Locale::default(), Locale::Vi);
    }

    #[test]
    fn test_query_type_parse() {
        for name in [
            "expense",
            "income",
            "category",
            "budget",
            "wallet",
            "transactions",
            "summary",
        ] {
            let parsed: QueryType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
        }
        assert!(matches!(
            "users".parse::<QueryType>(),
            Err(ChatError::UnknownQueryType(_))
        ));
    }

    #[test]
    fn test_time_context_serialization() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let ctx = TimeContext::current(today);
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["time_type"], "this_month");
        assert_eq!(json["specified"], false);
        assert!(json.get("date").is_none());

        let with_day = TimeContext {
            day: Some(today),
            time_type: TimeType::Today,
            specified: true,
            ..ctx
        };
        let json = serde_json::to_value(&with_day).unwrap();
        assert_eq!(json["date"], "2024-03-15");
    }
}
