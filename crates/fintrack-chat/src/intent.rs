//! Rule-based intent classification.
//!
//! Questions are matched against an ordered table of Vietnamese and English
//! patterns. The first intent with a matching pattern wins, so overlapping
//! phrasings resolve by table order.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::Intent;

/// Confidence reported for any pattern match.
pub const MATCH_CONFIDENCE: f32 = 0.9;

// =============================================================================
// Compiled pattern table (compiled once, reused across calls)
// =============================================================================

const PATTERNS: &[(Intent, &[&str])] = &[
    (
        Intent::TotalExpense,
        &[
            r"tổng\s*(chi\s*tiêu|chi)",
            r"chi\s*tiêu\s*tổng",
            r"total\s*expense",
            r"spending\s*total",
            r"bao\s*nhiêu\s*tiền\s*(đã\s*)?chi",
            r"đã\s*chi\s*bao\s*nhiêu",
        ],
    ),
    (
        Intent::TotalIncome,
        &[
            r"tổng\s*(thu\s*nhập|thu)",
            r"thu\s*nhập\s*tổng",
            r"total\s*income",
            r"earnings?\s*total",
            r"bao\s*nhiêu\s*tiền\s*(đã\s*)?(nhận|thu)",
            r"đã\s*(nhận|thu)\s*bao\s*nhiêu",
        ],
    ),
    (
        Intent::CategoryBreakdown,
        &[
            r"chi\s*tiêu\s*(theo|từng)\s*danh\s*mục",
            r"danh\s*mục\s*chi\s*tiêu",
            r"(spending|expense)\s*by\s*category",
            r"category\s*(breakdown|summary)",
            r"tiền\s*(đi\s*đâu|vào\s*đâu)",
            r"chi\s*nhiều\s*nhất\s*(vào\s*)?đâu",
        ],
    ),
    (
        Intent::MonthlyTrend,
        &[
            r"xu\s*hướng\s*(hàng\s*)?tháng",
            r"so\s*sánh\s*(các\s*)?tháng",
            r"monthly\s*trend",
            r"trend\s*analysis",
            r"biến\s*động\s*(theo\s*)?tháng",
            r"tháng\s*này\s*so\s*(với\s*)?tháng\s*trước",
        ],
    ),
    (
        Intent::BudgetStatus,
        &[
            r"ngân\s*sách",
            r"budget",
            r"vượt\s*(ngân\s*sách|chi)",
            r"over\s*budget",
            r"còn\s*bao\s*nhiêu\s*(ngân\s*sách)?",
            r"hết\s*ngân\s*sách\s*chưa",
        ],
    ),
    (
        Intent::RecentTransactions,
        &[
            r"giao\s*dịch\s*(gần\s*đây|mới)",
            r"recent\s*transactions?",
            r"latest\s*transactions?",
            r"(các\s*)?khoản\s*chi\s*(gần\s*đây|mới)",
            r"chi\s*gì\s*gần\s*đây",
        ],
    ),
    (
        Intent::WalletBalance,
        &[
            r"số\s*dư(\s*ví)?",
            r"balance",
            r"wallet",
            r"còn\s*bao\s*nhiêu\s*tiền",
            r"tiền\s*trong\s*ví",
            r"ví\s*còn\s*bao\s*nhiêu",
        ],
    ),
    (
        Intent::IncomeVsExpense,
        &[
            r"thu\s*chi",
            r"income\s*(vs|versus|and)\s*expense",
            r"so\s*sánh\s*thu\s*chi",
            r"cân\s*đối\s*thu\s*chi",
            r"tiết\s*kiệm\s*(được\s*)?bao\s*nhiêu",
            r"savings?",
        ],
    ),
    (
        Intent::DailySummary,
        &[
            r"(chi\s*tiêu\s*)?hôm\s*nay",
            r"today('?s)?\s*(spending|expense)",
            r"daily\s*summary",
            r"ngày\s*hôm\s*nay",
        ],
    ),
];

static INTENT_TABLE: LazyLock<Vec<(Intent, Vec<Regex>)>> = LazyLock::new(|| {
    PATTERNS
        .iter()
        .map(|(intent, pats)| {
            let compiled = pats
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).expect("Invalid intent regex"))
                .collect();
            (*intent, compiled)
        })
        .collect()
});

// =============================================================================
// IntentClassifier
// =============================================================================

/// Ordered first-match intent classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a question.
    ///
    /// Returns the first intent in table order with a matching pattern and
    /// [`MATCH_CONFIDENCE`], or `(Intent::Unknown, 0.0)`.
    pub fn classify(&self, text: &str) -> (Intent, f32) {
        let normalized = text.trim().to_lowercase();

        for (intent, patterns) in INTENT_TABLE.iter() {
            if let Some(re) = patterns.iter().find(|re| re.is_match(&normalized)) {
                debug!(intent = %intent, pattern = re.as_str(), "Classified question");
                return (*intent, MATCH_CONFIDENCE);
            }
        }

        debug!("No intent pattern matched");
        (Intent::Unknown, 0.0)
    }

    /// The intents in classification priority order.
    pub fn table() -> Vec<Intent> {
        PATTERNS.iter().map(|(intent, _)| *intent).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Intent {
        IntentClassifier::new().classify(text).0
    }

    #[test]
    fn test_declared_priority_order() {
        assert_eq!(
            IntentClassifier::table(),
            vec![
                Intent::TotalExpense,
                Intent::TotalIncome,
                Intent::CategoryBreakdown,
                Intent::MonthlyTrend,
                Intent::BudgetStatus,
                Intent::RecentTransactions,
                Intent::WalletBalance,
                Intent::IncomeVsExpense,
                Intent::DailySummary,
            ]
        );
    }

    #[test]
    fn test_vietnamese_phrases() {
        let cases = [
            ("Tổng chi tiêu tháng này là bao nhiêu?", Intent::TotalExpense),
            ("Tôi đã chi bao nhiêu?", Intent::TotalExpense),
            ("Tổng thu nhập năm nay", Intent::TotalIncome),
            ("Chi tiêu theo danh mục", Intent::CategoryBreakdown),
            ("Tiền đi đâu hết rồi?", Intent::CategoryBreakdown),
            ("Xu hướng hàng tháng", Intent::MonthlyTrend),
            ("Kiểm tra ngân sách tháng này", Intent::BudgetStatus),
            ("Có vượt ngân sách không?", Intent::BudgetStatus),
            ("Giao dịch gần đây", Intent::RecentTransactions),
            ("Số dư trong ví là bao nhiêu?", Intent::WalletBalance),
            ("Tiền trong ví", Intent::WalletBalance),
            ("So sánh thu chi tháng trước", Intent::IncomeVsExpense),
            ("Tôi tiết kiệm được bao nhiêu tháng này?", Intent::IncomeVsExpense),
            ("Chi tiêu hôm nay", Intent::DailySummary),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "{text}");
        }
    }

    #[test]
    fn test_english_phrases() {
        let cases = [
            ("What's my total expense this month?", Intent::TotalExpense),
            ("Show my total income this month", Intent::TotalIncome),
            ("Spending by category", Intent::CategoryBreakdown),
            ("Monthly trend please", Intent::MonthlyTrend),
            ("Check my budget status", Intent::BudgetStatus),
            ("Recent transactions", Intent::RecentTransactions),
            ("What's my wallet balance?", Intent::WalletBalance),
            ("Compare income and expense last month", Intent::IncomeVsExpense),
            ("My savings this month", Intent::IncomeVsExpense),
            ("Today's spending", Intent::DailySummary),
            ("daily summary", Intent::DailySummary),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "{text}");
        }
    }

    #[test]
    fn test_near_miss_phrasings_stay_unknown() {
        for text in [
            "Xu hướng chi tiêu hàng tháng",
            "Thu nhập tháng này của tôi?",
            "Show my income this month",
            "How much did I save this month?",
            "Monthly spending trend",
        ] {
            assert_eq!(classify(text), Intent::Unknown, "{text}");
        }
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        // Matches both budget_status ("ngân sách") and wallet_balance ("số dư").
        assert_eq!(classify("số dư ngân sách"), Intent::BudgetStatus);
        // "còn bao nhiêu tiền" is reached through budget_status first.
        assert_eq!(classify("Còn bao nhiêu tiền?"), Intent::BudgetStatus);
        // "over budget" also matches the earlier plain "budget" pattern.
        assert_eq!(classify("Am I over budget?"), Intent::BudgetStatus);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(classify("   TOTAL EXPENSE   "), Intent::TotalExpense);
        assert_eq!(classify("TỔNG CHI TIÊU"), Intent::TotalExpense);
        assert_eq!(classify("total\texpense"), Intent::TotalExpense);
    }

    #[test]
    fn test_unknown_has_zero_confidence() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("Hello there"), (Intent::Unknown, 0.0));
        assert_eq!(classifier.classify(""), (Intent::Unknown, 0.0));
        assert_eq!(classifier.classify("   \n"), (Intent::Unknown, 0.0));
    }

    #[test]
    fn test_match_confidence() {
        let (intent, confidence) = IntentClassifier::new().classify("wallet");
        assert_eq!(intent, Intent::WalletBalance);
        assert_eq!(confidence, MATCH_CONFIDENCE);
    }

    #[test]
    fn test_arbitrary_input_never_panics() {
        let classifier = IntentClassifier::new();
        for text in ["🚀🚀🚀", "\u{0}", "(((", "ﬀ İ ß", &"a".repeat(10_000)] {
            let _ = classifier.classify(text);
        }
    }
}
