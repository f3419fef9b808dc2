//! The allowlist of precomputed views the chatbot may read.
//!
//! Every chatbot query names exactly one of these views. Any other relation
//! name is rejected before a statement is prepared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use fintrack_core::error::FintrackError;

/// A precomputed aggregate view the chatbot is permitted to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowedView {
    #[serde(rename = "v_income_vs_expense")]
    IncomeVsExpense,
    #[serde(rename = "v_monthly_summary")]
    MonthlySummary,
    #[serde(rename = "v_category_breakdown")]
    CategoryBreakdown,
    #[serde(rename = "v_budget_vs_actual")]
    BudgetVsActual,
    #[serde(rename = "v_wallet_balance")]
    WalletBalance,
    #[serde(rename = "v_recent_transactions")]
    RecentTransactions,
    #[serde(rename = "v_daily_summary")]
    DailySummary,
}

impl AllowedView {
    /// Every allowlisted view, in declaration order.
    pub const ALL: [AllowedView; 7] = [
        AllowedView::IncomeVsExpense,
        AllowedView::MonthlySummary,
        AllowedView::CategoryBreakdown,
        AllowedView::BudgetVsActual,
        AllowedView::WalletBalance,
        AllowedView::RecentTransactions,
        AllowedView::DailySummary,
    ];

    /// The relation name in the database.
    pub fn name(&self) -> &'static str {
        match self {
            AllowedView::IncomeVsExpense => "v_income_vs_expense",
            AllowedView::MonthlySummary => "v_monthly_summary",
            AllowedView::CategoryBreakdown => "v_category_breakdown",
            AllowedView::BudgetVsActual => "v_budget_vs_actual",
            AllowedView::WalletBalance => "v_wallet_balance",
            AllowedView::RecentTransactions => "v_recent_transactions",
            AllowedView::DailySummary => "v_daily_summary",
        }
    }

    /// All allowlisted relation names.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.name()).collect()
    }
}

impl fmt::Display for AllowedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AllowedView {
    type Err = FintrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| FintrackError::ViewNotAllowed(s.to_string()))
    }
}

/// Check a relation name against the allowlist.
pub fn ensure_allowed(name: &str) -> Result<AllowedView, FintrackError> {
    name.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_seven_views() {
        assert_eq!(AllowedView::ALL.len(), 7);
        assert_eq!(
            AllowedView::names(),
            vec![
                "v_income_vs_expense",
                "v_monthly_summary",
                "v_category_breakdown",
                "v_budget_vs_actual",
                "v_wallet_balance",
                "v_recent_transactions",
                "v_daily_summary",
            ]
        );
    }

    #[test]
    fn test_parse_every_allowed_name() {
        for view in AllowedView::ALL {
            assert_eq!(ensure_allowed(view.name()).unwrap(), view);
        }
    }

    #[test]
    fn test_reject_base_tables_and_injection() {
        for name in [
            "transactions",
            "users",
            "V_INCOME_VS_EXPENSE",
            "v_income_vs_expense; DROP TABLE users",
            "",
        ] {
            let err = ensure_allowed(name).unwrap_err();
            assert!(matches!(err, FintrackError::ViewNotAllowed(_)), "{name}");
        }
    }

    #[test]
    fn test_serde_uses_relation_name() {
        let json = serde_json::to_string(&AllowedView::WalletBalance).unwrap();
        assert_eq!(json, "\"v_wallet_balance\"");
    }
}
