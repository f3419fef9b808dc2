//! Intent to aggregate-view dispatch.
//!
//! Each intent maps to exactly one allowlisted view and one fixed store read.
//! Empty results become zeroed totals or empty lists, never missing fields.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use fintrack_core::error::FintrackError;
use fintrack_storage::{
    AggregateStore, AllowedView, BudgetRow, BudgetStatus, CategoryRow, IncomeExpenseRow,
    RecentTransactionRow, TransactionKind, WalletRow,
};

use crate::error::ChatError;
use crate::types::{Intent, TimeContext};

/// Row limits applied by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchLimits {
    pub recent: u32,
    pub category: u32,
    pub trend_months: u32,
}

impl Default for DispatchLimits {
    fn default() -> Self {
        Self {
            recent: 10,
            category: 10,
            trend_months: 6,
        }
    }
}

/// One month of the trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendMonth {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
}

/// Income and expense totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
    pub income_count: i64,
    pub expense_count: i64,
}

/// Totals for one transaction kind within a month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KindTotals {
    pub total: f64,
    pub count: i64,
    pub avg: f64,
}

/// Income and expense statistics for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: KindTotals,
    pub expense: KindTotals,
}

/// The result of dispatching one intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    TotalExpense(IncomeExpenseRow),
    TotalIncome(IncomeExpenseRow),
    IncomeVsExpense(IncomeExpenseRow),
    CategoryBreakdown {
        year: i32,
        month: u32,
        categories: Vec<CategoryRow>,
    },
    BudgetStatus {
        year: i32,
        month: u32,
        budgets: Vec<BudgetRow>,
    },
    WalletBalance {
        wallets: Vec<WalletRow>,
    },
    RecentTransactions {
        transactions: Vec<RecentTransactionRow>,
    },
    MonthlyTrend {
        /// Oldest month first.
        months: Vec<TrendMonth>,
    },
    DailySummary(DailyTotals),
    Unknown,
}

impl Dispatched {
    /// The intent this result answers.
    pub fn intent(&self) -> Intent {
        match self {
            Dispatched::TotalExpense(_) => Intent::TotalExpense,
            Dispatched::TotalIncome(_) => Intent::TotalIncome,
            Dispatched::IncomeVsExpense(_) => Intent::IncomeVsExpense,
            Dispatched::CategoryBreakdown { .. } => Intent::CategoryBreakdown,
            Dispatched::BudgetStatus { .. } => Intent::BudgetStatus,
            Dispatched::WalletBalance { .. } => Intent::WalletBalance,
            Dispatched::RecentTransactions { .. } => Intent::RecentTransactions,
            Dispatched::MonthlyTrend { .. } => Intent::MonthlyTrend,
            Dispatched::DailySummary(_) => Intent::DailySummary,
            Dispatched::Unknown => Intent::Unknown,
        }
    }

    /// The allowlisted view that served this result.
    pub fn view(&self) -> Option<AllowedView> {
        match self {
            Dispatched::TotalExpense(_)
            | Dispatched::TotalIncome(_)
            | Dispatched::IncomeVsExpense(_)
            | Dispatched::MonthlyTrend { .. } => Some(AllowedView::IncomeVsExpense),
            Dispatched::CategoryBreakdown { .. } => Some(AllowedView::CategoryBreakdown),
            Dispatched::BudgetStatus { .. } => Some(AllowedView::BudgetVsActual),
            Dispatched::WalletBalance { .. } => Some(AllowedView::WalletBalance),
            Dispatched::RecentTransactions { .. } => Some(AllowedView::RecentTransactions),
            Dispatched::DailySummary(_) => Some(AllowedView::DailySummary),
            Dispatched::Unknown => None,
        }
    }

    /// Whether the result carries no rows.
    pub fn is_empty(&self) -> bool {
        match self {
            Dispatched::TotalExpense(row) => row.total_expense == 0.0,
            Dispatched::TotalIncome(row) => row.total_income == 0.0,
            Dispatched::IncomeVsExpense(row) => row.total_income == 0.0 && row.total_expense == 0.0,
            Dispatched::CategoryBreakdown { categories, .. } => categories.is_empty(),
            Dispatched::BudgetStatus { budgets, .. } => budgets.is_empty(),
            Dispatched::WalletBalance { wallets } => wallets.is_empty(),
            Dispatched::RecentTransactions { transactions } => transactions.is_empty(),
            Dispatched::MonthlyTrend { months } => months.is_empty(),
            Dispatched::DailySummary(day) => day.income == 0.0 && day.expense == 0.0,
            Dispatched::Unknown => true,
        }
    }

    /// The structured data payload. `None` only for unknown questions.
    pub fn data(&self) -> Option<Value> {
        let value = match self {
            Dispatched::TotalExpense(row)
            | Dispatched::TotalIncome(row)
            | Dispatched::IncomeVsExpense(row) => json!(row),
            Dispatched::CategoryBreakdown {
                year,
                month,
                categories,
            } => json!({ "categories": categories, "year": year, "month": month }),
            Dispatched::BudgetStatus {
                year,
                month,
                budgets,
            } => json!({
                "budgets": budgets,
                "exceeded_count": count_status(budgets, BudgetStatus::Exceeded),
                "warning_count": count_status(budgets, BudgetStatus::Warning),
                "year": year,
                "month": month,
            }),
            Dispatched::WalletBalance { wallets } => json!({
                "wallets": wallets,
                "total_balance": total_balance(wallets),
            }),
            Dispatched::RecentTransactions { transactions } => {
                json!({ "transactions": transactions })
            }
            Dispatched::MonthlyTrend { months } => json!({ "months": months }),
            Dispatched::DailySummary(day) => json!(day),
            Dispatched::Unknown => return None,
        };
        Some(value)
    }
}

pub(crate) fn count_status(budgets: &[BudgetRow], status: BudgetStatus) -> usize {
    budgets.iter().filter(|b| b.status == status).count()
}

/// Currency that month, day and wallet totals are expressed in.
pub(crate) const BASE_CURRENCY: &str = "VND";

/// Sum of balances across wallets held in the base currency.
pub(crate) fn total_balance(wallets: &[WalletRow]) -> f64 {
    wallets
        .iter()
        .filter(|w| w.currency == BASE_CURRENCY)
        .map(|w| w.current_balance)
        .sum()
}

/// Whether any wallet is held in a currency other than the base one.
pub(crate) fn has_foreign_wallets(wallets: &[WalletRow]) -> bool {
    wallets.iter().any(|w| w.currency != BASE_CURRENCY)
}

// =============================================================================
// QueryDispatcher
// =============================================================================

/// Runs the fixed store read for an intent.
pub struct QueryDispatcher {
    store: Arc<dyn AggregateStore>,
    limits: DispatchLimits,
}

impl QueryDispatcher {
    pub fn new(store: Arc<dyn AggregateStore>, limits: DispatchLimits) -> Self {
        Self { store, limits }
    }

    /// Read the data for `intent` scoped to `user_id`.
    ///
    /// `today` is the fallback day for the daily summary when the question
    /// names no day.
    pub fn dispatch(
        &self,
        user_id: i64,
        intent: Intent,
        ctx: &TimeContext,
        today: NaiveDate,
    ) -> Result<Dispatched, ChatError> {
        let (year, month) = (ctx.year, ctx.month);

        let dispatched = match intent {
            Intent::TotalExpense => Dispatched::TotalExpense(self.month_totals(user_id, year, month)?),
            Intent::TotalIncome => Dispatched::TotalIncome(self.month_totals(user_id, year, month)?),
            Intent::IncomeVsExpense => {
                Dispatched::IncomeVsExpense(self.month_totals(user_id, year, month)?)
            }
            Intent::CategoryBreakdown => Dispatched::CategoryBreakdown {
                year,
                month,
                categories: self.categories(user_id, year, month)?,
            },
            Intent::BudgetStatus => Dispatched::BudgetStatus {
                year,
                month,
                budgets: self.budgets(user_id, year, month)?,
            },
            Intent::WalletBalance => Dispatched::WalletBalance {
                wallets: self.wallets(user_id)?,
            },
            Intent::RecentTransactions => Dispatched::RecentTransactions {
                transactions: self.recent(user_id, self.limits.recent)?,
            },
            Intent::MonthlyTrend => Dispatched::MonthlyTrend {
                months: self.trend(user_id)?,
            },
            Intent::DailySummary => {
                Dispatched::DailySummary(self.daily(user_id, ctx.day.unwrap_or(today))?)
            }
            Intent::Unknown => Dispatched::Unknown,
        };

        debug!(
            user_id,
            intent = %intent,
            view = dispatched.view().map(|v| v.name()).unwrap_or("none"),
            empty = dispatched.is_empty(),
            "Dispatched query"
        );
        Ok(dispatched)
    }

    // -----------------------------------------------------------------
    // Fixed reads
    // -----------------------------------------------------------------

    /// Month totals, zeroed when the month has no transactions.
    pub fn month_totals(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<IncomeExpenseRow, ChatError> {
        let row = self
            .store
            .income_vs_expense(user_id, year, month)
            .map_err(|e| store_failure(AllowedView::IncomeVsExpense, e))?;
        Ok(row.unwrap_or_else(|| IncomeExpenseRow::empty(year, month)))
    }

    /// Expense categories for a month, largest first.
    pub fn categories(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<CategoryRow>, ChatError> {
        self.store
            .category_breakdown(
                user_id,
                year,
                month,
                TransactionKind::Expense,
                self.limits.category,
            )
            .map_err(|e| store_failure(AllowedView::CategoryBreakdown, e))
    }

    pub fn budgets(&self, user_id: i64, year: i32, month: u32) -> Result<Vec<BudgetRow>, ChatError> {
        self.store
            .budget_status(user_id, year, month)
            .map_err(|e| store_failure(AllowedView::BudgetVsActual, e))
    }

    pub fn wallets(&self, user_id: i64) -> Result<Vec<WalletRow>, ChatError> {
        self.store
            .wallet_balances(user_id)
            .map_err(|e| store_failure(AllowedView::WalletBalance, e))
    }

    pub fn recent(&self, user_id: i64, limit: u32) -> Result<Vec<RecentTransactionRow>, ChatError> {
        self.store
            .recent_transactions(user_id, limit)
            .map_err(|e| store_failure(AllowedView::RecentTransactions, e))
    }

    /// The newest months, reordered oldest first.
    pub fn trend(&self, user_id: i64) -> Result<Vec<TrendMonth>, ChatError> {
        let rows = self
            .store
            .monthly_trend(user_id, self.limits.trend_months)
            .map_err(|e| store_failure(AllowedView::IncomeVsExpense, e))?;

        Ok(rows
            .into_iter()
            .rev()
            .map(|r| TrendMonth {
                year: r.year,
                month: r.month,
                income: r.total_income,
                expense: r.total_expense,
                savings: r.net_savings,
            })
            .collect())
    }

    pub fn daily(&self, user_id: i64, date: NaiveDate) -> Result<DailyTotals, ChatError> {
        let rows = self
            .store
            .daily_summary(user_id, date)
            .map_err(|e| store_failure(AllowedView::DailySummary, e))?;

        let mut totals = DailyTotals {
            date,
            income: 0.0,
            expense: 0.0,
            income_count: 0,
            expense_count: 0,
        };
        for row in rows {
            match row.kind {
                TransactionKind::Income => {
                    totals.income = row.total_amount;
                    totals.income_count = row.transaction_count;
                }
                TransactionKind::Expense => {
                    totals.expense = row.total_amount;
                    totals.expense_count = row.transaction_count;
                }
            }
        }
        Ok(totals)
    }

    /// Income and expense statistics for a month, zeroed when empty.
    pub fn monthly_summary(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary, ChatError> {
        let rows = self
            .store
            .monthly_summary(user_id, year, month)
            .map_err(|e| store_failure(AllowedView::MonthlySummary, e))?;

        let mut summary = MonthlySummary {
            year,
            month,
            income: KindTotals::default(),
            expense: KindTotals::default(),
        };
        for row in rows {
            let totals = KindTotals {
                total: row.total_amount,
                count: row.transaction_count,
                avg: row.avg_amount,
            };
            match row.kind {
                TransactionKind::Income => summary.income = totals,
                TransactionKind::Expense => summary.expense = totals,
            }
        }
        Ok(summary)
    }
}

fn store_failure(view: AllowedView, err: FintrackError) -> ChatError {
    error!(view = %view, error = %err, "Aggregate read failed");
    ChatError::from(err)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use fintrack_storage::{
        DailySummaryRow, Database, Ledger, MonthlySummaryRow, NewTransaction,
        SqliteAggregateStore,
    };

    /// A store whose every read fails.
    pub(crate) struct FailingStore;

    impl AggregateStore for FailingStore {
        fn income_vs_expense(
            &self,
            _: i64,
            _: i32,
            _: u32,
        ) -> Result<Option<IncomeExpenseRow>, FintrackError> {
            Err(FintrackError::Storage("connection refused".to_string()))
        }
        fn monthly_summary(
            &self,
            _: i64,
            _: i32,
            _: u32,
        ) -> Result<Vec<MonthlySummaryRow>, FintrackError> {
            Err(FintrackError::Storage("connection refused".to_string()))
        }
        fn category_breakdown(
            &self,
            _: i64,
            _: i32,
            _: u32,
            _: TransactionKind,
            _: u32,
        ) -> Result<Vec<CategoryRow>, FintrackError> {
            Err(FintrackError::Storage("connection refused".to_string()))
        }
        fn budget_status(&self, _: i64, _: i32, _: u32) -> Result<Vec<BudgetRow>, FintrackError> {
            Err(FintrackError::Storage("connection refused".to_string()))
        }
        fn wallet_balances(&self, _: i64) -> Result<Vec<WalletRow>, FintrackError> {
            Err(FintrackError::Storage("connection refused".to_string()))
        }
        fn recent_transactions(
            &self,
            _: i64,
            _: u32,
        ) -> Result<Vec<RecentTransactionRow>, FintrackError> {
            Err(FintrackError::Storage("connection refused".to_string()))
        }
        fn monthly_trend(&self, _: i64, _: u32) -> Result<Vec<IncomeExpenseRow>, FintrackError> {
            Err(FintrackError::Storage("connection refused".to_string()))
        }
        fn daily_summary(
            &self,
            _: i64,
            _: NaiveDate,
        ) -> Result<Vec<DailySummaryRow>, FintrackError> {
            Err(FintrackError::Storage("connection refused".to_string()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn empty_dispatcher() -> QueryDispatcher {
        let db = Arc::new(Database::in_memory().unwrap());
        QueryDispatcher::new(
            Arc::new(SqliteAggregateStore::new(db)),
            DispatchLimits::default(),
        )
    }

    const ALL_INTENTS: [Intent; 10] = [
        Intent::TotalExpense,
        Intent::TotalIncome,
        Intent::CategoryBreakdown,
        Intent::MonthlyTrend,
        Intent::BudgetStatus,
        Intent::RecentTransactions,
        Intent::WalletBalance,
        Intent::IncomeVsExpense,
        Intent::DailySummary,
        Intent::Unknown,
    ];

    #[test]
    fn test_empty_store_yields_defined_structures() {
        let dispatcher = empty_dispatcher();
        let today = date(2024, 3, 15);
        let ctx = TimeContext::current(today);

        for intent in ALL_INTENTS {
            let result = dispatcher.dispatch(7, intent, &ctx, today).unwrap();
            assert_eq!(result.intent(), intent);
            assert!(result.is_empty(), "{intent}");

            let data = result.data();
            match intent {
                Intent::Unknown => assert!(data.is_none()),
                Intent::TotalExpense | Intent::TotalIncome | Intent::IncomeVsExpense => {
                    let data = data.unwrap();
                    for key in ["total_income", "total_expense", "net_savings", "expense_ratio"] {
                        assert_eq!(data[key].as_f64(), Some(0.0), "{intent} {key}");
                    }
                    assert_eq!(data["year"], 2024);
                    assert_eq!(data["month"], 3);
                }
                Intent::CategoryBreakdown => {
                    assert_eq!(data.unwrap()["categories"], json!([]));
                }
                Intent::BudgetStatus => {
                    let data = data.unwrap();
                    assert_eq!(data["budgets"], json!([]));
                    assert_eq!(data["exceeded_count"], 0);
                    assert_eq!(data["warning_count"], 0);
                }
                Intent::WalletBalance => {
                    let data = data.unwrap();
                    assert_eq!(data["wallets"], json!([]));
                    assert_eq!(data["total_balance"].as_f64(), Some(0.0));
                }
                Intent::RecentTransactions => {
                    assert_eq!(data.unwrap()["transactions"], json!([]));
                }
                Intent::MonthlyTrend => {
                    assert_eq!(data.unwrap()["months"], json!([]));
                }
                Intent::DailySummary => {
                    let data = data.unwrap();
                    assert_eq!(data["date"], "2024-03-15");
                    assert_eq!(data["income_count"], 0);
                    assert_eq!(data["expense_count"], 0);
                }
            }
        }
    }

    #[test]
    fn test_views_per_intent() {
        let dispatcher = empty_dispatcher();
        let today = date(2024, 3, 15);
        let ctx = TimeContext::current(today);
        let view = |intent| dispatcher.dispatch(1, intent, &ctx, today).unwrap().view();

        assert_eq!(view(Intent::TotalExpense), Some(AllowedView::IncomeVsExpense));
        assert_eq!(view(Intent::MonthlyTrend), Some(AllowedView::IncomeVsExpense));
        assert_eq!(view(Intent::CategoryBreakdown), Some(AllowedView::CategoryBreakdown));
        assert_eq!(view(Intent::BudgetStatus), Some(AllowedView::BudgetVsActual));
        assert_eq!(view(Intent::WalletBalance), Some(AllowedView::WalletBalance));
        assert_eq!(view(Intent::RecentTransactions), Some(AllowedView::RecentTransactions));
        assert_eq!(view(Intent::DailySummary), Some(AllowedView::DailySummary));
        assert_eq!(view(Intent::Unknown), None);
    }

    #[test]
    fn test_trend_is_oldest_first() {
        let db = Arc::new(Database::in_memory().unwrap());
        let ledger = Ledger::new(db.clone());
        let user = ledger.create_user("an@example.com", None).unwrap();
        let wallet = ledger.create_wallet(user, "Cash", "VND", 0.0).unwrap();
        let food = ledger
            .create_category(None, "Ăn uống", TransactionKind::Expense, "🍜")
            .unwrap();
        for m in 1..=8u32 {
            ledger
                .record_transaction(&NewTransaction {
                    user_id: user,
                    wallet_id: wallet,
                    category_id: food,
                    kind: TransactionKind::Expense,
                    amount: f64::from(m) * 100.0,
                    description: None,
                    date: date(2024, m, 5),
                })
                .unwrap();
        }

        let dispatcher = QueryDispatcher::new(
            Arc::new(SqliteAggregateStore::new(db)),
            DispatchLimits::default(),
        );
        let months = dispatcher.trend(user).unwrap();
        let order: Vec<u32> = months.iter().map(|m| m.month).collect();
        assert_eq!(order, vec![3, 4, 5, 6, 7, 8]);
        assert_eq!(months[0].expense, 300.0);
        assert_eq!(months[5].savings, -800.0);
    }

    #[test]
    fn test_total_balance_counts_base_currency_only() {
        let db = Arc::new(Database::in_memory().unwrap());
        let ledger = Ledger::new(db.clone());
        let user = ledger.create_user("binh@example.com", None).unwrap();
        ledger.create_wallet(user, "Tiền mặt", "VND", 2_000_000.0).unwrap();
        ledger.create_wallet(user, "Vietcombank", "VND", 15_000_000.0).unwrap();
        ledger.create_wallet(user, "Ví USD", "USD", 500.0).unwrap();

        let dispatcher = QueryDispatcher::new(
            Arc::new(SqliteAggregateStore::new(db)),
            DispatchLimits::default(),
        );
        let today = date(2024, 3, 15);
        let result = dispatcher
            .dispatch(user, Intent::WalletBalance, &TimeContext::current(today), today)
            .unwrap();
        let data = result.data().unwrap();
        assert_eq!(data["wallets"].as_array().unwrap().len(), 3);
        assert_eq!(data["total_balance"].as_f64(), Some(17_000_000.0));
    }

    #[test]
    fn test_daily_uses_context_day_before_today() {
        let dispatcher = empty_dispatcher();
        let today = date(2024, 3, 15);
        let ctx = TimeContext {
            day: Some(date(2024, 3, 1)),
            ..TimeContext::current(today)
        };
        match dispatcher.dispatch(1, Intent::DailySummary, &ctx, today).unwrap() {
            Dispatched::DailySummary(day) => assert_eq!(day.date, date(2024, 3, 1)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_store_failure_surfaces_as_store_error() {
        let dispatcher = QueryDispatcher::new(Arc::new(FailingStore), DispatchLimits::default());
        let today = date(2024, 3, 15);
        let ctx = TimeContext::current(today);

        for intent in ALL_INTENTS {
            let result = dispatcher.dispatch(1, intent, &ctx, today);
            if intent == Intent::Unknown {
                assert!(result.is_ok());
            } else {
                assert!(matches!(result, Err(ChatError::Store(_))), "{intent}");
            }
        }
        assert!(matches!(
            dispatcher.monthly_summary(1, 2024, 3),
            Err(ChatError::Store(_))
        ));
    }

    #[test]
    fn test_monthly_summary_zeroed_when_empty() {
        let dispatcher = empty_dispatcher();
        let summary = dispatcher.monthly_summary(1, 2024, 3).unwrap();
        assert_eq!(summary.income, KindTotals::default());
        assert_eq!(summary.expense.count, 0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["expense"]["total"].as_f64(), Some(0.0));
    }
}
