//! Read-only access to the precomputed aggregate views.
//!
//! `AggregateStore` is the only way the chatbot reaches persisted data. Each
//! method reads exactly one allowlisted view with a static statement and
//! positional parameters, and every statement filters by `user_id`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fintrack_core::error::FintrackError;

use crate::db::Database;
use crate::views::AllowedView;

// =============================================================================
// Row types
// =============================================================================

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = FintrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(FintrackError::Storage(format!(
                "Unknown transaction type: {}",
                other
            ))),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: FintrackError| FromSqlError::Other(Box::new(e)))
    }
}

/// Budget health derived by `v_budget_vs_actual`.
///
/// Spent at or above the budget is `Exceeded`, at or above 80% is `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Exceeded,
    Warning,
    Safe,
}

impl FromSql for BudgetStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "exceeded" => Ok(BudgetStatus::Exceeded),
            "warning" => Ok(BudgetStatus::Warning),
            "safe" => Ok(BudgetStatus::Safe),
            other => Err(FromSqlError::Other(
                format!("Unknown budget status: {}", other).into(),
            )),
        }
    }
}

/// One month of income against expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpenseRow {
    pub year: i32,
    pub month: u32,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
    /// Expense as a percentage of income; 0 when there is no income.
    pub expense_ratio: f64,
}

impl IncomeExpenseRow {
    /// The zeroed row reported for a month without transactions.
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            total_income: 0.0,
            total_expense: 0.0,
            net_savings: 0.0,
            expense_ratio: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryRow {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub transaction_count: i64,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub max_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category_name: String,
    pub category_icon: String,
    pub total_amount: f64,
    pub transaction_count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    pub category_name: String,
    pub budget_amount: f64,
    pub actual_spent: f64,
    pub remaining: f64,
    pub usage_percentage: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletRow {
    pub wallet_name: String,
    pub currency: String,
    pub current_balance: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransactionRow {
    pub transaction_id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    pub category_name: String,
    pub wallet_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummaryRow {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub transaction_count: i64,
    pub total_amount: f64,
}

// =============================================================================
// Store trait
// =============================================================================

/// Read access to the aggregate views, always scoped to one user.
pub trait AggregateStore: Send + Sync {
    /// `v_income_vs_expense` for one month. `None` when the month has no rows.
    fn income_vs_expense(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Option<IncomeExpenseRow>, FintrackError>;

    /// `v_monthly_summary` for one month, one row per transaction kind.
    fn monthly_summary(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthlySummaryRow>, FintrackError>;

    /// `v_category_breakdown` for one month and kind, largest total first.
    fn category_breakdown(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
        kind: TransactionKind,
        limit: u32,
    ) -> Result<Vec<CategoryRow>, FintrackError>;

    /// `v_budget_vs_actual` for one month, highest usage first.
    fn budget_status(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<BudgetRow>, FintrackError>;

    /// `v_wallet_balance` for active wallets, largest balance first.
    fn wallet_balances(&self, user_id: i64) -> Result<Vec<WalletRow>, FintrackError>;

    /// `v_recent_transactions`, newest first.
    fn recent_transactions(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<RecentTransactionRow>, FintrackError>;

    /// `v_income_vs_expense` for the newest `months` months, newest first.
    fn monthly_trend(
        &self,
        user_id: i64,
        months: u32,
    ) -> Result<Vec<IncomeExpenseRow>, FintrackError>;

    /// `v_daily_summary` for a single calendar day.
    fn daily_summary(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<DailySummaryRow>, FintrackError>;
}

// =============================================================================
// SQLite implementation
// =============================================================================

const INCOME_VS_EXPENSE_SQL: &str = "
    SELECT year, month, total_income, total_expense, net_savings,
           COALESCE(expense_ratio, 0)
    FROM v_income_vs_expense
    WHERE user_id = ?1 AND year = ?2 AND month = ?3";

const MONTHLY_SUMMARY_SQL: &str = "
    SELECT type, transaction_count, total_amount, avg_amount, max_amount
    FROM v_monthly_summary
    WHERE user_id = ?1 AND year = ?2 AND month = ?3
    ORDER BY type";

const CATEGORY_BREAKDOWN_SQL: &str = "
    SELECT category_name, category_icon, total_amount, transaction_count,
           COALESCE(percentage, 0)
    FROM v_category_breakdown
    WHERE user_id = ?1 AND year = ?2 AND month = ?3 AND type = ?4
    ORDER BY total_amount DESC, category_name
    LIMIT ?5";

const BUDGET_STATUS_SQL: &str = "
    SELECT category_name, budget_amount, actual_spent, remaining,
           COALESCE(usage_percentage, 0), status
    FROM v_budget_vs_actual
    WHERE user_id = ?1 AND year = ?2 AND month = ?3
    ORDER BY usage_percentage DESC, category_name";

const WALLET_BALANCE_SQL: &str = "
    SELECT wallet_name, currency, current_balance, total_income, total_expense,
           transaction_count
    FROM v_wallet_balance
    WHERE user_id = ?1
    ORDER BY current_balance DESC, wallet_name";

const RECENT_TRANSACTIONS_SQL: &str = "
    SELECT transaction_id, type, amount, description, transaction_date,
           category_name, wallet_name
    FROM v_recent_transactions
    WHERE user_id = ?1
    ORDER BY transaction_date DESC, created_at DESC, transaction_id DESC
    LIMIT ?2";

const MONTHLY_TREND_SQL: &str = "
    SELECT year, month, total_income, total_expense, net_savings,
           COALESCE(expense_ratio, 0)
    FROM v_income_vs_expense
    WHERE user_id = ?1
    ORDER BY year DESC, month DESC
    LIMIT ?2";

const DAILY_SUMMARY_SQL: &str = "
    SELECT type, transaction_count, total_amount
    FROM v_daily_summary
    WHERE user_id = ?1 AND transaction_date = ?2
    ORDER BY type";

/// `AggregateStore` over the SQLite views created by the migrations.
pub struct SqliteAggregateStore {
    db: Arc<Database>,
}

impl SqliteAggregateStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn query<T, P, F>(
        &self,
        view: AllowedView,
        sql: &str,
        params: P,
        map: F,
    ) -> Result<Vec<T>, FintrackError>
    where
        P: rusqlite::Params,
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(view = %view, "Reading aggregate view");
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare_cached(sql)
                .map_err(|e| FintrackError::Storage(format!("{} prepare: {}", view, e)))?;

            let rows = stmt
                .query_map(params, map)
                .map_err(|e| FintrackError::Storage(format!("{} query: {}", view, e)))?;

            let mut results = Vec::new();
            for row in rows {
                results.push(row.map_err(|e| FintrackError::Storage(e.to_string()))?);
            }
            Ok(results)
        })
    }
}

impl AggregateStore for SqliteAggregateStore {
    fn income_vs_expense(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Option<IncomeExpenseRow>, FintrackError> {
        let rows = self.query(
            AllowedView::IncomeVsExpense,
            INCOME_VS_EXPENSE_SQL,
            rusqlite::params![user_id, year, month],
            map_income_expense,
        )?;
        Ok(rows.into_iter().next())
    }

    fn monthly_summary(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<MonthlySummaryRow>, FintrackError> {
        self.query(
            AllowedView::MonthlySummary,
            MONTHLY_SUMMARY_SQL,
            rusqlite::params![user_id, year, month],
            |row| {
                Ok(MonthlySummaryRow {
                    kind: row.get(0)?,
                    transaction_count: row.get(1)?,
                    total_amount: row.get(2)?,
                    avg_amount: row.get(3)?,
                    max_amount: row.get(4)?,
                })
            },
        )
    }

    fn category_breakdown(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
        kind: TransactionKind,
        limit: u32,
    ) -> Result<Vec<CategoryRow>, FintrackError> {
        self.query(
            AllowedView::CategoryBreakdown,
            CATEGORY_BREAKDOWN_SQL,
            rusqlite::params![user_id, year, month, kind, limit],
            |row| {
                Ok(CategoryRow {
                    category_name: row.get(0)?,
                    category_icon: row.get(1)?,
                    total_amount: row.get(2)?,
                    transaction_count: row.get(3)?,
                    percentage: row.get(4)?,
                })
            },
        )
    }

    fn budget_status(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<BudgetRow>, FintrackError> {
        self.query(
            AllowedView::BudgetVsActual,
            BUDGET_STATUS_SQL,
            rusqlite::params![user_id, year, month],
            |row| {
                Ok(BudgetRow {
                    category_name: row.get(0)?,
                    budget_amount: row.get(1)?,
                    actual_spent: row.get(2)?,
                    remaining: row.get(3)?,
                    usage_percentage: row.get(4)?,
                    status: row.get(5)?,
                })
            },
        )
    }

    fn wallet_balances(&self, user_id: i64) -> Result<Vec<WalletRow>, FintrackError> {
        self.query(
            AllowedView::WalletBalance,
            WALLET_BALANCE_SQL,
            rusqlite::params![user_id],
            |row| {
                Ok(WalletRow {
                    wallet_name: row.get(0)?,
                    currency: row.get(1)?,
                    current_balance: row.get(2)?,
                    total_income: row.get(3)?,
                    total_expense: row.get(4)?,
                    transaction_count: row.get(5)?,
                })
            },
        )
    }

    fn recent_transactions(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<RecentTransactionRow>, FintrackError> {
        self.query(
            AllowedView::RecentTransactions,
            RECENT_TRANSACTIONS_SQL,
            rusqlite::params![user_id, limit],
            |row| {
                let date: String = row.get(4)?;
                Ok(RecentTransactionRow {
                    transaction_id: row.get(0)?,
                    kind: row.get(1)?,
                    amount: row.get(2)?,
                    description: row.get(3)?,
                    transaction_date: parse_date(4, &date)?,
                    category_name: row.get(5)?,
                    wallet_name: row.get(6)?,
                })
            },
        )
    }

    fn monthly_trend(
        &self,
        user_id: i64,
        months: u32,
    ) -> Result<Vec<IncomeExpenseRow>, FintrackError> {
        self.query(
            AllowedView::IncomeVsExpense,
            MONTHLY_TREND_SQL,
            rusqlite::params![user_id, months],
            map_income_expense,
        )
    }

    fn daily_summary(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<DailySummaryRow>, FintrackError> {
        self.query(
            AllowedView::DailySummary,
            DAILY_SUMMARY_SQL,
            rusqlite::params![user_id, format_date(date)],
            |row| {
                Ok(DailySummaryRow {
                    kind: row.get(0)?,
                    transaction_count: row.get(1)?,
                    total_amount: row.get(2)?,
                })
            },
        )
    }
}

fn map_income_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<IncomeExpenseRow> {
    Ok(IncomeExpenseRow {
        year: row.get(0)?,
        month: row.get(1)?,
        total_income: row.get(2)?,
        total_expense: row.get(3)?,
        net_savings: row.get(4)?,
        expense_ratio: row.get(5)?,
    })
}

/// Calendar dates are stored as `YYYY-MM-DD` text.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(idx: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Ledger, NewTransaction};

    struct Fixture {
        store: SqliteAggregateStore,
        ledger: Ledger,
        user: i64,
        wallet: i64,
        food: i64,
        rent: i64,
        salary: i64,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Fixture {
        let db = Arc::new(Database::in_memory().unwrap());
        let ledger = Ledger::new(db.clone());
        let user = ledger.create_user("an@example.com", Some("An")).unwrap();
        let wallet = ledger.create_wallet(user, "Cash", "VND", 0.0).unwrap();
        let food = ledger
            .create_category(None, "Ăn uống", TransactionKind::Expense, "🍜")
            .unwrap();
        let rent = ledger
            .create_category(None, "Nhà ở", TransactionKind::Expense, "🏠")
            .unwrap();
        let salary = ledger
            .create_category(None, "Lương", TransactionKind::Income, "💰")
            .unwrap();
        Fixture {
            store: SqliteAggregateStore::new(db),
            ledger,
            user,
            wallet,
            food,
            rent,
            salary,
        }
    }

    impl Fixture {
        fn record(&self, category: i64, kind: TransactionKind, amount: f64, on: NaiveDate) {
            self.ledger
                .record_transaction(&NewTransaction {
                    user_id: self.user,
                    wallet_id: self.wallet,
                    category_id: category,
                    kind,
                    amount,
                    description: None,
                    date: on,
                })
                .unwrap();
        }
    }

    #[test]
    fn test_income_vs_expense_month() {
        let f = fixture();
        f.record(f.salary, TransactionKind::Income, 20_000_000.0, date(2024, 3, 1));
        f.record(f.food, TransactionKind::Expense, 3_000_000.0, date(2024, 3, 5));
        f.record(f.rent, TransactionKind::Expense, 5_000_000.0, date(2024, 3, 6));
        f.record(f.food, TransactionKind::Expense, 999.0, date(2024, 4, 1));

        let row = f.store.income_vs_expense(f.user, 2024, 3).unwrap().unwrap();
        assert_eq!(row.total_income, 20_000_000.0);
        assert_eq!(row.total_expense, 8_000_000.0);
        assert_eq!(row.net_savings, 12_000_000.0);
        assert_eq!(row.expense_ratio, 40.0);
    }

    #[test]
    fn test_income_vs_expense_missing_month() {
        let f = fixture();
        assert!(f.store.income_vs_expense(f.user, 2024, 3).unwrap().is_none());
    }

    #[test]
    fn test_expense_ratio_zero_without_income() {
        let f = fixture();
        f.record(f.food, TransactionKind::Expense, 100.0, date(2024, 3, 5));
        let row = f.store.income_vs_expense(f.user, 2024, 3).unwrap().unwrap();
        assert_eq!(row.expense_ratio, 0.0);
        assert_eq!(row.net_savings, -100.0);
    }

    #[test]
    fn test_category_breakdown_orders_and_limits() {
        let f = fixture();
        f.record(f.food, TransactionKind::Expense, 1_000.0, date(2024, 3, 5));
        f.record(f.food, TransactionKind::Expense, 500.0, date(2024, 3, 6));
        f.record(f.rent, TransactionKind::Expense, 2_500.0, date(2024, 3, 7));
        f.record(f.salary, TransactionKind::Income, 9_000.0, date(2024, 3, 1));

        let rows = f
            .store
            .category_breakdown(f.user, 2024, 3, TransactionKind::Expense, 10)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category_name, "Nhà ở");
        assert_eq!(rows[0].percentage, 62.5);
        assert_eq!(rows[1].transaction_count, 2);
        assert_eq!(rows[1].percentage, 37.5);

        let limited = f
            .store
            .category_breakdown(f.user, 2024, 3, TransactionKind::Expense, 1)
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_budget_status_thresholds() {
        let f = fixture();
        let shopping = f
            .ledger
            .create_category(None, "Mua sắm", TransactionKind::Expense, "🛍️")
            .unwrap();
        f.ledger.create_budget(f.user, f.food, 1_000.0, 2024, 3).unwrap();
        f.ledger.create_budget(f.user, f.rent, 1_000.0, 2024, 3).unwrap();
        f.ledger.create_budget(f.user, shopping, 1_000.0, 2024, 3).unwrap();
        f.record(f.food, TransactionKind::Expense, 1_000.0, date(2024, 3, 2));
        f.record(f.rent, TransactionKind::Expense, 800.0, date(2024, 3, 2));
        f.record(shopping, TransactionKind::Expense, 799.0, date(2024, 3, 2));

        let rows = f.store.budget_status(f.user, 2024, 3).unwrap();
        let statuses: Vec<_> = rows.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![BudgetStatus::Exceeded, BudgetStatus::Warning, BudgetStatus::Safe]
        );
        assert_eq!(rows[0].usage_percentage, 100.0);
        assert_eq!(rows[1].remaining, 200.0);
    }

    #[test]
    fn test_budget_without_spending_is_safe() {
        let f = fixture();
        f.ledger.create_budget(f.user, f.food, 500.0, 2024, 3).unwrap();
        let rows = f.store.budget_status(f.user, 2024, 3).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].actual_spent, 0.0);
        assert_eq!(rows[0].status, BudgetStatus::Safe);
    }

    #[test]
    fn test_wallet_balances_skip_inactive() {
        let f = fixture();
        f.ledger
            .create_wallet(f.user, "Savings", "USD", 1_500.0)
            .unwrap();
        let old = f.ledger.create_wallet(f.user, "Old", "VND", 10.0).unwrap();
        f.ledger.deactivate_wallet(old).unwrap();
        f.record(f.salary, TransactionKind::Income, 100.0, date(2024, 3, 1));

        let rows = f.store.wallet_balances(f.user).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].wallet_name, "Savings");
        assert_eq!(rows[0].currency, "USD");
        assert_eq!(rows[1].current_balance, 100.0);
        assert_eq!(rows[1].transaction_count, 1);
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let f = fixture();
        f.record(f.food, TransactionKind::Expense, 1.0, date(2024, 3, 1));
        f.record(f.food, TransactionKind::Expense, 2.0, date(2024, 3, 3));
        f.record(f.food, TransactionKind::Expense, 3.0, date(2024, 3, 2));
        f.record(f.food, TransactionKind::Expense, 4.0, date(2024, 3, 3));

        let rows = f.store.recent_transactions(f.user, 3).unwrap();
        let amounts: Vec<f64> = rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![4.0, 2.0, 3.0]);
        assert_eq!(rows[0].transaction_date, date(2024, 3, 3));
        assert_eq!(rows[0].wallet_name, "Cash");
    }

    #[test]
    fn test_monthly_trend_newest_first() {
        let f = fixture();
        for m in 1..=8 {
            f.record(f.food, TransactionKind::Expense, m as f64, date(2024, m, 10));
        }
        let rows = f.store.monthly_trend(f.user, 6).unwrap();
        let months: Vec<u32> = rows.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![8, 7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_daily_and_monthly_summary() {
        let f = fixture();
        let day = date(2024, 3, 15);
        f.record(f.food, TransactionKind::Expense, 50.0, day);
        f.record(f.food, TransactionKind::Expense, 150.0, day);
        f.record(f.salary, TransactionKind::Income, 1_000.0, day);
        f.record(f.food, TransactionKind::Expense, 7.0, date(2024, 3, 16));

        let daily = f.store.daily_summary(f.user, day).unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].kind, TransactionKind::Expense);
        assert_eq!(daily[0].total_amount, 200.0);
        assert_eq!(daily[1].kind, TransactionKind::Income);

        let monthly = f.store.monthly_summary(f.user, 2024, 3).unwrap();
        assert_eq!(monthly[0].transaction_count, 3);
        assert_eq!(monthly[0].max_amount, 150.0);
        assert_eq!(monthly[0].avg_amount, 69.0);
    }

    #[test]
    fn test_rows_never_cross_users() {
        let f = fixture();
        let other = f.ledger.create_user("binh@example.com", None).unwrap();
        let other_wallet = f.ledger.create_wallet(other, "Other", "VND", 0.0).unwrap();
        f.ledger
            .record_transaction(&NewTransaction {
                user_id: other,
                wallet_id: other_wallet,
                category_id: f.food,
                kind: TransactionKind::Expense,
                amount: 42.0,
                description: Some("someone else".to_string()),
                date: date(2024, 3, 1),
            })
            .unwrap();
        f.ledger.create_budget(other, f.food, 10.0, 2024, 3).unwrap();

        assert!(f.store.income_vs_expense(f.user, 2024, 3).unwrap().is_none());
        assert!(f.store.recent_transactions(f.user, 10).unwrap().is_empty());
        assert!(f.store.budget_status(f.user, 2024, 3).unwrap().is_empty());
        assert!(f.store.monthly_trend(f.user, 6).unwrap().is_empty());
        assert!(f
            .store
            .category_breakdown(f.user, 2024, 3, TransactionKind::Expense, 10)
            .unwrap()
            .is_empty());
        let wallets = f.store.wallet_balances(f.user).unwrap();
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].wallet_name, "Cash");
    }

    #[test]
    fn test_row_serialization_uses_type_key() {
        let row = DailySummaryRow {
            kind: TransactionKind::Income,
            transaction_count: 1,
            total_amount: 5.0,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "income");
    }
}
