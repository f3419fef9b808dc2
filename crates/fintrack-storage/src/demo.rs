//! Deterministic demo data set.
//!
//! Seeds one user with three wallets, a set of Vietnamese categories, six
//! months of salary and spending, and budgets for the current month. The
//! same `today` always yields the same rows.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::info;

use fintrack_core::error::FintrackError;

use crate::aggregates::TransactionKind;
use crate::ledger::{Ledger, LedgerWriter, NewTransaction};

/// Months of history the seed writes, including the current one.
const DEMO_MONTHS: u32 = 6;

/// Counts of what `seed_demo` wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoSummary {
    pub user_id: i64,
    pub wallets: usize,
    pub categories: usize,
    pub transactions: usize,
    pub budgets: usize,
}

struct DemoCategory {
    name: &'static str,
    kind: TransactionKind,
    icon: &'static str,
    /// (day of month, base amount, description) per month.
    entries: &'static [(u32, f64, &'static str)],
    /// Budget for the current month, if any.
    budget: Option<f64>,
}

const CATEGORIES: &[DemoCategory] = &[
    DemoCategory {
        name: "Lương",
        kind: TransactionKind::Income,
        icon: "💰",
        entries: &[(1, 25_000_000.0, "Lương tháng")],
        budget: None,
    },
    DemoCategory {
        name: "Thưởng",
        kind: TransactionKind::Income,
        icon: "🎁",
        entries: &[(20, 2_000_000.0, "Thưởng dự án")],
        budget: None,
    },
    DemoCategory {
        name: "Ăn uống",
        kind: TransactionKind::Expense,
        icon: "🍜",
        entries: &[
            (2, 850_000.0, "Đi chợ"),
            (9, 1_200_000.0, "Ăn tối gia đình"),
            (16, 950_000.0, "Siêu thị"),
        ],
        budget: Some(4_000_000.0),
    },
    DemoCategory {
        name: "Nhà ở",
        kind: TransactionKind::Expense,
        icon: "🏠",
        entries: &[(5, 6_000_000.0, "Tiền nhà")],
        budget: Some(6_000_000.0),
    },
    DemoCategory {
        name: "Di chuyển",
        kind: TransactionKind::Expense,
        icon: "🚗",
        entries: &[(3, 300_000.0, "Xăng xe"), (17, 450_000.0, "Grab")],
        budget: Some(800_000.0),
    },
    DemoCategory {
        name: "Mua sắm",
        kind: TransactionKind::Expense,
        icon: "🛍️",
        entries: &[(12, 1_350_000.0, "Quần áo")],
        budget: Some(1_500_000.0),
    },
    DemoCategory {
        name: "Giải trí",
        kind: TransactionKind::Expense,
        icon: "🎬",
        entries: &[(14, 400_000.0, "Xem phim")],
        budget: Some(500_000.0),
    },
];

/// Populate demo data for the user with `email`, creating the user if needed.
///
/// Fails if the user already owns wallets, so a seed is never applied twice.
/// All writes share one SQLite transaction; a failed seed leaves no rows.
pub fn seed_demo(
    ledger: &Ledger,
    email: &str,
    today: NaiveDate,
) -> Result<DemoSummary, FintrackError> {
    let summary = ledger.in_transaction(|writer| seed_with(writer, email, today))?;
    info!(
        user_id = summary.user_id,
        transactions = summary.transactions,
        budgets = summary.budgets,
        "Seeded demo data"
    );
    Ok(summary)
}

fn seed_with(
    ledger: &LedgerWriter<'_>,
    email: &str,
    today: NaiveDate,
) -> Result<DemoSummary, FintrackError> {
    let user_id = match ledger.find_user(email)? {
        Some(id) => id,
        None => ledger.create_user(email, Some("Demo User"))?,
    };
    if ledger.wallet_count(user_id)? > 0 {
        return Err(FintrackError::Storage(format!(
            "Demo data already present for {}",
            email
        )));
    }

    let cash = ledger.create_wallet(user_id, "Tiền mặt", "VND", 2_000_000.0)?;
    let bank = ledger.create_wallet(user_id, "Vietcombank", "VND", 15_000_000.0)?;
    ledger.create_wallet(user_id, "Ví USD", "USD", 500.0)?;

    let mut summary = DemoSummary {
        user_id,
        wallets: 3,
        categories: 0,
        transactions: 0,
        budgets: 0,
    };

    for category in CATEGORIES {
        let category_id =
            ledger.create_category(Some(user_id), category.name, category.kind, category.icon)?;
        summary.categories += 1;

        let wallet = match category.kind {
            TransactionKind::Income => bank,
            TransactionKind::Expense => cash,
        };

        for back in 0..DEMO_MONTHS {
            let (year, month) = months_before(today.year(), today.month(), back);
            for &(day, base, description) in category.entries {
                let date = if back == 0 {
                    // Current month holds only days that have already happened.
                    if day > today.day() {
                        continue;
                    }
                    NaiveDate::from_ymd_opt(year, month, day)
                } else {
                    NaiveDate::from_ymd_opt(year, month, day.min(28))
                };
                let Some(date) = date else { continue };

                ledger.record_transaction(&NewTransaction {
                    user_id,
                    wallet_id: wallet,
                    category_id,
                    kind: category.kind,
                    amount: base + f64::from(back) * 50_000.0,
                    description: Some(description.to_string()),
                    date,
                })?;
                summary.transactions += 1;
            }
        }

        if let Some(amount) = category.budget {
            ledger.create_budget(user_id, category_id, amount, today.year(), today.month())?;
            summary.budgets += 1;
        }
    }

    Ok(summary)
}

/// The (year, month) that lies `back` months before the given one.
fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::{AggregateStore, SqliteAggregateStore};
    use crate::db::Database;
    use std::sync::Arc;

    fn setup() -> (Ledger, SqliteAggregateStore) {
        let db = Arc::new(Database::in_memory().unwrap());
        (Ledger::new(db.clone()), SqliteAggregateStore::new(db))
    }

    #[test]
    fn test_months_before_wraps_year() {
        assert_eq!(months_before(2024, 3, 0), (2024, 3));
        assert_eq!(months_before(2024, 3, 2), (2024, 1));
        assert_eq!(months_before(2024, 3, 3), (2023, 12));
        assert_eq!(months_before(2024, 1, 13), (2022, 12));
    }

    #[test]
    fn test_seed_end_of_month() {
        let (ledger, store) = setup();
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let summary = seed_demo(&ledger, "demo@fintrack.local", today).unwrap();

        assert_eq!(summary.wallets, 3);
        assert_eq!(summary.categories, CATEGORIES.len());
        assert_eq!(summary.budgets, 5);
        // 10 entries per month, six months.
        assert_eq!(summary.transactions, 60);

        let march = store
            .income_vs_expense(summary.user_id, 2024, 3)
            .unwrap()
            .unwrap();
        assert_eq!(march.total_income, 27_000_000.0);
        assert_eq!(march.total_expense, 11_500_000.0);

        let trend = store.monthly_trend(summary.user_id, 12).unwrap();
        assert_eq!(trend.len(), 6);
        assert_eq!((trend[5].year, trend[5].month), (2023, 10));
    }

    #[test]
    fn test_seed_skips_future_days() {
        let (ledger, store) = setup();
        let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let summary = seed_demo(&ledger, "demo@fintrack.local", today).unwrap();

        let recent = store.recent_transactions(summary.user_id, 100).unwrap();
        assert!(recent.iter().all(|t| t.transaction_date <= today));
        // Days 1, 2 and 3 of the current month.
        let current: Vec<_> = recent
            .iter()
            .filter(|t| t.transaction_date.month() == 3 && t.transaction_date.year() == 2024)
            .collect();
        assert_eq!(current.len(), 3);
    }

    #[test]
    fn test_failed_seed_leaves_nothing_behind() {
        let db = Arc::new(Database::in_memory().unwrap());
        let ledger = Ledger::new(db.clone());
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let set_trigger = |sql: &str| {
            db.with_conn(|conn| {
                conn.execute_batch(sql)
                    .map_err(|e| FintrackError::Storage(e.to_string()))
            })
            .unwrap()
        };

        // Budgets are written last, after wallets and transactions.
        set_trigger(
            "CREATE TRIGGER fail_budgets BEFORE INSERT ON budgets
             BEGIN SELECT RAISE(ABORT, 'budget insert failed'); END;",
        );
        assert!(seed_demo(&ledger, "demo@fintrack.local", today).is_err());
        assert_eq!(ledger.find_user("demo@fintrack.local").unwrap(), None);

        set_trigger("DROP TRIGGER fail_budgets;");
        let summary = seed_demo(&ledger, "demo@fintrack.local", today).unwrap();
        assert_eq!(summary.wallets, 3);
        assert_eq!(ledger.wallet_count(summary.user_id).unwrap(), 3);
    }

    #[test]
    fn test_seed_twice_fails() {
        let (ledger, _store) = setup();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        seed_demo(&ledger, "demo@fintrack.local", today).unwrap();
        assert!(seed_demo(&ledger, "demo@fintrack.local", today).is_err());
    }
}
