//! fintrack storage crate - SQLite persistence and precomputed aggregate views.
//!
//! Provides a WAL-mode SQLite database with migrations, the allowlisted
//! aggregate views the chatbot reads from, a minimal record writer for
//! wallets/categories/transactions/budgets, and a deterministic demo seed.

pub mod aggregates;
pub mod db;
pub mod demo;
pub mod ledger;
pub mod migrations;
pub mod views;

pub use aggregates::{
    AggregateStore, BudgetRow, BudgetStatus, CategoryRow, DailySummaryRow, IncomeExpenseRow,
    MonthlySummaryRow, RecentTransactionRow, SqliteAggregateStore, TransactionKind, WalletRow,
};
pub use db::Database;
pub use demo::{seed_demo, DemoSummary};
pub use ledger::{Ledger, LedgerWriter, NewTransaction};
pub use views::{ensure_allowed, AllowedView};
