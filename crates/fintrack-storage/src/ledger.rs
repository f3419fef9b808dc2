//! Minimal record writer for users, wallets, categories, transactions and
//! budgets.
//!
//! Used by the demo seed and tests to populate the tables the aggregate views
//! read from. Recording a transaction adjusts the wallet balance in the same
//! SQLite transaction as the insert.

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use fintrack_core::error::FintrackError;

use crate::aggregates::{format_date, TransactionKind};
use crate::db::Database;

/// A transaction to be recorded against a wallet.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: i64,
    pub wallet_id: i64,
    pub category_id: i64,
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Writer for the record tables.
pub struct Ledger {
    db: Arc<Database>,
}

impl Ledger {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Run `f` inside one SQLite transaction.
    ///
    /// Commits when `f` returns `Ok`; any error rolls back every write made
    /// through the writer.
    pub fn in_transaction<F, T>(&self, f: F) -> Result<T, FintrackError>
    where
        F: FnOnce(&LedgerWriter<'_>) -> Result<T, FintrackError>,
    {
        self.db.with_conn_mut(|conn| {
            let sql_tx = conn
                .transaction()
                .map_err(|e| FintrackError::Storage(format!("Failed to begin transaction: {}", e)))?;
            let value = f(&LedgerWriter { conn: &sql_tx })?;
            sql_tx
                .commit()
                .map_err(|e| FintrackError::Storage(format!("Failed to commit: {}", e)))?;
            Ok(value)
        })
    }

    pub fn create_user(&self, email: &str, full_name: Option<&str>) -> Result<i64, FintrackError> {
        self.db
            .with_conn(|conn| LedgerWriter { conn }.create_user(email, full_name))
    }

    /// Look up a user by email.
    pub fn find_user(&self, email: &str) -> Result<Option<i64>, FintrackError> {
        self.db.with_conn(|conn| LedgerWriter { conn }.find_user(email))
    }

    pub fn create_wallet(
        &self,
        user_id: i64,
        name: &str,
        currency: &str,
        opening_balance: f64,
    ) -> Result<i64, FintrackError> {
        self.db.with_conn(|conn| {
            LedgerWriter { conn }.create_wallet(user_id, name, currency, opening_balance)
        })
    }

    /// Number of wallets owned by a user, active or not.
    pub fn wallet_count(&self, user_id: i64) -> Result<i64, FintrackError> {
        self.db.with_conn(|conn| LedgerWriter { conn }.wallet_count(user_id))
    }

    /// Hide a wallet from balance reports without deleting its history.
    pub fn deactivate_wallet(&self, wallet_id: i64) -> Result<(), FintrackError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE wallets SET is_active = 0 WHERE id = ?1",
                rusqlite::params![wallet_id],
            )
            .map_err(|e| FintrackError::Storage(format!("Failed to deactivate wallet: {}", e)))?;
            Ok(())
        })
    }

    /// Create a category. `user_id = None` creates a system default shared by
    /// every user.
    pub fn create_category(
        &self,
        user_id: Option<i64>,
        name: &str,
        kind: TransactionKind,
        icon: &str,
    ) -> Result<i64, FintrackError> {
        self.db
            .with_conn(|conn| LedgerWriter { conn }.create_category(user_id, name, kind, icon))
    }

    /// Insert a transaction and apply it to the wallet balance atomically.
    ///
    /// The wallet must belong to the transaction's user.
    pub fn record_transaction(&self, tx: &NewTransaction) -> Result<i64, FintrackError> {
        self.in_transaction(|writer| writer.record_transaction(tx))
    }

    /// Set the budget for a category in one month.
    pub fn create_budget(
        &self,
        user_id: i64,
        category_id: i64,
        amount: f64,
        year: i32,
        month: u32,
    ) -> Result<i64, FintrackError> {
        self.db.with_conn(|conn| {
            LedgerWriter { conn }.create_budget(user_id, category_id, amount, year, month)
        })
    }
}

// =============================================================================
// LedgerWriter
// =============================================================================

/// Record writes against one connection, usually an open SQLite transaction
/// handed out by [`Ledger::in_transaction`].
pub struct LedgerWriter<'c> {
    conn: &'c Connection,
}

impl LedgerWriter<'_> {
    pub fn create_user(&self, email: &str, full_name: Option<&str>) -> Result<i64, FintrackError> {
        self.conn
            .execute(
                "INSERT INTO users (email, full_name) VALUES (?1, ?2)",
                rusqlite::params![email, full_name],
            )
            .map_err(|e| FintrackError::Storage(format!("Failed to create user: {}", e)))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn find_user(&self, email: &str) -> Result<Option<i64>, FintrackError> {
        self.conn
            .query_row(
                "SELECT id FROM users WHERE email = ?1",
                rusqlite::params![email],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| FintrackError::Storage(e.to_string()))
    }

    pub fn create_wallet(
        &self,
        user_id: i64,
        name: &str,
        currency: &str,
        opening_balance: f64,
    ) -> Result<i64, FintrackError> {
        self.conn
            .execute(
                "INSERT INTO wallets (user_id, name, currency, balance) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![user_id, name, currency, opening_balance],
            )
            .map_err(|e| FintrackError::Storage(format!("Failed to create wallet: {}", e)))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn wallet_count(&self, user_id: i64) -> Result<i64, FintrackError> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM wallets WHERE user_id = ?1",
                rusqlite::params![user_id],
                |row| row.get(0),
            )
            .map_err(|e| FintrackError::Storage(e.to_string()))
    }

    pub fn create_category(
        &self,
        user_id: Option<i64>,
        name: &str,
        kind: TransactionKind,
        icon: &str,
    ) -> Result<i64, FintrackError> {
        self.conn
            .execute(
                "INSERT INTO categories (user_id, name, type, icon) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![user_id, name, kind, icon],
            )
            .map_err(|e| FintrackError::Storage(format!("Failed to create category: {}", e)))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a transaction and apply it to the wallet balance.
    ///
    /// Not atomic on its own; callers run it inside
    /// [`Ledger::in_transaction`].
    pub fn record_transaction(&self, tx: &NewTransaction) -> Result<i64, FintrackError> {
        if tx.amount.is_nan() || tx.amount <= 0.0 {
            return Err(FintrackError::Storage(format!(
                "Transaction amount must be positive, got {}",
                tx.amount
            )));
        }

        let owner: Option<i64> = self
            .conn
            .query_row(
                "SELECT user_id FROM wallets WHERE id = ?1",
                rusqlite::params![tx.wallet_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| FintrackError::Storage(e.to_string()))?;
        if owner != Some(tx.user_id) {
            return Err(FintrackError::Storage(format!(
                "Wallet {} does not belong to user {}",
                tx.wallet_id, tx.user_id
            )));
        }

        self.conn
            .execute(
                "INSERT INTO transactions
                    (user_id, wallet_id, category_id, type, amount, description, transaction_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    tx.user_id,
                    tx.wallet_id,
                    tx.category_id,
                    tx.kind,
                    tx.amount,
                    tx.description,
                    format_date(tx.date),
                ],
            )
            .map_err(|e| FintrackError::Storage(format!("Failed to record transaction: {}", e)))?;
        let id = self.conn.last_insert_rowid();

        let delta = match tx.kind {
            TransactionKind::Income => tx.amount,
            TransactionKind::Expense => -tx.amount,
        };
        self.conn
            .execute(
                "UPDATE wallets SET balance = balance + ?1 WHERE id = ?2",
                rusqlite::params![delta, tx.wallet_id],
            )
            .map_err(|e| FintrackError::Storage(format!("Failed to update balance: {}", e)))?;

        debug!(id, wallet_id = tx.wallet_id, kind = %tx.kind, "Recorded transaction");
        Ok(id)
    }

    pub fn create_budget(
        &self,
        user_id: i64,
        category_id: i64,
        amount: f64,
        year: i32,
        month: u32,
    ) -> Result<i64, FintrackError> {
        self.conn
            .execute(
                "INSERT INTO budgets (user_id, category_id, amount, year, month)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![user_id, category_id, amount, year, month],
            )
            .map_err(|e| FintrackError::Storage(format!("Failed to create budget: {}", e)))?;
        Ok(self.conn.last_insert_rowid())
    }
}
