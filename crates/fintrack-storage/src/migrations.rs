//! Database schema migrations.
//!
//! Version 1 creates the record tables (users, wallets, categories,
//! transactions, budgets). Version 2 creates the precomputed aggregate views
//! the chatbot is allowed to read. Views are recomputed on read, so they
//! always reflect committed records.

use rusqlite::Connection;
use tracing::info;

use fintrack_core::error::FintrackError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), FintrackError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| FintrackError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| FintrackError::Storage(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply(conn, 1, "record_tables", V1_RECORD_TABLES)?;
        info!("Applied migration v1: record_tables");
    }
    if current_version < 2 {
        apply(conn, 2, "aggregate_views", V2_AGGREGATE_VIEWS)?;
        info!("Applied migration v2: aggregate_views");
    }

    Ok(())
}

fn apply(conn: &Connection, version: i64, name: &str, sql: &str) -> Result<(), FintrackError> {
    conn.execute_batch(sql)
        .map_err(|e| FintrackError::Storage(format!("Migration v{} failed: {}", version, e)))?;
    conn.execute(
        "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
        rusqlite::params![version, name],
    )
    .map_err(|e| FintrackError::Storage(format!("Failed to record migration v{}: {}", version, e)))?;
    Ok(())
}

const V1_RECORD_TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,
    full_name   TEXT,
    created_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE TABLE IF NOT EXISTS wallets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name        TEXT NOT NULL,
    balance     REAL NOT NULL DEFAULT 0,
    currency    TEXT NOT NULL DEFAULT 'VND',
    icon        TEXT NOT NULL DEFAULT 'wallet',
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_wallets_user ON wallets (user_id);

-- user_id NULL marks a system default category shared by every user.
CREATE TABLE IF NOT EXISTS categories (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER REFERENCES users(id) ON DELETE CASCADE,
    name        TEXT NOT NULL,
    type        TEXT NOT NULL CHECK (type IN ('income', 'expense')),
    icon        TEXT NOT NULL DEFAULT 'tag',
    color       TEXT NOT NULL DEFAULT '#6366f1',
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE TABLE IF NOT EXISTS transactions (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id           INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    wallet_id         INTEGER NOT NULL REFERENCES wallets(id) ON DELETE RESTRICT,
    category_id       INTEGER NOT NULL REFERENCES categories(id) ON DELETE RESTRICT,
    type              TEXT NOT NULL CHECK (type IN ('income', 'expense')),
    amount            REAL NOT NULL CHECK (amount > 0),
    description       TEXT,
    transaction_date  TEXT NOT NULL,
    created_at        INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_transactions_user_date
    ON transactions (user_id, transaction_date DESC);

CREATE TABLE IF NOT EXISTS budgets (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id      INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    category_id  INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    amount       REAL NOT NULL CHECK (amount > 0),
    month        INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year         INTEGER NOT NULL,
    created_at   INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
    UNIQUE (user_id, category_id, year, month)
);
";

const V2_AGGREGATE_VIEWS: &str = "
CREATE VIEW IF NOT EXISTS v_income_vs_expense AS
SELECT
    user_id,
    CAST(strftime('%Y', transaction_date) AS INTEGER) AS year,
    CAST(strftime('%m', transaction_date) AS INTEGER) AS month,
    SUM(CASE WHEN type = 'income' THEN amount ELSE 0 END) AS total_income,
    SUM(CASE WHEN type = 'expense' THEN amount ELSE 0 END) AS total_expense,
    SUM(CASE WHEN type = 'income' THEN amount ELSE -amount END) AS net_savings,
    ROUND(
        SUM(CASE WHEN type = 'expense' THEN amount ELSE 0 END) * 100.0
        / NULLIF(SUM(CASE WHEN type = 'income' THEN amount ELSE 0 END), 0),
        2
    ) AS expense_ratio
FROM transactions
GROUP BY user_id, strftime('%Y-%m', transaction_date);

CREATE VIEW IF NOT EXISTS v_monthly_summary AS
SELECT
    user_id,
    CAST(strftime('%Y', transaction_date) AS INTEGER) AS year,
    CAST(strftime('%m', transaction_date) AS INTEGER) AS month,
    type,
    COUNT(*) AS transaction_count,
    SUM(amount) AS total_amount,
    AVG(amount) AS avg_amount,
    MAX(amount) AS max_amount
FROM transactions
GROUP BY user_id, strftime('%Y-%m', transaction_date), type;

CREATE VIEW IF NOT EXISTS v_category_breakdown AS
SELECT
    t.user_id,
    CAST(strftime('%Y', t.transaction_date) AS INTEGER) AS year,
    CAST(strftime('%m', t.transaction_date) AS INTEGER) AS month,
    t.type AS type,
    c.id AS category_id,
    c.name AS category_name,
    c.icon AS category_icon,
    c.color AS category_color,
    SUM(t.amount) AS total_amount,
    COUNT(*) AS transaction_count,
    ROUND(
        SUM(t.amount) * 100.0 / SUM(SUM(t.amount)) OVER (
            PARTITION BY t.user_id, strftime('%Y-%m', t.transaction_date), t.type
        ),
        2
    ) AS percentage
FROM transactions t
JOIN categories c ON c.id = t.category_id
GROUP BY t.user_id, strftime('%Y-%m', t.transaction_date), t.type, c.id;

CREATE VIEW IF NOT EXISTS v_budget_vs_actual AS
SELECT
    b.id AS budget_id,
    b.user_id,
    b.year,
    b.month,
    b.category_id,
    c.name AS category_name,
    c.icon AS category_icon,
    c.color AS category_color,
    b.amount AS budget_amount,
    COALESCE(a.spent, 0) AS actual_spent,
    b.amount - COALESCE(a.spent, 0) AS remaining,
    ROUND(COALESCE(a.spent, 0) * 100.0 / NULLIF(b.amount, 0), 2) AS usage_percentage,
    CASE
        WHEN COALESCE(a.spent, 0) >= b.amount THEN 'exceeded'
        WHEN COALESCE(a.spent, 0) >= b.amount * 0.8 THEN 'warning'
        ELSE 'safe'
    END AS status
FROM budgets b
JOIN categories c ON c.id = b.category_id
LEFT JOIN (
    SELECT
        user_id,
        category_id,
        CAST(strftime('%Y', transaction_date) AS INTEGER) AS year,
        CAST(strftime('%m', transaction_date) AS INTEGER) AS month,
        SUM(amount) AS spent
    FROM transactions
    WHERE type = 'expense'
    GROUP BY user_id, category_id, strftime('%Y-%m', transaction_date)
) a ON a.user_id = b.user_id
   AND a.category_id = b.category_id
   AND a.year = b.year
   AND a.month = b.month;

CREATE VIEW IF NOT EXISTS v_wallet_balance AS
SELECT
    w.id AS wallet_id,
    w.user_id,
    w.name AS wallet_name,
    w.icon AS wallet_icon,
    w.currency,
    w.balance AS current_balance,
    COALESCE(SUM(CASE WHEN t.type = 'income' THEN t.amount END), 0) AS total_income,
    COALESCE(SUM(CASE WHEN t.type = 'expense' THEN t.amount END), 0) AS total_expense,
    COUNT(t.id) AS transaction_count
FROM wallets w
LEFT JOIN transactions t ON t.wallet_id = w.id
WHERE w.is_active = 1
GROUP BY w.id;

CREATE VIEW IF NOT EXISTS v_recent_transactions AS
SELECT
    t.id AS transaction_id,
    t.user_id,
    t.type,
    t.amount,
    t.description,
    t.transaction_date,
    t.created_at,
    c.name AS category_name,
    c.icon AS category_icon,
    w.name AS wallet_name
FROM transactions t
JOIN categories c ON c.id = t.category_id
JOIN wallets w ON w.id = t.wallet_id;

CREATE VIEW IF NOT EXISTS v_daily_summary AS
SELECT
    user_id,
    transaction_date,
    type,
    COUNT(*) AS transaction_count,
    SUM(amount) AS total_amount
FROM transactions
GROUP BY user_id, transaction_date, type;
";
