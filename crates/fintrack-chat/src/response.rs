//! Answer rendering for dispatched queries.
//!
//! Turns a [`Dispatched`] result into a localized answer and a list of
//! suggested follow-up actions. Every template has a no-data branch and the
//! output depends only on its inputs.

use crate::dispatcher::{
    count_status, has_foreign_wallets, total_balance, DailyTotals, Dispatched, TrendMonth,
    BASE_CURRENCY,
};
use crate::types::Locale;
use fintrack_storage::{
    BudgetRow, BudgetStatus, CategoryRow, IncomeExpenseRow, RecentTransactionRow, TransactionKind,
    WalletRow,
};

/// Entries listed per answer section.
const TOP_CATEGORIES: usize = 5;
const TOP_BUDGETS: usize = 3;
const TOP_TRANSACTIONS: usize = 5;

// =============================================================================
// Currency formatting
// =============================================================================

/// Format an amount with `,` thousands separators and the currency code.
///
/// VND has no minor unit and is shown without decimals; every other currency
/// gets two.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let precision = if currency == BASE_CURRENCY { 0 } else { 2 };
    let fixed = format!("{:.*}", precision, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 && ch.is_ascii_digit() {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if amount.is_sign_negative() && !is_zero && !amount.is_nan() {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(frac) => format!("{}{}.{} {}", sign, grouped, frac, currency),
        None => format!("{}{} {}", sign, grouped, currency),
    }
}

fn vnd(amount: f64) -> String {
    format_currency(amount, BASE_CURRENCY)
}

fn period(locale: Locale, year: i32, month: u32) -> String {
    match locale {
        Locale::Vi => format!("tháng {}/{}", month, year),
        Locale::En => format!("{}/{}", month, year),
    }
}

fn actions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// ResponseFormatter
// =============================================================================

/// Renders answers and suggested actions.
#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    dashboard_url: String,
    trend_months: u32,
}

impl ResponseFormatter {
    /// `dashboard_url` is appended as a link to populated answers; an empty
    /// URL disables the link.
    pub fn new(dashboard_url: impl Into<String>, trend_months: u32) -> Self {
        Self {
            dashboard_url: dashboard_url.into(),
            trend_months,
        }
    }

    /// Render the answer text and suggested actions for a result.
    pub fn format(&self, dispatched: &Dispatched, locale: Locale) -> (String, Vec<String>) {
        match dispatched {
            Dispatched::TotalExpense(row) => self.total_expense(row, locale),
            Dispatched::TotalIncome(row) => self.total_income(row, locale),
            Dispatched::IncomeVsExpense(row) => self.income_vs_expense(row, locale),
            Dispatched::CategoryBreakdown {
                year,
                month,
                categories,
            } => self.category_breakdown(*year, *month, categories, locale),
            Dispatched::BudgetStatus {
                year,
                month,
                budgets,
            } => self.budget_status(*year, *month, budgets, locale),
            Dispatched::WalletBalance { wallets } => self.wallet_balance(wallets, locale),
            Dispatched::RecentTransactions { transactions } => {
                self.recent_transactions(transactions, locale)
            }
            Dispatched::MonthlyTrend { months } => self.monthly_trend(months, locale),
            Dispatched::DailySummary(day) => self.daily_summary(day, locale),
            Dispatched::Unknown => self.unknown(locale),
        }
    }

    // -----------------------------------------------------------------
    // Suggested actions
    // -----------------------------------------------------------------

    fn with_dashboard(&self, mut items: Vec<String>, locale: Locale) -> Vec<String> {
        if !self.dashboard_url.is_empty() {
            let label = match locale {
                Locale::Vi => "Xem dashboard",
                Locale::En => "View dashboard",
            };
            items.push(format!("🔗 {}: {}", label, self.dashboard_url));
        }
        items
    }

    fn with_chart(&self, mut items: Vec<String>, locale: Locale) -> Vec<String> {
        if !self.dashboard_url.is_empty() {
            let label = match locale {
                Locale::Vi => "Xem biểu đồ",
                Locale::En => "View chart",
            };
            items.push(format!("🔗 {}: {}", label, self.dashboard_url));
        }
        items
    }

    // -----------------------------------------------------------------
    // Month totals
    // -----------------------------------------------------------------

    fn total_expense(&self, row: &IncomeExpenseRow, locale: Locale) -> (String, Vec<String>) {
        let p = period(locale, row.year, row.month);
        let answer = match (locale, row.total_expense == 0.0) {
            (Locale::Vi, true) => format!("📊 Bạn chưa có chi tiêu nào trong {}.", p),
            (Locale::Vi, false) => format!(
                "💸 Tổng chi tiêu {} của bạn là **{}**.",
                p,
                vnd(row.total_expense)
            ),
            (Locale::En, true) => format!("📊 You have no expenses in {}.", p),
            (Locale::En, false) => {
                format!("💸 Your total expense for {} is **{}**.", p, vnd(row.total_expense))
            }
        };
        let items = match locale {
            Locale::Vi => actions(&[
                "Xem chi tiết theo danh mục",
                "So sánh với tháng trước",
                "Kiểm tra ngân sách",
            ]),
            Locale::En => actions(&[
                "View details by category",
                "Compare with last month",
                "Check my budget",
            ]),
        };
        (answer, self.with_dashboard(items, locale))
    }

    fn total_income(&self, row: &IncomeExpenseRow, locale: Locale) -> (String, Vec<String>) {
        let p = period(locale, row.year, row.month);
        let answer = match (locale, row.total_income == 0.0) {
            (Locale::Vi, true) => format!("📊 Bạn chưa có thu nhập nào trong {}.", p),
            (Locale::Vi, false) => format!(
                "💰 Tổng thu nhập {} của bạn là **{}**.",
                p,
                vnd(row.total_income)
            ),
            (Locale::En, true) => format!("📊 You have no income in {}.", p),
            (Locale::En, false) => {
                format!("💰 Your total income for {} is **{}**.", p, vnd(row.total_income))
            }
        };
        let items = match locale {
            Locale::Vi => actions(&[
                "Xem chi tiết theo nguồn thu",
                "So sánh với tháng trước",
                "Xem tỷ lệ tiết kiệm",
            ]),
            Locale::En => actions(&[
                "View details by income source",
                "Compare with last month",
                "View savings rate",
            ]),
        };
        (answer, self.with_dashboard(items, locale))
    }

    fn income_vs_expense(&self, row: &IncomeExpenseRow, locale: Locale) -> (String, Vec<String>) {
        let p = period(locale, row.year, row.month);
        let income = row.total_income;
        let expense = row.total_expense;
        let savings = row.net_savings;

        let answer = if income == 0.0 && expense == 0.0 {
            match locale {
                Locale::Vi => format!("📊 Bạn chưa có giao dịch nào trong {}.", p),
                Locale::En => format!("📊 You have no transactions in {}.", p),
            }
        } else {
            let mut parts = Vec::new();
            match locale {
                Locale::Vi => {
                    parts.push(format!("📊 **Tổng quan tài chính {}:**\n", p));
                    parts.push(format!("💰 Thu nhập: **{}**", vnd(income)));
                    parts.push(format!("💸 Chi tiêu: **{}**", vnd(expense)));
                }
                Locale::En => {
                    parts.push(format!("📊 **Financial overview for {}:**\n", p));
                    parts.push(format!("💰 Income: **{}**", vnd(income)));
                    parts.push(format!("💸 Expense: **{}**", vnd(expense)));
                }
            }
            if savings >= 0.0 {
                parts.push(match locale {
                    Locale::Vi => format!("✅ Tiết kiệm: **{}**", vnd(savings)),
                    Locale::En => format!("✅ Savings: **{}**", vnd(savings)),
                });
                if income > 0.0 {
                    let rate = savings / income * 100.0;
                    parts.push(match locale {
                        Locale::Vi => format!("📈 Tỷ lệ tiết kiệm: **{:.1}%**", rate),
                        Locale::En => format!("📈 Savings rate: **{:.1}%**", rate),
                    });
                }
            } else {
                parts.push(match locale {
                    Locale::Vi => format!("⚠️ Chi vượt thu: **{}**", vnd(savings.abs())),
                    Locale::En => format!("⚠️ Overspent: **{}**", vnd(savings.abs())),
                });
            }
            parts.join("\n")
        };

        let items = match locale {
            Locale::Vi => actions(&[
                "Xem chi tiết theo danh mục",
                "So sánh với tháng trước",
                "Thiết lập ngân sách",
            ]),
            Locale::En => actions(&[
                "View details by category",
                "Compare with last month",
                "Set up a budget",
            ]),
        };
        (answer, self.with_dashboard(items, locale))
    }

    // -----------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------

    fn category_breakdown(
        &self,
        year: i32,
        month: u32,
        categories: &[CategoryRow],
        locale: Locale,
    ) -> (String, Vec<String>) {
        let p = period(locale, year, month);
        if categories.is_empty() {
            return match locale {
                Locale::Vi => (
                    format!("📊 Bạn chưa có chi tiêu nào trong {}.", p),
                    actions(&["Thêm giao dịch mới", "Xem các tháng khác"]),
                ),
                Locale::En => (
                    format!("📊 You have no expenses in {}.", p),
                    actions(&["Add a new transaction", "View other months"]),
                ),
            };
        }

        let mut parts = vec![match locale {
            Locale::Vi => format!("📊 **Chi tiêu theo danh mục {}:**\n", p),
            Locale::En => format!("📊 **Spending by category for {}:**\n", p),
        }];
        for (i, cat) in categories.iter().take(TOP_CATEGORIES).enumerate() {
            parts.push(format!(
                "{}. **{}**: {} ({:.1}%)",
                i + 1,
                cat.category_name,
                vnd(cat.total_amount),
                cat.percentage
            ));
        }

        let items = match locale {
            Locale::Vi => actions(&[
                "Xem chi tiết từng danh mục",
                "Đặt ngân sách cho danh mục",
                "So sánh với tháng trước",
            ]),
            Locale::En => actions(&[
                "View each category",
                "Set a category budget",
                "Compare with last month",
            ]),
        };
        (parts.join("\n"), self.with_chart(items, locale))
    }

    fn budget_status(
        &self,
        year: i32,
        month: u32,
        budgets: &[BudgetRow],
        locale: Locale,
    ) -> (String, Vec<String>) {
        let p = period(locale, year, month);
        if budgets.is_empty() {
            return match locale {
                Locale::Vi => (
                    format!(
                        "📋 Bạn chưa thiết lập ngân sách cho {}. Hãy tạo ngân sách để quản lý chi tiêu tốt hơn!",
                        p
                    ),
                    actions(&["Tạo ngân sách mới", "Xem hướng dẫn thiết lập ngân sách"]),
                ),
                Locale::En => (
                    format!(
                        "📋 You have not set a budget for {}. Create one to keep spending under control!",
                        p
                    ),
                    actions(&["Create a new budget", "How to set up a budget"]),
                ),
            };
        }

        let in_status = |status: BudgetStatus| budgets.iter().filter(move |b| b.status == status);
        let mut parts = vec![match locale {
            Locale::Vi => format!("📋 **Tình trạng ngân sách {}:**\n", p),
            Locale::En => format!("📋 **Budget status for {}:**\n", p),
        }];

        let exceeded = count_status(budgets, BudgetStatus::Exceeded);
        if exceeded > 0 {
            parts.push(match locale {
                Locale::Vi => format!("⚠️ **Vượt ngân sách ({}):**", exceeded),
                Locale::En => format!("⚠️ **Over budget ({}):**", exceeded),
            });
            for b in in_status(BudgetStatus::Exceeded).take(TOP_BUDGETS) {
                let over = vnd(b.actual_spent - b.budget_amount);
                parts.push(match locale {
                    Locale::Vi => format!(
                        "  • {}: vượt {} ({:.0}%)",
                        b.category_name, over, b.usage_percentage
                    ),
                    Locale::En => format!(
                        "  • {}: over by {} ({:.0}%)",
                        b.category_name, over, b.usage_percentage
                    ),
                });
            }
        }

        let warning = count_status(budgets, BudgetStatus::Warning);
        if warning > 0 {
            parts.push(match locale {
                Locale::Vi => format!("\n⚡ **Cảnh báo ({}):**", warning),
                Locale::En => format!("\n⚡ **Warning ({}):**", warning),
            });
            for b in in_status(BudgetStatus::Warning).take(TOP_BUDGETS) {
                parts.push(match locale {
                    Locale::Vi => {
                        format!("  • {}: {:.0}% ngân sách", b.category_name, b.usage_percentage)
                    }
                    Locale::En => {
                        format!("  • {}: {:.0}% of budget", b.category_name, b.usage_percentage)
                    }
                });
            }
        }

        let safe = count_status(budgets, BudgetStatus::Safe);
        if safe > 0 {
            parts.push(match locale {
                Locale::Vi => format!("\n✅ **An toàn ({}):**", safe),
                Locale::En => format!("\n✅ **On track ({}):**", safe),
            });
            for b in in_status(BudgetStatus::Safe).take(TOP_BUDGETS) {
                parts.push(match locale {
                    Locale::Vi => format!("  • {}: còn {}", b.category_name, vnd(b.remaining)),
                    Locale::En => format!("  • {}: {} left", b.category_name, vnd(b.remaining)),
                });
            }
        }

        let items = match locale {
            Locale::Vi => actions(&[
                "Điều chỉnh ngân sách",
                "Xem chi tiết chi tiêu",
                "Đặt cảnh báo ngân sách",
            ]),
            Locale::En => actions(&[
                "Adjust budgets",
                "View spending details",
                "Set budget alerts",
            ]),
        };
        (parts.join("\n"), self.with_dashboard(items, locale))
    }

    fn wallet_balance(&self, wallets: &[WalletRow], locale: Locale) -> (String, Vec<String>) {
        if wallets.is_empty() {
            return match locale {
                Locale::Vi => (
                    "💳 Bạn chưa có ví nào. Hãy tạo ví đầu tiên để bắt đầu quản lý tài chính!"
                        .to_string(),
                    actions(&["Tạo ví mới"]),
                ),
                Locale::En => (
                    "💳 You have no wallets yet. Create your first wallet to start tracking!"
                        .to_string(),
                    actions(&["Create a wallet"]),
                ),
            };
        }

        let total = vnd(total_balance(wallets));
        let mut parts = match locale {
            Locale::Vi => vec![
                "💳 **Số dư các ví của bạn:**\n".to_string(),
                format!("📊 **Tổng số dư: {}**\n", total),
            ],
            Locale::En => vec![
                "💳 **Your wallet balances:**\n".to_string(),
                format!("📊 **Total balance: {}**\n", total),
            ],
        };
        for w in wallets {
            parts.push(format!(
                "• **{}**: {}",
                w.wallet_name,
                format_currency(w.current_balance, &w.currency)
            ));
        }
        if has_foreign_wallets(wallets) {
            parts.push(match locale {
                Locale::Vi => "\n_Tổng số dư chỉ tính các ví VND._".to_string(),
                Locale::En => "\n_The total only includes VND wallets._".to_string(),
            });
        }

        let items = match locale {
            Locale::Vi => actions(&[
                "Xem lịch sử giao dịch",
                "Chuyển tiền giữa các ví",
                "Thêm giao dịch mới",
            ]),
            Locale::En => actions(&[
                "View transaction history",
                "Transfer between wallets",
                "Add a new transaction",
            ]),
        };
        (parts.join("\n"), self.with_dashboard(items, locale))
    }

    fn recent_transactions(
        &self,
        transactions: &[RecentTransactionRow],
        locale: Locale,
    ) -> (String, Vec<String>) {
        if transactions.is_empty() {
            return match locale {
                Locale::Vi => (
                    "📝 Bạn chưa có giao dịch nào. Hãy thêm giao dịch đầu tiên!".to_string(),
                    actions(&["Thêm giao dịch thu nhập", "Thêm giao dịch chi tiêu"]),
                ),
                Locale::En => (
                    "📝 You have no transactions yet. Add your first one!".to_string(),
                    actions(&["Add an income transaction", "Add an expense transaction"]),
                ),
            };
        }

        let mut parts = vec![match locale {
            Locale::Vi => "📝 **Giao dịch gần đây:**\n".to_string(),
            Locale::En => "📝 **Recent transactions:**\n".to_string(),
        }];
        for t in transactions.iter().take(TOP_TRANSACTIONS) {
            let icon = match t.kind {
                TransactionKind::Income => "💰",
                TransactionKind::Expense => "💸",
            };
            let label = t
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(&t.category_name);
            parts.push(format!(
                "{} {}: **{}** - {}",
                icon,
                t.transaction_date.format("%Y-%m-%d"),
                label,
                vnd(t.amount)
            ));
        }
        if transactions.len() > TOP_TRANSACTIONS {
            let more = transactions.len() - TOP_TRANSACTIONS;
            parts.push(match locale {
                Locale::Vi => format!("\n... và {} giao dịch khác", more),
                Locale::En => format!("\n... and {} more transactions", more),
            });
        }

        let items = match locale {
            Locale::Vi => actions(&["Xem tất cả giao dịch", "Lọc theo danh mục", "Xuất báo cáo"]),
            Locale::En => actions(&[
                "View all transactions",
                "Filter by category",
                "Export report",
            ]),
        };
        (parts.join("\n"), self.with_dashboard(items, locale))
    }

    fn monthly_trend(&self, months: &[TrendMonth], locale: Locale) -> (String, Vec<String>) {
        if months.is_empty() {
            return match locale {
                Locale::Vi => (
                    "📈 Chưa có dữ liệu để phân tích xu hướng. Hãy thêm giao dịch để xem báo cáo!"
                        .to_string(),
                    actions(&["Thêm giao dịch"]),
                ),
                Locale::En => (
                    "📈 Not enough data for a trend yet. Add transactions to see the report!"
                        .to_string(),
                    actions(&["Add a transaction"]),
                ),
            };
        }

        let mut parts = vec![match locale {
            Locale::Vi => format!(
                "📈 **Xu hướng tài chính {} tháng gần đây:**\n",
                self.trend_months
            ),
            Locale::En => format!(
                "📈 **Financial trend for the last {} months:**\n",
                self.trend_months
            ),
        }];
        for m in months {
            let emoji = if m.savings >= 0.0 { "✅" } else { "⚠️" };
            parts.push(match locale {
                Locale::Vi => format!(
                    "{} T{}/{}: Thu {} | Chi {}",
                    emoji,
                    m.month,
                    m.year,
                    vnd(m.income),
                    vnd(m.expense)
                ),
                Locale::En => format!(
                    "{} {}/{}: Income {} | Expense {}",
                    emoji,
                    m.month,
                    m.year,
                    vnd(m.income),
                    vnd(m.expense)
                ),
            });
        }

        let avg_expense = months.iter().map(|m| m.expense).sum::<f64>() / months.len() as f64;
        parts.push(match locale {
            Locale::Vi => format!("\n📊 Chi tiêu trung bình: **{}/tháng**", vnd(avg_expense)),
            Locale::En => format!("\n📊 Average expense: **{}/month**", vnd(avg_expense)),
        });

        let items = match locale {
            Locale::Vi => actions(&[
                "Xem chi tiết từng tháng",
                "Xem dự báo chi tiêu",
                "Đặt mục tiêu tiết kiệm",
            ]),
            Locale::En => actions(&[
                "View each month",
                "View spending forecast",
                "Set a savings goal",
            ]),
        };
        (parts.join("\n"), self.with_chart(items, locale))
    }

    fn daily_summary(&self, day: &DailyTotals, locale: Locale) -> (String, Vec<String>) {
        let date = match locale {
            Locale::Vi => day.date.format("%d/%m/%Y").to_string(),
            Locale::En => day.date.format("%Y-%m-%d").to_string(),
        };

        let answer = if day.income == 0.0 && day.expense == 0.0 {
            match locale {
                Locale::Vi => format!("📅 Chưa có giao dịch nào ngày {}.", date),
                Locale::En => format!("📅 No transactions on {}.", date),
            }
        } else {
            let mut parts = vec![match locale {
                Locale::Vi => format!("📅 **Tổng quan ngày {}:**\n", date),
                Locale::En => format!("📅 **Summary for {}:**\n", date),
            }];
            if day.income > 0.0 {
                parts.push(match locale {
                    Locale::Vi => format!(
                        "💰 Thu nhập: {} ({} giao dịch)",
                        vnd(day.income),
                        day.income_count
                    ),
                    Locale::En => format!(
                        "💰 Income: {} ({} transactions)",
                        vnd(day.income),
                        day.income_count
                    ),
                });
            }
            if day.expense > 0.0 {
                parts.push(match locale {
                    Locale::Vi => format!(
                        "💸 Chi tiêu: {} ({} giao dịch)",
                        vnd(day.expense),
                        day.expense_count
                    ),
                    Locale::En => format!(
                        "💸 Expense: {} ({} transactions)",
                        vnd(day.expense),
                        day.expense_count
                    ),
                });
            }
            let net = day.income - day.expense;
            parts.push(match (locale, net >= 0.0) {
                (Locale::Vi, true) => format!("✅ Kết quả: +{}", vnd(net)),
                (Locale::Vi, false) => format!("⚠️ Kết quả: -{}", vnd(net.abs())),
                (Locale::En, true) => format!("✅ Net: +{}", vnd(net)),
                (Locale::En, false) => format!("⚠️ Net: -{}", vnd(net.abs())),
            });
            parts.join("\n")
        };

        let items = match locale {
            Locale::Vi => actions(&[
                "Xem chi tiết giao dịch",
                "Thêm giao dịch mới",
                "Xem tổng kết tuần",
            ]),
            Locale::En => actions(&[
                "View transaction details",
                "Add a new transaction",
                "View weekly summary",
            ]),
        };
        (answer, self.with_dashboard(items, locale))
    }

    fn unknown(&self, locale: Locale) -> (String, Vec<String>) {
        match locale {
            Locale::Vi => (
                HELP_VI.to_string(),
                self.with_dashboard(
                    actions(&[
                        "Tổng chi tiêu tháng này",
                        "Kiểm tra ngân sách",
                        "Số dư trong ví",
                        "Giao dịch gần đây",
                    ]),
                    locale,
                ),
            ),
            Locale::En => (
                HELP_EN.to_string(),
                self.with_dashboard(
                    actions(&[
                        "Total expense this month",
                        "Check my budget",
                        "Wallet balance",
                        "Recent transactions",
                    ]),
                    locale,
                ),
            ),
        }
    }
}

const HELP_VI: &str = "🤔 Xin lỗi, tôi chưa hiểu câu hỏi của bạn. Bạn có thể hỏi tôi về:

📊 **Tổng quan tài chính:**
• \"Tổng chi tiêu tháng này là bao nhiêu?\"
• \"Thu nhập tháng này của tôi?\"
• \"Tiết kiệm được bao nhiêu?\"

💳 **Số dư và ví:**
• \"Số dư trong ví?\"
• \"Còn bao nhiêu tiền?\"

📋 **Ngân sách:**
• \"Kiểm tra ngân sách\"
• \"Có vượt ngân sách không?\"

📈 **Phân tích:**
• \"Chi tiêu theo danh mục\"
• \"Xu hướng chi tiêu hàng tháng\"

📝 **Giao dịch:**
• \"Giao dịch gần đây\"
• \"Chi gì hôm nay?\"

💡 Bạn có thể thêm thời gian vào câu hỏi, ví dụ: \"tháng này\", \"tháng trước\", \"tháng 5\".";

const HELP_EN: &str = "🤔 Sorry, I did not understand your question. You can ask me about:

📊 **Financial overview:**
• \"What's my total expense this month?\"
• \"Show my total income this month\"
• \"How much savings this month?\"

💳 **Wallets and balances:**
• \"What's my wallet balance?\"

📋 **Budgets:**
• \"Check my budget status\"
• \"Am I over budget?\"

📈 **Analysis:**
• \"Spending by category\"
• \"Monthly trend\"

📝 **Transactions:**
• \"Recent transactions\"
• \"Today's spending\"

💡 You can add a period to your question, for example \"this month\", \"last month\" or \"month 5\".";
