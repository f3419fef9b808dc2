//! The chatbot pipeline: classify, extract, dispatch, format.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use fintrack_core::config::ChatConfig;
use fintrack_storage::{AggregateStore, AllowedView};

use crate::demo::{demo_questions, DemoQuestions};
use crate::dispatcher::{DispatchLimits, QueryDispatcher};
use crate::error::ChatError;
use crate::intent::IntentClassifier;
use crate::response::ResponseFormatter;
use crate::time::TimeContextExtractor;
use crate::types::{ChatAnswer, Locale, QueryRows, QueryType};

/// Answers finance questions for one user at a time.
///
/// Stateless between calls; every read is scoped to the `user_id` passed in.
pub struct ChatbotService {
    classifier: IntentClassifier,
    extractor: TimeContextExtractor,
    dispatcher: QueryDispatcher,
    formatter: ResponseFormatter,
    default_locale: Locale,
    rows_recent_limit: u32,
}

impl ChatbotService {
    pub fn new(store: Arc<dyn AggregateStore>, config: &ChatConfig) -> Self {
        let default_locale = Locale::from_tag(&config.default_locale).unwrap_or_else(|| {
            warn!(
                locale = %config.default_locale,
                "Unsupported default locale, falling back to vi"
            );
            Locale::Vi
        });
        let limits = DispatchLimits {
            recent: config.recent_limit,
            category: config.category_limit,
            trend_months: config.trend_months,
        };

        Self {
            classifier: IntentClassifier::new(),
            extractor: TimeContextExtractor::new(),
            dispatcher: QueryDispatcher::new(store, limits),
            formatter: ResponseFormatter::new(config.dashboard_url.clone(), config.trend_months),
            default_locale,
            rows_recent_limit: config.rows_recent_limit,
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Answer a question relative to the local calendar date.
    pub fn ask(
        &self,
        user_id: i64,
        question: &str,
        timezone: &str,
        locale: Option<Locale>,
    ) -> Result<ChatAnswer, ChatError> {
        self.ask_on(user_id, question, timezone, locale, today())
    }

    /// Answer a question relative to `today`.
    ///
    /// The timezone label is recorded but does not shift `today`.
    pub fn ask_on(
        &self,
        user_id: i64,
        question: &str,
        timezone: &str,
        locale: Option<Locale>,
        today: NaiveDate,
    ) -> Result<ChatAnswer, ChatError> {
        let locale = locale.unwrap_or(self.default_locale);
        let (intent, confidence) = self.classifier.classify(question);
        let time_context = self.extractor.extract(question, today);

        info!(
            user_id,
            intent = %intent,
            timezone,
            year = time_context.year,
            month = time_context.month,
            "Processing chatbot question"
        );

        let dispatched = self
            .dispatcher
            .dispatch(user_id, intent, &time_context, today)?;
        let (answer, suggested_actions) = self.formatter.format(&dispatched, locale);

        Ok(ChatAnswer {
            answer,
            data: dispatched.data(),
            suggested_actions,
            intent,
            confidence,
            time_context,
        })
    }

    /// Raw rows for `query_type`, relative to the local calendar date.
    pub fn query_rows(
        &self,
        user_id: i64,
        question: &str,
        query_type: &str,
    ) -> Result<QueryRows, ChatError> {
        self.query_rows_on(user_id, question, query_type, today())
    }

    /// Raw rows for `query_type`, with the period taken from `question`.
    pub fn query_rows_on(
        &self,
        user_id: i64,
        question: &str,
        query_type: &str,
        today: NaiveDate,
    ) -> Result<QueryRows, ChatError> {
        let query_type: QueryType = query_type.parse()?;
        let ctx = self.extractor.extract(question, today);
        let (year, month) = (ctx.year, ctx.month);
        let month_scope = json!({ "user_id": user_id, "year": year, "month": month });

        let (rows, metadata): (Vec<Value>, Value) = match query_type {
            QueryType::Expense | QueryType::Income => {
                let row = self.dispatcher.month_totals(user_id, year, month)?;
                (vec![json!(row)], month_scope)
            }
            QueryType::Category => {
                let rows = self.dispatcher.categories(user_id, year, month)?;
                (to_values(&rows), month_scope)
            }
            QueryType::Budget => {
                let rows = self.dispatcher.budgets(user_id, year, month)?;
                (to_values(&rows), month_scope)
            }
            QueryType::Wallet => {
                let rows = self.dispatcher.wallets(user_id)?;
                (to_values(&rows), json!({ "user_id": user_id }))
            }
            QueryType::Transactions => {
                let limit = self.rows_recent_limit;
                let rows = self.dispatcher.recent(user_id, limit)?;
                (to_values(&rows), json!({ "user_id": user_id, "limit": limit }))
            }
            QueryType::Summary => {
                let summary = self.dispatcher.monthly_summary(user_id, year, month)?;
                (vec![json!(summary)], month_scope)
            }
        };

        debug!(user_id, query_type = query_type.as_str(), rows = rows.len(), "Query rows");
        Ok(QueryRows {
            query_type,
            row_count: rows.len(),
            rows,
            metadata,
        })
    }

    /// Names of the views the chatbot may read.
    pub fn available_views(&self) -> Vec<&'static str> {
        AllowedView::names()
    }

    pub fn demo_questions(&self) -> DemoQuestions {
        demo_questions()
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn to_values<T: serde::Serialize>(rows: &[T]) -> Vec<Value> {
    rows.iter().map(|r| json!(r)).collect()
}
