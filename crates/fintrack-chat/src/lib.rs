//! Finance chatbot for fintrack.
//!
//! Classifies a natural-language question (Vietnamese or English), extracts
//! the calendar period it refers to, reads one allowlisted aggregate view for
//! the asking user, and renders a localized answer with suggested actions.

pub mod demo;
pub mod dispatcher;
pub mod error;
pub mod intent;
pub mod response;
pub mod service;
pub mod time;
pub mod types;

pub use demo::{demo_questions, DemoQuestions};
pub use dispatcher::{DispatchLimits, Dispatched, QueryDispatcher};
pub use error::ChatError;
pub use intent::IntentClassifier;
pub use response::{format_currency, ResponseFormatter};
pub use service::ChatbotService;
pub use time::TimeContextExtractor;
pub use types::{ChatAnswer, Intent, Locale, QueryRows, QueryType, TimeContext, TimeType};
