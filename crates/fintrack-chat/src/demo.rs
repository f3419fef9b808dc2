//! Sample questions for documentation and manual testing.

use serde::Serialize;

/// Questions that each resolve to a concrete intent.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DemoQuestions {
    pub vietnamese: &'static [&'static str],
    pub english: &'static [&'static str],
}

const VIETNAMESE: &[&str] = &[
    "Tổng chi tiêu tháng này là bao nhiêu?",
    "Tổng thu nhập tháng này của tôi?",
    "Chi tiêu theo danh mục",
    "Kiểm tra ngân sách tháng này",
    "Số dư trong ví là bao nhiêu?",
    "Giao dịch gần đây",
    "Tôi tiết kiệm được bao nhiêu tháng này?",
    "So sánh thu chi tháng trước",
    "Chi tiêu hôm nay",
    "Xu hướng hàng tháng",
    "Có vượt ngân sách không?",
    "Tổng thu nhập năm nay",
];

const ENGLISH: &[&str] = &[
    "What's my total expense this month?",
    "Show my total income this month",
    "Spending by category",
    "Check my budget status",
    "What's my wallet balance?",
    "Recent transactions",
    "How much savings this month?",
    "Compare income and expense last month",
    "Today's spending",
    "Monthly trend",
    "Am I over budget?",
    "Total income this year",
];

pub fn demo_questions() -> DemoQuestions {
    DemoQuestions {
        vietnamese: VIETNAMESE,
        english: ENGLISH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentClassifier;
    use crate::types::Intent;

    #[test]
    fn test_every_demo_question_is_understood() {
        let classifier = IntentClassifier::new();
        let demo = demo_questions();
        for question in demo.vietnamese.iter().chain(demo.english) {
            let (intent, _) = classifier.classify(question);
            assert_ne!(intent, Intent::Unknown, "{question}");
        }
    }

    #[test]
    fn test_demo_questions_cover_every_intent() {
        let classifier = IntentClassifier::new();
        let demo = demo_questions();
        for list in [demo.vietnamese, demo.english] {
            let seen: Vec<Intent> = list.iter().map(|q| classifier.classify(q).0).collect();
            for intent in IntentClassifier::table() {
                assert!(seen.contains(&intent), "{intent} missing");
            }
        }
    }

    #[test]
    fn test_demo_questions_serialize_by_language() {
        let json = serde_json::to_value(demo_questions()).unwrap();
        assert_eq!(json["vietnamese"].as_array().unwrap().len(), 12);
        assert_eq!(json["english"][0], "What's my total expense this month?");
    }
}
