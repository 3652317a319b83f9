#[cfg(test)]
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::models::domain::question_record::{QuestionRecord, RawQuestionRecord};

    /// Builds a valid question whose correct option is `correct`.
    pub fn question(text: &str, correct: &str) -> QuestionRecord {
        QuestionRecord::validate(raw_question(text, correct))
            .expect("fixture question should be valid")
    }

    pub fn raw_question(text: &str, correct: &str) -> RawQuestionRecord {
        serde_json::from_value(question_json(text, correct))
            .expect("fixture question should deserialize")
    }

    pub fn question_json(text: &str, correct: &str) -> Value {
        json!({
            "question": text,
            "options": {
                "A": format!("{} - first", text),
                "B": format!("{} - second", text),
                "C": format!("{} - third", text),
                "D": format!("{} - fourth", text),
            },
            "correctAnswer": correct,
        })
    }

    /// Five questions with correct answers A, B, C, D, A.
    pub fn sample_quiz() -> Vec<QuestionRecord> {
        sample_quiz_json()
            .as_array()
            .expect("sample quiz is an array")
            .iter()
            .map(|value| {
                let raw: RawQuestionRecord =
                    serde_json::from_value(value.clone()).expect("fixture should deserialize");
                QuestionRecord::validate(raw).expect("fixture should be valid")
            })
            .collect()
    }

    pub fn sample_quiz_json() -> Value {
        Value::Array(vec![
            question_json("Who owns a value after a move?", "A"),
            question_json("What does a shared reference allow?", "B"),
            question_json("When is a value dropped?", "C"),
            question_json("What does the borrow checker enforce?", "D"),
            question_json("Which trait enables implicit copies?", "A"),
        ])
    }

    /// Wraps model output text in a `generateContent` success body.
    pub fn gemini_body(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                },
                "finishReason": "STOP"
            }]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::question_record::OptionKey;

    #[test]
    fn test_fixtures_sample_quiz() {
        let quiz = sample_quiz();

        assert_eq!(quiz.len(), 5);
        assert_eq!(quiz[0].correct_answer(), OptionKey::A);
        assert_eq!(quiz[3].correct_answer(), OptionKey::D);
    }

    #[test]
    fn test_fixtures_gemini_body_nests_text() {
        let body = gemini_body("[]");

        assert_eq!(body["candidates"][0]["content"]["parts"][0]["text"], "[]");
    }
}
