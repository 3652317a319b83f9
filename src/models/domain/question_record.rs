use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::quiz_prompt::OPTION_KEYS;
use crate::errors::{AppError, AppResult};

/// A quiz subject: trimmed and never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    pub fn parse(text: &str) -> AppResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError("Please enter a topic.".to_string()));
        }
        Ok(Topic(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }
}

impl FromStr for OptionKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionKey::A),
            "B" => Ok(OptionKey::B),
            "C" => Ok(OptionKey::C),
            "D" => Ok(OptionKey::D),
            other => Err(AppError::ValidationError(format!(
                "'{}' is not an option key, expected one of {}",
                other,
                OPTION_KEYS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl QuestionOptions {
    pub fn text(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }
}

/// Question record as the model returns it, before any checks.
#[derive(Clone, Debug, Deserialize)]
pub struct RawQuestionRecord {
    pub question: String,
    pub options: BTreeMap<String, String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

/// A validated multiple-choice question. Only obtainable through
/// [`QuestionRecord::validate`], so the option and answer invariants always hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    question: String,
    options: QuestionOptions,
    #[serde(rename = "correctAnswer")]
    correct_answer: OptionKey,
}

impl QuestionRecord {
    pub fn validate(raw: RawQuestionRecord) -> AppResult<Self> {
        let RawQuestionRecord {
            question,
            mut options,
            correct_answer,
        } = raw;

        if question.trim().is_empty() {
            return Err(malformed("question text is empty"));
        }

        if let Some(extra) = options.keys().find(|k| OptionKey::from_str(k).is_err()) {
            return Err(malformed(&format!("unexpected option key '{}'", extra)));
        }

        let mut take = |key: OptionKey| -> AppResult<String> {
            let text = options
                .remove(key.as_str())
                .ok_or_else(|| malformed(&format!("options missing key {}", key)))?;
            if text.trim().is_empty() {
                return Err(malformed(&format!("option {} is empty", key)));
            }
            Ok(text)
        };

        let options = QuestionOptions {
            a: take(OptionKey::A)?,
            b: take(OptionKey::B)?,
            c: take(OptionKey::C)?,
            d: take(OptionKey::D)?,
        };

        let correct_answer = OptionKey::from_str(correct_answer.trim()).map_err(|_| {
            malformed(&format!(
                "correctAnswer '{}' is not one of {}",
                correct_answer,
                OPTION_KEYS.join(", ")
            ))
        })?;

        Ok(QuestionRecord {
            question,
            options,
            correct_answer,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &QuestionOptions {
        &self.options
    }

    pub fn correct_answer(&self) -> OptionKey {
        self.correct_answer
    }

    pub fn is_correct(&self, answer: OptionKey) -> bool {
        self.correct_answer == answer
    }
}

fn malformed(reason: &str) -> AppError {
    AppError::MalformedContent(reason.to_string())
}
