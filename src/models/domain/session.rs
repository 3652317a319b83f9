use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::certificate::Certificate;
use crate::models::domain::question_record::{OptionKey, QuestionRecord, Topic};

#[derive(Clone, Debug, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Generating,
    Ready,
    Graded,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Generating => write!(f, "generating"),
            SessionState::Ready => write!(f, "ready"),
            SessionState::Graded => write!(f, "graded"),
        }
    }
}

/// Marks one generation attempt. Only the token handed out by the latest
/// [`Session::begin_generation`] may complete it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationToken(u64);

/// One user's quiz-taking interaction. Every mutation goes through a
/// transition method, which checks the current [`SessionState`] first.
#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    topic: String,
    quiz: Vec<QuestionRecord>,
    answers: BTreeMap<usize, OptionKey>,
    score: Option<f64>,
    certificate_shown: bool,
    user_name: String,
    loading: bool,
    error: Option<String>,
    state: SessionState,
    generation: u64,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            topic: String::new(),
            quiz: Vec::new(),
            answers: BTreeMap::new(),
            score: None,
            certificate_shown: false,
            user_name: String::new(),
            loading: false,
            error: None,
            state: SessionState::Idle,
            generation: 0,
            created_at: now,
            last_active_at: now,
        }
    }

    /// Replaces the topic. Always legal; anything derived from the old topic is dropped.
    pub fn set_topic(&mut self, text: &str) {
        self.topic = text.to_string();
        self.clear_quiz();
        self.error = None;
        self.loading = false;
        self.state = SessionState::Idle;
        // a generation still in flight belongs to the old topic
        self.generation += 1;
    }

    pub fn begin_generation(&mut self) -> AppResult<(GenerationToken, Topic)> {
        let topic = match Topic::parse(&self.topic) {
            Ok(topic) => topic,
            Err(err) => return Err(self.reject(err)),
        };

        self.clear_quiz();
        self.error = None;
        self.loading = true;
        self.state = SessionState::Generating;
        self.generation += 1;

        Ok((GenerationToken(self.generation), topic))
    }

    /// Applies the outcome of a generation attempt.
    ///
    /// Returns `Ok(false)` when `token` no longer matches the current attempt;
    /// the result is dropped and the session is left as is. A failed attempt
    /// leaves the session `Idle` with an empty quiz and the error recorded.
    pub fn complete_generation(
        &mut self,
        token: GenerationToken,
        result: AppResult<Vec<QuestionRecord>>,
    ) -> AppResult<bool> {
        if token.0 != self.generation || self.state != SessionState::Generating {
            return Ok(false);
        }

        self.loading = false;

        let result = result.and_then(|quiz| {
            if quiz.is_empty() {
                Err(AppError::MalformedContent(
                    "the model returned no questions".to_string(),
                ))
            } else {
                Ok(quiz)
            }
        });

        match result {
            Ok(quiz) => {
                self.quiz = quiz;
                self.answers.clear();
                self.error = None;
                self.state = SessionState::Ready;
                Ok(true)
            }
            Err(err) => {
                self.clear_quiz();
                self.error = Some(err.to_string());
                self.state = SessionState::Idle;
                Err(err)
            }
        }
    }

    /// Records an answer; a later answer to the same question replaces the earlier one.
    pub fn set_answer(&mut self, question_index: usize, key: OptionKey) -> AppResult<()> {
        self.require(SessionState::Ready, "answer a question")?;

        if question_index >= self.quiz.len() {
            return Err(AppError::ValidationError(format!(
                "Question {} does not exist, the quiz has {} questions",
                question_index,
                self.quiz.len()
            )));
        }

        self.answers.insert(question_index, key);
        Ok(())
    }

    pub fn submit(&mut self) -> AppResult<f64> {
        if self.state == SessionState::Graded {
            return Err(self.reject(AppError::ValidationError(
                "This quiz has already been submitted.".to_string(),
            )));
        }
        if self.state != SessionState::Ready || self.quiz.is_empty() {
            return Err(self.reject(AppError::ValidationError(
                "Please generate a quiz first.".to_string(),
            )));
        }

        let score = score(&self.quiz, &self.answers);
        self.score = Some(score);
        self.certificate_shown = true;
        self.error = None;
        self.state = SessionState::Graded;
        Ok(score)
    }

    pub fn set_user_name(&mut self, text: &str) -> AppResult<()> {
        self.require(SessionState::Graded, "set a name")?;
        self.user_name = text.to_string();
        Ok(())
    }

    /// Returns a graded session to an empty `Idle` one, ready for another test.
    pub fn reset(&mut self) -> AppResult<()> {
        self.require(SessionState::Graded, "start another test")?;

        self.topic.clear();
        self.user_name.clear();
        self.clear_quiz();
        self.error = None;
        self.loading = false;
        self.state = SessionState::Idle;
        self.generation += 1;
        Ok(())
    }

    pub fn certificate(&self) -> AppResult<Certificate> {
        self.require(SessionState::Graded, "issue a certificate")?;
        Ok(Certificate::new(
            &self.user_name,
            &self.topic,
            self.score.unwrap_or_default(),
        ))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn quiz(&self) -> &[QuestionRecord] {
        &self.quiz
    }

    pub fn answers(&self) -> &BTreeMap<usize, OptionKey> {
        &self.answers
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn certificate_shown(&self) -> bool {
        self.certificate_shown
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// True once nothing has touched the session for at least `ttl`.
    pub fn is_idle_for(&self, ttl: Duration) -> bool {
        Utc::now()
            .signed_duration_since(self.last_active_at)
            .to_std()
            .is_ok_and(|idle| idle >= ttl)
    }

    fn clear_quiz(&mut self) {
        self.quiz.clear();
        self.answers.clear();
        self.score = None;
        self.certificate_shown = false;
    }

    fn require(&self, expected: SessionState, action: &str) -> AppResult<()> {
        if self.state != expected {
            return Err(AppError::InvalidTransition(format!(
                "cannot {} while the session is {}",
                action, self.state
            )));
        }
        Ok(())
    }

    fn reject(&mut self, err: AppError) -> AppError {
        self.error = Some(err.to_string());
        err
    }
}

/// Percentage of questions answered correctly. Unanswered questions count as wrong.
pub fn score(quiz: &[QuestionRecord], answers: &BTreeMap<usize, OptionKey>) -> f64 {
    if quiz.is_empty() {
        return 0.0;
    }

    let correct = quiz
        .iter()
        .enumerate()
        .filter(|(index, record)| {
            answers
                .get(index)
                .is_some_and(|answer| record.is_correct(*answer))
        })
        .count();

    correct as f64 * 100.0 / quiz.len() as f64
}
