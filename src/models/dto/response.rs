use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{Certificate, OptionKey, QuestionRecord, Session, SessionState};
use crate::models::domain::question_record::QuestionOptions;

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub question: String,
    pub options: QuestionOptions,
    /// Withheld until the session is graded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<OptionKey>,
}

impl QuestionView {
    fn new(index: usize, record: &QuestionRecord, reveal: bool) -> Self {
        QuestionView {
            index,
            question: record.question().to_string(),
            options: record.options().clone(),
            correct_answer: reveal.then(|| record.correct_answer()),
        }
    }
}

/// Everything the UI needs to render a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: SessionState,
    pub topic: String,
    pub questions: Vec<QuestionView>,
    pub answers: BTreeMap<usize, OptionKey>,
    pub score: Option<f64>,
    pub certificate_shown: bool,
    pub user_name: String,
    pub loading: bool,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let reveal = session.state() == SessionState::Graded;

        SessionView {
            id: session.id(),
            state: session.state(),
            topic: session.topic().to_string(),
            questions: session
                .quiz()
                .iter()
                .enumerate()
                .map(|(index, record)| QuestionView::new(index, record, reveal))
                .collect(),
            answers: session.answers().clone(),
            score: session.score(),
            certificate_shown: session.certificate_shown(),
            user_name: session.user_name().to_string(),
            loading: session.loading(),
            error: session.error().map(str::to_string),
            created_at: session.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificateDto {
    pub user_name: String,
    pub topic: String,
    pub score: f64,
    pub score_label: String,
    pub issued_at: String,
}

impl From<Certificate> for CertificateDto {
    fn from(certificate: Certificate) -> Self {
        CertificateDto {
            score_label: format!("{:.0}%", certificate.score),
            user_name: certificate.user_name,
            topic: certificate.topic,
            score: certificate.score,
            issued_at: certificate.issued_at.format("%B %-d, %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadAck {
    pub message: String,
}
