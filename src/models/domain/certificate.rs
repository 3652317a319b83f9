use chrono::{DateTime, Utc};
use serde::Serialize;

/// Completion certificate data handed to the external renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Certificate {
    pub user_name: String,
    pub topic: String,
    pub score: f64,
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    pub fn new(user_name: &str, topic: &str, score: f64) -> Self {
        Certificate {
            user_name: user_name.trim().to_string(),
            topic: topic.trim().to_string(),
            score,
            issued_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_trims_name_and_topic() {
        let certificate = Certificate::new("  Ada Lovelace ", " Algebra ", 80.0);

        assert_eq!(certificate.user_name, "Ada Lovelace");
        assert_eq!(certificate.topic, "Algebra");
        assert_eq!(certificate.score, 80.0);
        assert!(certificate.issued_at <= Utc::now());
    }
}
