use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    config::DEFAULT_SESSION_TTL_SECS,
    errors::{AppError, AppResult},
    models::{
        domain::{OptionKey, Session},
        dto::response::{CertificateDto, DownloadAck, SessionView},
    },
    services::{generation_client::QuizGenerator, prompt_builder},
};

/// Holds the live quiz sessions in memory and drives their transitions.
///
/// A session untouched for longer than the TTL is dropped, either when it is
/// next looked up or when a new session is created.
pub struct SessionService {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
    generator: Arc<dyn QuizGenerator>,
    session_ttl: Duration,
}

impl SessionService {
    pub fn new(generator: Arc<dyn QuizGenerator>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            generator,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn create_session(&self) -> SessionView {
        self.evict_expired().await;

        let session = Session::new();
        let view = SessionView::from(&session);

        self.sessions
            .write()
            .await
            .insert(session.id(), Arc::new(Mutex::new(session)));

        log::info!("Created session {}", view.id);
        view
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<SessionView> {
        let session = self.session(id).await?;
        let session = session.lock().await;
        Ok(SessionView::from(&*session))
    }

    pub async fn delete_session(&self, id: &Uuid) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| log::info!("Discarded session {}", id))
            .ok_or_else(|| session_not_found(id))
    }

    pub async fn set_topic(&self, id: &Uuid, topic: &str) -> AppResult<SessionView> {
        self.update(id, |session| {
            session.set_topic(topic);
            Ok(())
        })
        .await
    }

    /// Generates a fresh quiz for the session's topic.
    ///
    /// The session lock is released while the generator runs. If another
    /// generation starts in the meantime, this call's result is discarded and
    /// the current view is returned instead.
    ///
    /// The upstream call and its completion run in a detached task, so a
    /// caller that goes away does not cancel them.
    pub async fn request_generation(&self, id: &Uuid) -> AppResult<SessionView> {
        let session = self.session(id).await?;

        let (token, topic) = session.lock().await.begin_generation()?;
        log::info!("Session {}: generating quiz on '{}'", id, topic);

        let request = prompt_builder::build_request(&topic);
        let generator = Arc::clone(&self.generator);
        let id = *id;

        let task = tokio::spawn(async move {
            let result = generator.generate(&request).await;

            let mut session = session.lock().await;
            session.touch();
            match session.complete_generation(token, result) {
                Ok(true) => {
                    log::info!(
                        "Session {}: quiz ready with {} questions",
                        id,
                        session.quiz().len()
                    );
                }
                Ok(false) => {
                    log::info!("Session {}: discarded result of a superseded generation", id);
                }
                Err(e) => {
                    log::warn!("Session {}: generation failed: {}", id, e);
                    return Err(e);
                }
            }

            Ok(SessionView::from(&*session))
        });

        task.await.map_err(|e| {
            log::error!("Session {}: generation task failed: {}", id, e);
            AppError::InternalError(format!("Generation task failed: {}", e))
        })?
    }

    pub async fn set_answer(
        &self,
        id: &Uuid,
        question_index: usize,
        key: OptionKey,
    ) -> AppResult<SessionView> {
        self.update(id, |session| session.set_answer(question_index, key))
            .await
    }

    pub async fn submit(&self, id: &Uuid) -> AppResult<SessionView> {
        self.update(id, |session| {
            let score = session.submit()?;
            log::info!("Session {}: graded at {:.1}%", session.id(), score);
            Ok(())
        })
        .await
    }

    pub async fn set_user_name(&self, id: &Uuid, user_name: &str) -> AppResult<SessionView> {
        self.update(id, |session| session.set_user_name(user_name))
            .await
    }

    pub async fn reset(&self, id: &Uuid) -> AppResult<SessionView> {
        self.update(id, |session| {
            session.reset()?;
            log::info!("Session {}: reset", session.id());
            Ok(())
        })
        .await
    }

    pub async fn certificate(&self, id: &Uuid) -> AppResult<CertificateDto> {
        let session = self.session(id).await?;
        let certificate = session.lock().await.certificate()?;
        Ok(CertificateDto::from(certificate))
    }

    /// Acknowledges a certificate download. File export is handled by the client.
    pub async fn download_certificate(&self, id: &Uuid) -> AppResult<DownloadAck> {
        let certificate = self.certificate(id).await?;
        log::info!(
            "Session {}: certificate download requested for '{}'",
            id,
            certificate.user_name
        );
        Ok(DownloadAck {
            message: "Certificate downloaded!".to_string(),
        })
    }

    /// Looks up a live session and marks it active. An expired one is removed
    /// and reported as not found.
    async fn session(&self, id: &Uuid) -> AppResult<Arc<Mutex<Session>>> {
        let session = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| session_not_found(id))?;

        let expired = {
            let mut guard = session.lock().await;
            let expired = guard.is_idle_for(self.session_ttl);
            if !expired {
                guard.touch();
            }
            expired
        };

        if expired {
            self.sessions.write().await.remove(id);
            log::info!("Session {} expired", id);
            return Err(session_not_found(id));
        }

        Ok(session)
    }

    async fn evict_expired(&self) {
        let ttl = self.session_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        // a locked session is in use right now
        sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => !session.is_idle_for(ttl),
            Err(_) => true,
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            log::info!("Evicted {} expired sessions", evicted);
        }
    }

    async fn update<F>(&self, id: &Uuid, transition: F) -> AppResult<SessionView>
    where
        F: FnOnce(&mut Session) -> AppResult<()>,
    {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        transition(&mut session)?;
        Ok(SessionView::from(&*session))
    }
}

fn session_not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("Session with id '{}' not found", id))
}
