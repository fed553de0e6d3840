use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::authoring::{DraftError, QuizDraft};
use crate::navigation::Role;

#[derive(Debug, Clone)]
pub struct Session {
    pub role: Role,
    pub draft: QuizDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no authoring session {0}")]
    Unknown(Uuid),
    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// In-memory authoring sessions. Each draft is owned by exactly one session
/// and only reachable through the store's lock.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

pub(crate) trait OpenSession {
    async fn open(&self, role: Role, seeded: bool) -> Uuid;
}

pub(crate) trait CloseSession {
    async fn close(&self, id: Uuid) -> Option<QuizDraft>;
}

pub(crate) trait RetrieveSession {
    async fn role(&self, id: Uuid) -> Result<Role, SessionError>;
}

pub(crate) trait EditDraft {
    /// Runs `edit` against the session's draft while holding the lock.
    async fn with_draft<T, F>(&self, id: Uuid, edit: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut QuizDraft) -> Result<T, DraftError> + Send;
}

impl OpenSession for SessionStore {
    async fn open(&self, role: Role, seeded: bool) -> Uuid {
        let id = Uuid::new_v4();
        let draft = if seeded {
            QuizDraft::seeded()
        } else {
            QuizDraft::new()
        };
        self.sessions
            .lock()
            .await
            .insert(id, Session { role, draft });
        tracing::info!(%id, %role, seeded, "authoring session opened");
        id
    }
}

impl CloseSession for SessionStore {
    async fn close(&self, id: Uuid) -> Option<QuizDraft> {
        let session = self.sessions.lock().await.remove(&id)?;
        tracing::info!(%id, questions = session.draft.len(), "authoring session closed");
        Some(session.draft)
    }
}

impl RetrieveSession for SessionStore {
    async fn role(&self, id: Uuid) -> Result<Role, SessionError> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .map(|session| session.role)
            .ok_or(SessionError::Unknown(id))
    }
}

impl EditDraft for SessionStore {
    async fn with_draft<T, F>(&self, id: Uuid, edit: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut QuizDraft) -> Result<T, DraftError> + Send,
    {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::Unknown(id))?;
        Ok(edit(&mut session.draft)?)
    }
}
