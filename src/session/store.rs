//! Browser sessions and their controllers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::controller::{Controller, ControllerError, ControllerSnapshot};
use crate::generation::RecipeGenerator;

/// One visitor's state.
///
/// Cloning is cheap; clones share the same controller.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    id: String,
    controller: Mutex<Controller>,
    created_at: DateTime<Utc>,
    last_activity: RwLock<DateTime<Utc>>,
}

/// Session metadata plus the controller state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub id: String,
    pub created_at: String,    // RFC3339
    pub last_activity: String, // RFC3339
    #[serde(flatten)]
    pub controller: ControllerSnapshot,
}

impl Session {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                controller: Mutex::new(Controller::new()),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Run `f` against the controller and mark the session active.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> R {
        let result = {
            let mut guard = self
                .inner
                .controller
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        };
        self.touch();
        result
    }

    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        self.inner
            .controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    #[must_use]
    pub fn to_state(&self) -> SessionState {
        SessionState {
            id: self.inner.id.clone(),
            created_at: self.inner.created_at.to_rfc3339(),
            last_activity: self.last_activity().to_rfc3339(),
            controller: self.snapshot(),
        }
    }

    /// Begin generation and run it on a background task.
    ///
    /// The task reports back through the controller and resolves to whether
    /// its result was applied.
    pub fn start_generation(
        &self,
        generator: Arc<dyn RecipeGenerator>,
        max_recipes: usize,
    ) -> Result<JoinHandle<bool>, ControllerError> {
        let (ticket, request) = self.with_controller(|c| c.begin_generation(max_recipes))?;

        tracing::info!(
            name: "generation.started",
            session_id = %self.id(),
            ticket = %ticket,
            provider = generator.provider_name(),
            ingredients = request.ingredients_available.len(),
            "Generating recipes"
        );

        let session = self.clone();
        Ok(tokio::spawn(async move {
            let outcome = generator.generate(&request).await;
            let count = outcome.as_ref().map_or(0, Vec::len);
            let succeeded = outcome.is_ok();
            let applied = session.with_controller(|c| c.finish_generation(ticket, outcome));

            tracing::info!(
                name: "generation.completed",
                session_id = %session.id(),
                ticket = %ticket,
                succeeded,
                recipes = count,
                applied,
                "Recipe generation finished"
            );
            applied
        }))
    }

    fn last_activity(&self) -> DateTime<Utc> {
        *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    /// Whether the session has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        // A negative span (clock skew) counts as fresh.
        (Utc::now() - self.last_activity())
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store for sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a session with a fresh random id.
    #[must_use]
    pub fn create(&self) -> Session {
        self.create_with_id(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn create_with_id(&self, id: impl Into<String>) -> Session {
        let id = id.into();
        let session = Session::new(id.clone());
        self.write().insert(id, session.clone());
        tracing::debug!(session_id = %session.id(), "Session created");
        session
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        self.read().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        self.write().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions idle longer than `timeout`.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.write();
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }

    #[must_use]
    pub fn list_ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Session>> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
