use crate::errors::{CreateSessionError, SessionError, SubmitError};
use crate::reporting::{NullReporter, ScoreReporter};
use crate::session_handle::SessionHandle;
use crate::tick_loop::spawn_tick_loop;
use crate::types::{EventCursor, ServerConfig, ServerEvent, SessionInfo};
use sim_core::{ActionId, Game, SessionId, Tick};
use sim_host::SessionHost;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

struct SessionEntry<G: Game> {
    handle: SessionHandle<G>,
    task: JoinHandle<()>,
}

/// Session server managing multiple concurrent play sessions, each driven by
/// its own tick-loop task.
pub struct GameServer<G: Game> {
    pub config: ServerConfig,
    sessions: Arc<RwLock<HashMap<SessionId, SessionEntry<G>>>>,
    next_session_id: AtomicU64,
    reporter: Arc<dyn ScoreReporter<G::Report>>,
}

impl<G: Game + Send + 'static> GameServer<G>
where
    G::Action: Send,
    G::Observation: Send,
    G::Event: Send,
    G::Config: Send,
    G::Report: Send,
{
    pub fn new(config: ServerConfig) -> Self {
        Self::with_reporter(config, Arc::new(NullReporter))
    }

    /// Create a server whose finished sessions report to the given
    /// collaborator.
    pub fn with_reporter(
        config: ServerConfig,
        reporter: Arc<dyn ScoreReporter<G::Report>>,
    ) -> Self {
        Self {
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            next_session_id: AtomicU64::new(1),
            reporter,
        }
    }

    /// Shut down the server, terminating all sessions.
    pub async fn shutdown(&self) {
        let mut sessions = self.sessions.write().await;

        for (_, entry) in sessions.drain() {
            entry.handle.terminate().await;
            let _ = entry.task.await;
        }
    }

    /// Start a new session and its tick loop.
    pub async fn start_session(
        &self,
        game_config: G::Config,
        seed: u64,
    ) -> Result<SessionId, CreateSessionError> {
        {
            let sessions = self.sessions.read().await;
            if sessions.len() >= self.config.max_sessions {
                return Err(CreateSessionError::TooManySessions);
            }
        }

        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        let host = SessionHost::new(game_config, seed, self.config.tick_hz);
        let handle = SessionHandle::new(
            session_id,
            host,
            self.config.event_buffer_capacity,
            Arc::clone(&self.reporter),
        );

        let task = spawn_tick_loop(handle.clone());

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id, SessionEntry { handle, task });

        tracing::debug!(session_id, "session started");
        Ok(session_id)
    }

    pub async fn submit_action(
        &self,
        session_id: SessionId,
        action: G::Action,
    ) -> Result<(ActionId, Tick), SubmitError> {
        let handle = self
            .handle(session_id)
            .await
            .ok_or(SubmitError::NotFound)?;
        handle.submit_action(action).await
    }

    pub async fn observe(&self, session_id: SessionId) -> Result<G::Observation, SessionError> {
        let handle = self
            .handle(session_id)
            .await
            .ok_or(SessionError::NotFound)?;
        Ok(handle.observe().await)
    }

    pub async fn poll_events(
        &self,
        session_id: SessionId,
        cursor: EventCursor,
    ) -> Result<(Vec<ServerEvent<G::Event>>, EventCursor), SessionError> {
        let handle = self
            .handle(session_id)
            .await
            .ok_or(SessionError::NotFound)?;
        Ok(handle.poll_events(cursor).await)
    }

    pub async fn session_info(&self, session_id: SessionId) -> Result<SessionInfo, SessionError> {
        let handle = self
            .handle(session_id)
            .await
            .ok_or(SessionError::NotFound)?;
        Ok(SessionInfo {
            session_id,
            status: handle.status().await,
            current_tick: handle.current_tick().await,
        })
    }

    pub async fn list_sessions(&self) -> Vec<SessionInfo> {
        let handles: Vec<SessionHandle<G>> = {
            let sessions = self.sessions.read().await;
            sessions.values().map(|e| e.handle.clone()).collect()
        };

        let mut infos = Vec::with_capacity(handles.len());
        for handle in handles {
            infos.push(SessionInfo {
                session_id: handle.session_id(),
                status: handle.status().await,
                current_tick: handle.current_tick().await,
            });
        }
        infos
    }

    /// Terminate and remove a session.
    pub async fn terminate_session(&self, session_id: SessionId) -> Result<(), SessionError> {
        let entry = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(&session_id).ok_or(SessionError::NotFound)?
        };
        entry.handle.terminate().await;
        let _ = entry.task.await;
        tracing::debug!(session_id, "session terminated");
        Ok(())
    }

    async fn handle(&self, session_id: SessionId) -> Option<SessionHandle<G>> {
        let sessions = self.sessions.read().await;
        sessions.get(&session_id).map(|e| e.handle.clone())
    }
}
