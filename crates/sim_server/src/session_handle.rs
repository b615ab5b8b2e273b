use crate::events::EventBuffer;
use crate::reporting::ScoreReporter;
use crate::types::{EventCursor, ServerEvent, SessionStatus};
use sim_core::{ActionId, Game, SessionId, Tick};
use sim_host::SessionHost;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Internal state of a session.
pub struct SessionInner<G: Game> {
    pub host: SessionHost<G>,
    pub events: EventBuffer<G::Event>,
    pub status: SessionStatus,
    reported: bool,
}

/// Thread-safe handle to a running session.
pub struct SessionHandle<G: Game> {
    pub inner: Arc<Mutex<SessionInner<G>>>,
    shutdown: Arc<AtomicBool>,
    session_id: SessionId,
    tick_hz: u32,
    reporter: Arc<dyn ScoreReporter<G::Report>>,
}

impl<G: Game> Clone for SessionHandle<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            shutdown: Arc::clone(&self.shutdown),
            session_id: self.session_id,
            tick_hz: self.tick_hz,
            reporter: Arc::clone(&self.reporter),
        }
    }
}

impl<G: Game> SessionHandle<G> {
    pub fn new(
        session_id: SessionId,
        host: SessionHost<G>,
        event_buffer_capacity: usize,
        reporter: Arc<dyn ScoreReporter<G::Report>>,
    ) -> Self {
        let tick_hz = host.tick_hz();
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                host,
                events: EventBuffer::new(event_buffer_capacity),
                status: SessionStatus::Running,
                reported: false,
            })),
            shutdown: Arc::new(AtomicBool::new(false)),
            session_id,
            tick_hz,
            reporter,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Queue an action for the next tick.
    pub async fn submit_action(
        &self,
        action: G::Action,
    ) -> Result<(ActionId, Tick), crate::errors::SubmitError> {
        let mut inner = self.inner.lock().await;

        if inner.status != SessionStatus::Running {
            return Err(crate::errors::SubmitError::Over);
        }

        let next_tick = inner.host.current_tick() + 1;
        Ok(inner.host.submit(action, next_tick))
    }

    pub async fn observe(&self) -> G::Observation {
        let inner = self.inner.lock().await;
        let tick = inner.host.current_tick();
        inner.host.game().observe(tick)
    }

    pub async fn poll_events(&self, cursor: EventCursor) -> (Vec<ServerEvent<G::Event>>, EventCursor) {
        let inner = self.inner.lock().await;
        inner.events.get_from(cursor)
    }

    pub async fn current_tick(&self) -> Tick {
        let inner = self.inner.lock().await;
        inner.host.current_tick()
    }

    pub async fn status(&self) -> SessionStatus {
        let inner = self.inner.lock().await;
        inner.status
    }

    /// Advance one tick and push its events. Returns true once the session
    /// is finished or terminated.
    pub async fn step_one_tick(&self) -> bool {
        let mut inner = self.inner.lock().await;

        if inner.status != SessionStatus::Running {
            return true;
        }

        if let Some(events) = inner.host.step_one_tick() {
            let tick = inner.host.current_tick();
            for event in events {
                inner.events.push(tick, event);
            }
        }

        if inner.host.is_over() {
            inner.status = SessionStatus::Finished;
            let report = if inner.reported {
                None
            } else {
                inner.reported = true;
                inner.host.report()
            };
            drop(inner);

            // Hand-off happens outside the lock; the reporter must not block.
            if let Some(report) = report {
                self.reporter.deliver(self.session_id, report);
            }
            return true;
        }

        false
    }

    /// Tear the session down without a terminal report.
    pub async fn terminate(&self) {
        let mut inner = self.inner.lock().await;
        if inner.status == SessionStatus::Running {
            inner.status = SessionStatus::Terminated;
        }
        drop(inner);
        self.request_shutdown();
    }
}
