use sim_core::SessionId;

/// Score-reporting collaborator, invoked exactly once when a session reaches
/// its terminal state.
///
/// `deliver` runs on the session's tick-loop task and must not block: an
/// implementation hands the report off (spawn a task, push to a channel) and
/// returns. Delivery failures are the collaborator's problem; the session is
/// already over and keeps its stats regardless.
pub trait ScoreReporter<R>: Send + Sync {
    fn deliver(&self, session_id: SessionId, report: R);
}

/// Drops reports. For sessions nobody is scoring.
pub struct NullReporter;

impl<R> ScoreReporter<R> for NullReporter {
    fn deliver(&self, _session_id: SessionId, _report: R) {}
}
