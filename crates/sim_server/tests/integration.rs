use sim_core::{ActionEnvelope, Game, SessionId, Tick};
use sim_server::{EventCursor, GameServer, ScoreReporter, ServerConfig, SessionStatus};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// A minimal game for exercising the server: a structure that loses one hp
/// per tick, with repairs arriving as actions. The session ends when hp runs
/// out; the report is the tick it fell on.
struct DecayGame {
    hp: i32,
    fell_at: Option<Tick>,
}

#[derive(Clone, Debug)]
struct DecayConfig {
    hp: i32,
}

#[derive(Clone, Debug)]
enum DecayAction {
    Repair(i32),
}

#[derive(Clone, Debug)]
struct DecayObservation {
    hp: i32,
    tick: Tick,
}

#[derive(Clone, Debug)]
enum DecayEvent {
    Decayed { hp: i32 },
}

impl Game for DecayGame {
    type Config = DecayConfig;
    type Action = DecayAction;
    type Observation = DecayObservation;
    type Event = DecayEvent;
    type Report = u64;

    fn new(config: Self::Config, _seed: u64) -> Self {
        Self {
            hp: config.hp,
            fell_at: None,
        }
    }

    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    ) {
        for action in actions {
            match &action.payload {
                DecayAction::Repair(amount) => self.hp += amount,
            }
        }
        self.hp -= 1;
        out_events.push(DecayEvent::Decayed { hp: self.hp });
        if self.hp <= 0 && self.fell_at.is_none() {
            self.fell_at = Some(tick);
        }
    }

    fn observe(&self, tick: Tick) -> Self::Observation {
        DecayObservation { hp: self.hp, tick }
    }

    fn is_over(&self) -> bool {
        self.fell_at.is_some()
    }

    fn report(&self) -> Option<Self::Report> {
        self.fell_at
    }
}

#[derive(Default)]
struct RecordingReporter {
    delivered: Mutex<Vec<(SessionId, u64)>>,
}

impl ScoreReporter<u64> for RecordingReporter {
    fn deliver(&self, session_id: SessionId, report: u64) {
        self.delivered.lock().unwrap().push((session_id, report));
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        tick_hz: 200,
        max_sessions: 4,
        event_buffer_capacity: 256,
    }
}

async fn wait_for_status(
    server: &GameServer<DecayGame>,
    session_id: SessionId,
    wanted: SessionStatus,
) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let info = server.session_info(session_id).await.unwrap();
        if info.status == wanted {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "session never reached {:?}, stuck at {:?}",
            wanted,
            info.status
        );
        sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn session_finishes_and_reports_exactly_once() {
    let reporter = Arc::new(RecordingReporter::default());
    let server: GameServer<DecayGame> =
        GameServer::with_reporter(test_config(), reporter.clone());

    let session_id = server
        .start_session(DecayConfig { hp: 5 }, 1)
        .await
        .unwrap();

    wait_for_status(&server, session_id, SessionStatus::Finished).await;
    sleep(Duration::from_millis(50)).await;

    let delivered = reporter.delivered.lock().unwrap().clone();
    assert_eq!(delivered, vec![(session_id, 5)]);
}

#[tokio::test]
async fn observe_and_submit_while_running() {
    let server: GameServer<DecayGame> = GameServer::new(test_config());

    let session_id = server
        .start_session(DecayConfig { hp: 1_000_000 }, 1)
        .await
        .unwrap();

    let obs = server.observe(session_id).await.unwrap();
    assert!(obs.hp > 0);

    let (action_id, tick) = server
        .submit_action(session_id, DecayAction::Repair(10))
        .await
        .unwrap();
    assert_eq!(action_id, 1);
    assert!(tick > 0);

    server.terminate_session(session_id).await.unwrap();
}

#[tokio::test]
async fn poll_events_with_cursor() {
    let server: GameServer<DecayGame> = GameServer::new(test_config());

    let session_id = server.start_session(DecayConfig { hp: 5 }, 1).await.unwrap();
    wait_for_status(&server, session_id, SessionStatus::Finished).await;

    let (events, cursor) = server
        .poll_events(session_id, EventCursor(0))
        .await
        .unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].sequence, 0);
    assert!(matches!(events[4].event, DecayEvent::Decayed { hp: 0 }));

    let (rest, _) = server.poll_events(session_id, cursor).await.unwrap();
    assert!(rest.is_empty());
}

#[tokio::test]
async fn terminated_session_does_not_report() {
    let reporter = Arc::new(RecordingReporter::default());
    let server: GameServer<DecayGame> =
        GameServer::with_reporter(test_config(), reporter.clone());

    let session_id = server
        .start_session(DecayConfig { hp: 1_000_000 }, 1)
        .await
        .unwrap();
    server.terminate_session(session_id).await.unwrap();

    sleep(Duration::from_millis(50)).await;
    assert!(reporter.delivered.lock().unwrap().is_empty());

    // The session is gone from the server entirely.
    assert!(server.observe(session_id).await.is_err());
    assert!(server
        .submit_action(session_id, DecayAction::Repair(1))
        .await
        .is_err());
}

#[tokio::test]
async fn session_cap_is_enforced() {
    let server: GameServer<DecayGame> = GameServer::new(test_config());

    for _ in 0..4 {
        server
            .start_session(DecayConfig { hp: 1_000_000 }, 1)
            .await
            .unwrap();
    }
    assert!(server
        .start_session(DecayConfig { hp: 1_000_000 }, 1)
        .await
        .is_err());

    server.shutdown().await;
}

#[tokio::test]
async fn unknown_session_is_an_error() {
    let server: GameServer<DecayGame> = GameServer::new(test_config());
    assert!(server.observe(999).await.is_err());
    assert!(server.session_info(999).await.is_err());
    assert!(server.terminate_session(999).await.is_err());
}
