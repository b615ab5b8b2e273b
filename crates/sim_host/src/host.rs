use sim_core::{ActionEnvelope, ActionId, Game, Tick};
use std::collections::BTreeMap;

/// Result of driving a session for a bounded number of ticks.
#[derive(Debug)]
pub struct RunResult<G: Game> {
    pub finished: bool,
    pub final_tick: Tick,
    pub events: Vec<G::Event>,
}

/// Deterministic driver for a single play session.
///
/// Actions are queued against the tick they should execute on and drained in
/// `action_id` order, so replaying the same `(config, seed)` with the same
/// submissions reproduces the session exactly.
pub struct SessionHost<G: Game> {
    game: G,
    current_tick: Tick,
    tick_hz: u32,
    next_action_id: ActionId,
    pending: BTreeMap<Tick, Vec<ActionEnvelope<G::Action>>>,
}

impl<G: Game> SessionHost<G> {
    pub fn new(config: G::Config, seed: u64, tick_hz: u32) -> Self {
        Self {
            game: G::new(config, seed),
            current_tick: 0,
            tick_hz,
            next_action_id: 1,
            pending: BTreeMap::new(),
        }
    }

    /// Queue an action for execution at `intended_tick`. A tick at or before
    /// the current one is bumped to the next tick. Returns the assigned
    /// action id and the tick the action will actually run on.
    pub fn submit(&mut self, action: G::Action, intended_tick: Tick) -> (ActionId, Tick) {
        let scheduled_tick = if intended_tick <= self.current_tick {
            self.current_tick + 1
        } else {
            intended_tick
        };

        let action_id = self.next_action_id;
        self.next_action_id += 1;

        self.pending.entry(scheduled_tick).or_default().push(ActionEnvelope {
            action_id,
            intended_tick: scheduled_tick,
            payload: action,
        });

        (action_id, scheduled_tick)
    }

    /// Advance one tick. Returns `None` if the session is already over,
    /// otherwise the events produced by this tick.
    pub fn step_one_tick(&mut self) -> Option<Vec<G::Event>> {
        if self.game.is_over() {
            return None;
        }

        self.current_tick += 1;

        let mut actions = self.pending.remove(&self.current_tick).unwrap_or_default();
        actions.sort_by_key(|a| a.action_id);

        let mut tick_events = Vec::new();
        self.game.step(self.current_tick, &actions, &mut tick_events);

        Some(tick_events)
    }

    /// Advance up to `max_ticks`, stopping early on session end.
    pub fn run_for_ticks(&mut self, max_ticks: Tick) -> RunResult<G> {
        let mut all_events = Vec::new();

        for _ in 0..max_ticks {
            match self.step_one_tick() {
                Some(events) => all_events.extend(events),
                None => break,
            }
        }

        RunResult {
            finished: self.game.is_over(),
            final_tick: self.current_tick,
            events: all_events,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    pub fn report(&self) -> Option<G::Report> {
        self.game.report()
    }
}
