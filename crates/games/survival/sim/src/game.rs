use crate::actions::SurvivalAction;
use crate::config::SurvivalConfig;
use crate::events::SurvivalEvent;
use crate::systems;
use crate::world::SurvivalState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sim_core::{ActionEnvelope, Game, Tick};
use survival_types::{SessionReport, SurvivalObservation};

/// One survival session: wave spawning, boss cycle, combat resolution and
/// skills, advanced one fixed tick at a time.
pub struct SurvivalGame {
    state: SurvivalState,
    rng: ChaCha8Rng,
    seed: u64,
}

impl SurvivalGame {
    pub fn state(&self) -> &SurvivalState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Game for SurvivalGame {
    type Config = SurvivalConfig;
    type Action = SurvivalAction;
    type Observation = SurvivalObservation;
    type Event = SurvivalEvent;
    type Report = SessionReport;

    fn new(config: Self::Config, seed: u64) -> Self {
        Self {
            state: SurvivalState::new(config),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    ) {
        if self.state.over {
            return;
        }
        self.state.tick = tick;

        // 1. Player input: shots and skills.
        for action in actions {
            systems::apply_action(&mut self.state, tick, &action.payload, out_events);
        }

        // 2. Lapse skill windows.
        systems::expire_skills(&mut self.state, tick, out_events);

        // 3. Spawn pacing.
        systems::update_difficulty(&mut self.state, tick, out_events);

        // 4. Boss cycle.
        systems::update_boss(&mut self.state, &mut self.rng, tick, out_events);

        // 5. Regular spawning.
        systems::spawn_enemies(&mut self.state, &mut self.rng, tick, out_events);

        // 6. Movement and attachment.
        systems::move_enemies(&mut self.state, tick, out_events);

        // 7. Structure damage from attached enemies.
        systems::process_attacks(&mut self.state, tick, out_events);

        // 8. Projectile flight and expiry.
        systems::move_projectiles(&mut self.state, tick);

        // 9. Projectile-enemy collision.
        systems::resolve_collisions(&mut self.state, tick, out_events);

        // 10. Terminal check.
        systems::check_terminal(&mut self.state, out_events);
    }

    fn observe(&self, tick: Tick) -> Self::Observation {
        crate::observe::build_observation(&self.state, tick)
    }

    fn is_over(&self) -> bool {
        self.state.over
    }

    fn report(&self) -> Option<Self::Report> {
        if !self.state.over {
            return None;
        }
        Some(SessionReport {
            score: self.state.score,
            kills: self.state.kills,
            shots_fired: self.state.shots_fired,
            shots_hit: self.state.shots_hit,
            survived_ms: self.state.survived_ms(),
            cps_max: self.state.config.max_cps(),
            seed: self.seed,
        })
    }
}
