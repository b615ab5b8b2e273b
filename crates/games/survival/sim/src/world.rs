use crate::config::{EnemyKind, SurvivalConfig};
use crate::timers::AttackSchedule;
use sim_core::{Millis, Tick};
use slotmap::{new_key_type, SlotMap};

new_key_type! { pub struct EnemyId; }
new_key_type! { pub struct ProjectileId; }

/// A live hostile instance. All fields are explicit from construction; there
/// is no runtime property grafting.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hp: i32,
    pub max_hp: i32,
    pub x: f32,
    pub y: f32,
    /// Altitude the bob oscillates around (airborne kinds).
    pub base_y: f32,
    /// Bob phase counter; advances only while the enemy is unfrozen.
    pub bob_tick: u64,
    /// Per-instance speed in px/s, rolled at spawn.
    pub speed: f32,
    /// True once the enemy reached its approach x and started attacking.
    pub attached: bool,
}

/// An aimed shot in flight. Removed on first collision or on expiry.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// Normalized direction toward the aim point.
    pub dir: (f32, f32),
    pub expire_tick: Tick,
}

/// Arena of live entities. Generational keys double as the liveness guard:
/// a stale id simply fails to resolve.
#[derive(Clone, Debug)]
pub struct World {
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub projectiles: SlotMap<ProjectileId, Projectile>,
    /// Auxiliary handle to the at-most-one live boss; cleared on its removal.
    pub boss: Option<EnemyId>,
}

impl World {
    pub fn new() -> Self {
        Self {
            enemies: SlotMap::with_key(),
            projectiles: SlotMap::with_key(),
            boss: None,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Boss cycle: `Scheduled -> Alerting -> Active -> (defeat) -> Scheduled`.
/// Regular spawning is paused from the moment the alert starts until the
/// boss dies.
#[derive(Clone, Copy, Debug)]
pub enum BossPhase {
    Scheduled { due_tick: Tick },
    Alerting { spawn_tick: Tick },
    Active { id: EnemyId },
}

impl BossPhase {
    /// True while a boss encounter (alert or fight) is in progress.
    pub fn wave_active(&self) -> bool {
        !matches!(self, BossPhase::Scheduled { .. })
    }
}

/// Aggregate mutable state of one play session.
#[derive(Clone, Debug)]
pub struct SurvivalState {
    pub config: SurvivalConfig,
    pub tick: Tick,
    pub world: World,
    pub attacks: AttackSchedule,

    pub score: u32,
    pub kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub structure_hp: i32,

    /// Current regular spawn cadence; tightens over time down to the floor.
    pub spawn_interval: Millis,
    pub next_spawn_tick: Tick,
    pub next_difficulty_tick: Tick,
    pub next_shot_tick: Tick,

    pub freeze_until: Option<Tick>,
    pub boost_until: Option<Tick>,

    pub boss_phase: BossPhase,
    /// Ordinal of the upcoming (or current) boss wave, starting at 1.
    pub boss_wave: u32,

    /// Set exactly once, when the structure falls. No state mutates after.
    pub over: bool,
}

impl SurvivalState {
    pub fn new(config: SurvivalConfig) -> Self {
        let next_spawn_tick = config.duration_to_ticks(config.spawn_interval);
        let next_difficulty_tick = config.duration_to_ticks(config.difficulty_interval);
        let first_boss_tick = config.duration_to_ticks(config.first_boss_at);
        let spawn_interval = config.spawn_interval;
        let structure_hp = config.structure_max_hp;
        Self {
            tick: 0,
            world: World::new(),
            attacks: AttackSchedule::new(),

            score: 0,
            kills: 0,
            shots_fired: 0,
            shots_hit: 0,
            structure_hp,

            spawn_interval,
            next_spawn_tick,
            next_difficulty_tick,
            next_shot_tick: 0,

            freeze_until: None,
            boost_until: None,

            boss_phase: BossPhase::Scheduled {
                due_tick: first_boss_tick,
            },
            boss_wave: 1,

            over: false,
            config,
        }
    }

    pub fn frozen(&self, tick: Tick) -> bool {
        self.freeze_until.is_some_and(|until| tick < until)
    }

    pub fn boosted(&self, tick: Tick) -> bool {
        self.boost_until.is_some_and(|until| tick < until)
    }

    /// Session-wide scalar applied to all projectile damage.
    pub fn damage_multiplier(&self, tick: Tick) -> i32 {
        if self.boosted(tick) {
            self.config.boost_multiplier
        } else {
            1
        }
    }

    pub fn survived_secs(&self) -> u64 {
        self.tick / self.config.tick_hz as u64
    }

    pub fn survived_ms(&self) -> u64 {
        self.tick * 1_000 / self.config.tick_hz as u64
    }
}
