use rand::Rng;
use sim_core::Millis;

/// Closed set of enemy type-classes. Every kind-dependent behavior (stats,
/// movement, hitbox, scoring) dispatches exhaustively on this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Small,
    Large,
    Flying,
    Boss,
}

impl EnemyKind {
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Small => "Small",
            EnemyKind::Large => "Large",
            EnemyKind::Flying => "Flying",
            EnemyKind::Boss => "Boss",
        }
    }
}

/// Per-kind balance and geometry.
#[derive(Clone, Debug)]
pub struct EnemySpec {
    pub max_hp: i32,
    pub score: u32,
    /// Delay between attacks once attached; the first hit lands one full
    /// period after attachment.
    pub attack_period: Millis,
    pub attack_damage: i32,
    /// Speed range in px/s; a per-instance speed is rolled at spawn.
    pub speed_min: f32,
    pub speed_max: f32,
    /// Horizontal position at which the enemy attaches to the structure.
    pub approach_x: f32,
    pub hitbox_radius: f32,
    /// Hitbox centre offset from sprite position.
    pub hitbox_offset: (f32, f32),
    /// Altitude the kind spawns at.
    pub spawn_y: f32,
    /// Airborne kinds bob vertically while moving and attacking.
    pub airborne: bool,
}

/// Relative weights for the regular spawn roll. Tunable data, not protocol;
/// they need not sum to any particular total.
#[derive(Clone, Copy, Debug)]
pub struct SpawnWeights {
    pub small: u32,
    pub large: u32,
    pub flying: u32,
}

impl SpawnWeights {
    pub fn roll<R: Rng>(&self, rng: &mut R) -> EnemyKind {
        let total = self.small + self.large + self.flying;
        let pick = rng.gen_range(0..total);
        if pick < self.small {
            EnemyKind::Small
        } else if pick < self.small + self.large {
            EnemyKind::Large
        } else {
            EnemyKind::Flying
        }
    }
}

#[derive(Clone, Debug)]
pub struct SurvivalConfig {
    pub tick_hz: u32,

    // Arena geometry
    pub arena_width: f32,
    pub arena_height: f32,
    /// Off-screen x where enemies enter.
    pub spawn_x: f32,
    /// Projectile emission origin (the crystal atop the structure).
    pub emitter: (f32, f32),

    pub structure_max_hp: i32,

    // Regular spawning
    pub spawn_interval: Millis,
    pub spawn_interval_step: Millis,
    pub spawn_interval_floor: Millis,
    pub difficulty_interval: Millis,
    pub spawn_weights: SpawnWeights,

    // Boss cycle
    pub first_boss_at: Millis,
    pub boss_interval: Millis,
    /// Warning window between the alert and the boss entering the field.
    pub boss_alert: Millis,

    // Shooting
    pub shot_cooldown: Millis,
    pub projectile_speed: f32,
    pub projectile_flight: Millis,
    pub projectile_damage: i32,

    // Skills
    pub freeze_cost: u32,
    pub freeze_duration: Millis,
    pub heal_cost: u32,
    pub heal_amount: i32,
    pub boost_cost: u32,
    pub boost_duration: Millis,
    pub boost_multiplier: i32,

    // Airborne bobbing
    pub bob_amplitude: f32,
    pub bob_period: Millis,
    pub bob_attack_amplitude: f32,
    pub bob_attack_period: Millis,

    // Kind table
    pub small: EnemySpec,
    pub large: EnemySpec,
    pub flying: EnemySpec,
    pub boss: EnemySpec,
}

impl SurvivalConfig {
    pub fn spec(&self, kind: EnemyKind) -> &EnemySpec {
        match kind {
            EnemyKind::Small => &self.small,
            EnemyKind::Large => &self.large,
            EnemyKind::Flying => &self.flying,
            EnemyKind::Boss => &self.boss,
        }
    }

    pub fn duration_to_ticks(&self, d: Millis) -> u64 {
        d.to_ticks(self.tick_hz)
    }

    /// Distance covered in one tick at the given px/s speed.
    pub fn px_per_tick(&self, px_per_sec: f32) -> f32 {
        px_per_sec / self.tick_hz as f32
    }

    /// Highest shot rate the cooldown allows, in shots per second.
    pub fn max_cps(&self) -> u32 {
        1_000 / self.shot_cooldown.as_millis().max(1)
    }
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,

            arena_width: 800.0,
            arena_height: 600.0,
            spawn_x: 850.0,
            emitter: (70.0, 220.0),

            structure_max_hp: 100,

            spawn_interval: Millis::from_secs(2),
            spawn_interval_step: Millis::from_millis(200),
            spawn_interval_floor: Millis::from_millis(200),
            difficulty_interval: Millis::from_secs(15),
            spawn_weights: SpawnWeights {
                small: 60,
                large: 25,
                flying: 15,
            },

            first_boss_at: Millis::from_secs(30),
            boss_interval: Millis::from_secs(30),
            boss_alert: Millis::from_secs(3),

            shot_cooldown: Millis::from_millis(200),
            projectile_speed: 800.0,
            projectile_flight: Millis::from_secs(1),
            projectile_damage: 1,

            freeze_cost: 50,
            freeze_duration: Millis::from_secs(3),
            heal_cost: 100,
            heal_amount: 50,
            boost_cost: 70,
            boost_duration: Millis::from_secs(10),
            boost_multiplier: 2,

            bob_amplitude: 30.0,
            bob_period: Millis::from_secs(2),
            bob_attack_amplitude: 15.0,
            bob_attack_period: Millis::from_millis(1_500),

            small: EnemySpec {
                max_hp: 4,
                score: 10,
                attack_period: Millis::from_secs(1),
                attack_damage: 5,
                speed_min: 50.0,
                speed_max: 150.0,
                approach_x: 120.0,
                hitbox_radius: 40.0,
                hitbox_offset: (0.0, 30.0),
                spawn_y: 380.0,
                airborne: false,
            },
            large: EnemySpec {
                max_hp: 10,
                score: 25,
                attack_period: Millis::from_secs(1),
                attack_damage: 5,
                speed_min: 50.0,
                speed_max: 150.0,
                approach_x: 120.0,
                hitbox_radius: 60.0,
                hitbox_offset: (0.0, 30.0),
                spawn_y: 360.0,
                airborne: false,
            },
            flying: EnemySpec {
                max_hp: 6,
                score: 15,
                attack_period: Millis::from_millis(900),
                attack_damage: 6,
                speed_min: 80.0,
                speed_max: 120.0,
                approach_x: 110.0,
                hitbox_radius: 60.0,
                hitbox_offset: (0.0, 0.0),
                spawn_y: 100.0,
                airborne: true,
            },
            boss: EnemySpec {
                max_hp: 50,
                score: 100,
                attack_period: Millis::from_millis(800),
                attack_damage: 10,
                speed_min: 90.0,
                speed_max: 90.0,
                approach_x: 130.0,
                hitbox_radius: 100.0,
                hitbox_offset: (0.0, -5.0),
                spawn_y: 350.0,
                airborne: false,
            },
        }
    }
}
