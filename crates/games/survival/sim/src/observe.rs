use crate::world::{BossPhase, SurvivalState};
use sim_core::Tick;
use survival_types::{
    BossStatus, EnemyInfo, ProjectileInfo, SkillWindow, SurvivalObservation,
};

fn skill_window(until: Option<Tick>, tick: Tick) -> SkillWindow {
    match until {
        Some(until) if tick < until => SkillWindow {
            active: true,
            remaining_ticks: until - tick,
        },
        _ => SkillWindow::default(),
    }
}

pub fn build_observation(state: &SurvivalState, tick: Tick) -> SurvivalObservation {
    let config = &state.config;

    let boss = match state.boss_phase {
        BossPhase::Scheduled { due_tick } => BossStatus::Scheduled { due_tick },
        BossPhase::Alerting { spawn_tick } => BossStatus::Alerting { spawn_tick },
        BossPhase::Active { id } => match state.world.enemies.get(id) {
            Some(boss) => BossStatus::Active {
                hp: boss.hp,
                max_hp: boss.max_hp,
            },
            None => BossStatus::Scheduled { due_tick: tick },
        },
    };

    let survived_secs = state.survived_secs();

    SurvivalObservation {
        tick,
        ticks_per_second: config.tick_hz,

        score: state.score,
        kills: state.kills,
        structure_hp: state.structure_hp,
        structure_max_hp: config.structure_max_hp,
        survived_secs,
        wave: survived_secs / 15 + 1,

        boss_wave: state.boss_wave,
        boss,

        freeze: skill_window(state.freeze_until, tick),
        damage_boost: skill_window(state.boost_until, tick),
        shot_ready: tick >= state.next_shot_tick,
        spawn_interval_ms: state.spawn_interval.as_millis(),

        enemies: state
            .world
            .enemies
            .values()
            .map(|e| EnemyInfo {
                x: e.x,
                y: e.y,
                kind: e.kind.name().to_string(),
                hp: e.hp,
                max_hp: e.max_hp,
                attached: e.attached,
            })
            .collect(),
        projectiles: state
            .world
            .projectiles
            .values()
            .map(|p| ProjectileInfo { x: p.x, y: p.y })
            .collect(),
    }
}
